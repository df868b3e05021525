//! User-segment membership module
//!
//! Owns per-user segment assignment: set with optional expiration, removal
//! by soft-delete, and the active-membership query.

mod entity;
mod ids;
mod service;

pub use entity::{UserSegment, UserSegments};
pub use ids::UserId;
pub use service::MembershipService;
