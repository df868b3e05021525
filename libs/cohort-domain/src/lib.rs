//! # Cohort Domain Layer
//!
//! This crate contains the pure business logic and domain models for the
//! Cohort user-segmentation service. It follows hexagonal architecture
//! principles:
//!
//! - **Entities**: Core domain models (Segment, UserSegment, ReportEvent)
//! - **Ports**: Trait definitions for external dependencies (segment,
//!   assignment, and report stores, the report archive)
//! - **Services**: Business logic orchestration (catalog, membership,
//!   reports)
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (databases,
//! filesystems, HTTP, etc.). All external dependencies are expressed as
//! traits (ports) that will be implemented by adapter layers.
//!
//! ## Example
//!
//! ```rust
//! use cohort_domain::membership::{MembershipService, UserId, UserSegment};
//! use cohort_domain::storage::{AssignmentStore, SegmentStore};
//!
//! // The service is generic over any store implementation
//! async fn example<R: SegmentStore + AssignmentStore>(
//!     service: MembershipService<R>,
//!     user_id: UserId,
//! ) {
//!     let request = vec![UserSegment::new("AVITO_DISCOUNT_50")];
//!     service.set_segments(&user_id, &request).await.unwrap();
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod membership;
pub mod report;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use catalog::{CatalogService, Segment};
pub use error::{Result, SegmentationError};
pub use membership::{MembershipService, UserId, UserSegment, UserSegments};
pub use report::{EventKind, ReportEvent, ReportService};
