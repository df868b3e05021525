//! Domain entities for user-segment membership
//!
//! A membership request carries the segment slug and an optional expiration;
//! the active-membership view is the list of slugs currently in force for a
//! user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A requested user-segment assignment
///
/// `expire_at = None` means the assignment never expires. Re-assigning an
/// already assigned slug refreshes the expiration and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSegment {
    /// Slug of the segment being assigned
    pub slug: String,

    /// Optional expiration; `None` = never expires
    pub expire_at: Option<DateTime<Utc>>,
}

impl UserSegment {
    /// Create an assignment request without expiration
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            expire_at: None,
        }
    }

    /// Create an assignment request expiring at the given time
    pub fn expiring(slug: impl Into<String>, expire_at: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            expire_at: Some(expire_at),
        }
    }
}

/// A user's currently active segment membership
///
/// Only assignments whose segment is live, whose own soft-delete marker is
/// unset, and whose expiration has not passed appear here. Slug order is
/// store-defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSegments {
    /// The user these segments belong to
    pub user_id: UserId,

    /// Active segment slugs
    pub slugs: Vec<String>,
}
