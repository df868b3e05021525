//! Domain entities for the segment catalog
//!
//! This module defines the core domain model for a Segment: a named
//! category that can be assigned to users. Segments are identified by an
//! uppercase slug, never mutated after creation, and never hard-deleted;
//! removal only sets the deletion timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Segment is a named category with an immutable slug
///
/// A slug that has never been created has no Segment at all; a created
/// Segment stays in the catalog forever and is retired by soft-deletion.
/// Existence checks deliberately look at any Segment regardless of its
/// deletion status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Unique uppercase identifier, immutable once created
    slug: String,

    /// Optional free-text description
    description: Option<String>,

    /// Timestamp when the segment was created
    created_at: DateTime<Utc>,

    /// Soft-delete marker; `None` means the segment is active
    deleted_at: Option<DateTime<Utc>>,
}

impl Segment {
    /// Create a new active Segment
    ///
    /// This is a pure domain constructor - it doesn't perform any I/O and
    /// does not validate the slug; naming validation happens in the service
    /// before a Segment is ever constructed.
    pub fn new(slug: impl Into<String>, description: Option<String>) -> Self {
        Self {
            slug: slug.into(),
            description,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Create a Segment with explicit values (used for reconstruction)
    pub fn from_parts(
        slug: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            slug,
            description,
            created_at,
            deleted_at,
        }
    }

    /// Get the segment's slug
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Get the optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the creation timestamp
    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    /// Get the soft-delete timestamp (if set)
    pub fn deleted_at(&self) -> Option<&DateTime<Utc>> {
        self.deleted_at.as_ref()
    }

    /// Check whether this segment has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Mark this segment as deleted at the given time
    ///
    /// This is typically applied by the storage layer when persisting a
    /// catalog deletion.
    pub fn mark_deleted(&mut self, deleted_at: DateTime<Utc>) {
        self.deleted_at = Some(deleted_at);
    }
}
