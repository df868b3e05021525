//! Domain errors for segmentation operations
//!
//! This module defines the single error taxonomy shared by the catalog,
//! membership, and report services. These are domain-level errors and are
//! independent of storage or transport implementation details.

use thiserror::Error;

/// Errors that can occur across segmentation operations
///
/// Expected domain conditions (duplicates, not-found, expired) are ordinary
/// variants here, never panics. Infrastructure failures are carried opaquely
/// in `Storage`/`Io` so the boundary layer can log and map them generically.
#[derive(Error, Debug)]
pub enum SegmentationError {
    /// The segment slug does not match the allowed naming
    #[error("invalid segment slug naming: {0:?}")]
    InvalidSlug(String),

    /// The user identifier could not be parsed
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    /// A segment with this slug already exists (active or soft-deleted)
    #[error("segment {0} already exists")]
    DuplicateSegment(String),

    /// No segment with this slug was ever created
    #[error("segment {0} not found")]
    SegmentNotFound(String),

    /// The segment has already been soft-deleted
    #[error("segment {0} has already been deleted")]
    AlreadyDeleted(String),

    /// The requested assignment expiration is already in the past
    #[error("segment {0} assignment is already expired")]
    AlreadyExpired(String),

    /// At least one requested slug does not exist in the catalog
    #[error("segment(s) not found")]
    SegmentsNotFound,

    /// The store has no assignment context for this user
    #[error("user not found")]
    UserNotFound,

    /// The report period is outside the accepted range
    #[error("invalid report period {month}/{year}")]
    InvalidPeriod { year: i32, month: u32 },

    /// No events fall inside the requested report period
    #[error("no report data for the requested period")]
    DataNotFound,

    /// Opaque storage backend failure
    #[error("storage operation failed: {0}")]
    Storage(String),

    /// Report artifact read/write failure
    #[error("report file error: {0}")]
    Io(String),
}

impl SegmentationError {
    /// Create an invalid slug error
    pub fn invalid_slug(slug: impl Into<String>) -> Self {
        Self::InvalidSlug(slug.into())
    }

    /// Create an invalid user id error
    pub fn invalid_user_id(raw: impl Into<String>) -> Self {
        Self::InvalidUserId(raw.into())
    }

    /// Create a duplicate segment error
    pub fn duplicate(slug: impl Into<String>) -> Self {
        Self::DuplicateSegment(slug.into())
    }

    /// Create a segment not found error
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::SegmentNotFound(slug.into())
    }

    /// Create an already deleted error
    pub fn already_deleted(slug: impl Into<String>) -> Self {
        Self::AlreadyDeleted(slug.into())
    }

    /// Create an already expired error
    pub fn already_expired(slug: impl Into<String>) -> Self {
        Self::AlreadyExpired(slug.into())
    }

    /// Create a storage failure error with a message
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a report artifact error with a message
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

/// Result type alias for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentationError>;
