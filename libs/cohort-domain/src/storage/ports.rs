//! Ports (trait definitions) for external dependencies
//!
//! This module defines the contracts (ports) that storage adapters must
//! implement. Following hexagonal architecture, the domain defines what it
//! needs, and the infrastructure provides implementations. Each collaborator
//! gets its own narrow capability trait rather than one monolithic
//! repository; a concrete storage engine may satisfy several of them.
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead
//! of `async_trait` to ensure zero-cost abstractions and static dispatch.
//!
//! ## Cancellation
//!
//! Every operation is an ordinary future: dropping it cancels the request.
//! Implementations must not block the runtime and must convert their native
//! failures to `SegmentationError::Storage`/`Io`, distinguishing "no rows"
//! (`Ok(None)` / empty collections) from transport failure.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::catalog::Segment;
use crate::error::SegmentationError;
use crate::membership::{UserId, UserSegment};
use crate::report::ReportEvent;

/// Port for segment catalog rows
///
/// Lookups see every row regardless of deletion status; soft-deletion is the
/// only mutation after insert.
pub trait SegmentStore: Send + Sync {
    /// Insert a new segment row
    ///
    /// # Errors
    ///
    /// Returns `SegmentationError::Storage` if the backend rejects the
    /// insert; a uniqueness conflict on the slug is also a storage error,
    /// since the service checks for duplicates before inserting.
    fn insert(
        &self,
        segment: &Segment,
    ) -> impl Future<Output = Result<(), SegmentationError>> + Send;

    /// Set the soft-delete marker on a segment row
    fn soft_delete(
        &self,
        slug: &str,
        deleted_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), SegmentationError>> + Send;

    /// Look up a segment by slug, deleted or not
    ///
    /// # Returns
    ///
    /// `None` when no row with this slug was ever created.
    fn find_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Segment>, SegmentationError>> + Send;

    /// Count how many of the given slugs exist in the catalog
    ///
    /// Existence only: deletion status is irrelevant, and each distinct slug
    /// counts at most once however often it appears in the input.
    fn count_by_slugs(
        &self,
        slugs: &[String],
    ) -> impl Future<Output = Result<usize, SegmentationError>> + Send;
}

/// Port for user-segment assignment rows
pub trait AssignmentStore: Send + Sync {
    /// Upsert assignment rows for a user
    ///
    /// Each entry targets the composite key (user, slug). On conflict the
    /// row's `expired_at` is overwritten and nothing else; `created_at` and
    /// `deleted_at` keep their original values.
    fn upsert(
        &self,
        user_id: &UserId,
        segments: &[UserSegment],
        created_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), SegmentationError>> + Send;

    /// Set the soft-delete marker on the matching assignment rows
    ///
    /// Rows that do not exist are skipped silently, mirroring a keyed
    /// UPDATE.
    fn soft_delete_many(
        &self,
        user_id: &UserId,
        slugs: &[String],
        deleted_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), SegmentationError>> + Send;

    /// List the user's currently active segment slugs
    ///
    /// Active means: the assignment is not soft-deleted, its segment exists
    /// and is not soft-deleted, and `expired_at` is unset or after `now`.
    ///
    /// # Returns
    ///
    /// `None` when the store holds no assignment rows for this user at all
    /// (the "no such user context" signal); `Some` with the active slugs
    /// otherwise, possibly empty. Order is store-defined.
    fn list_active(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<Vec<String>>, SegmentationError>> + Send;
}

/// Port for the report event projection
pub trait ReportStore: Send + Sync {
    /// List every assignment event inside the (year, month) window
    ///
    /// One event per non-null assignment timestamp column falling in the
    /// window, ordered by timestamp ascending.
    fn list_events(
        &self,
        year: i32,
        month: u32,
    ) -> impl Future<Output = Result<Vec<ReportEvent>, SegmentationError>> + Send;
}

/// Port for the generated report artifacts
///
/// The artifact's presence under its deterministic filename is the report
/// cache: a period whose file exists is never recomputed.
pub trait ReportArchive: Send + Sync {
    /// Check whether a report file already exists
    fn exists(
        &self,
        filename: &str,
    ) -> impl Future<Output = Result<bool, SegmentationError>> + Send;

    /// Persist a report file
    fn store(
        &self,
        filename: &str,
        contents: &[u8],
    ) -> impl Future<Output = Result<(), SegmentationError>> + Send;

    /// Read a report file back, byte for byte
    ///
    /// # Errors
    ///
    /// Returns `SegmentationError::DataNotFound` when no such file exists.
    fn load(
        &self,
        filename: &str,
    ) -> impl Future<Output = Result<Vec<u8>, SegmentationError>> + Send;
}
