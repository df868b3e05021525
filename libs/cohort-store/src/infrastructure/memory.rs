//! In-Memory Store Implementation
//!
//! This module implements the `SegmentStore`, `AssignmentStore`, and
//! `ReportStore` ports with process-local keyed maps. Every query sees the
//! current state at call time; the keyed maps guarantee at most one row per
//! slug and per (user, slug) pair.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, instrument};

use cohort_domain::catalog::Segment;
use cohort_domain::error::SegmentationError;
use cohort_domain::membership::{UserId, UserSegment};
use cohort_domain::report::{EventKind, ReportEvent};
use cohort_domain::storage::{AssignmentStore, ReportStore, SegmentStore};

/// One stored user-segment assignment row, keyed by (user, slug)
#[derive(Debug, Clone)]
struct AssignmentRow {
    created_at: DateTime<Utc>,
    expired_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct Inner {
    segments: HashMap<String, Segment>,
    assignments: HashMap<UserId, HashMap<String, AssignmentRow>>,
}

/// In-memory implementation of the storage ports
///
/// The store is a cheap `Clone` handle over shared state, so the catalog,
/// membership, and report services can each hold their own copy. Locks are
/// held only for the synchronous map access, never across an await point.
///
/// ## Error Handling
///
/// The only native failure mode is a poisoned lock, which is converted to
/// `SegmentationError::Storage`; domain "no rows" outcomes are expressed
/// through the port return types (`Option`, empty collections), never as
/// errors.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, Inner>, SegmentationError> {
        self.inner
            .read()
            .map_err(|_| SegmentationError::storage("store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, SegmentationError> {
        self.inner
            .write()
            .map_err(|_| SegmentationError::storage("store lock poisoned"))
    }
}

impl SegmentStore for MemoryStore {
    #[instrument(skip(self, segment), fields(slug = %segment.slug()))]
    fn insert(
        &self,
        segment: &Segment,
    ) -> impl std::future::Future<Output = Result<(), SegmentationError>> + Send {
        let store = self.clone();
        let segment = segment.clone();

        async move {
            debug!(slug = %segment.slug(), "Inserting segment");
            store
                .write()?
                .segments
                .insert(segment.slug().to_string(), segment);
            Ok(())
        }
    }

    #[instrument(skip(self))]
    fn soft_delete(
        &self,
        slug: &str,
        deleted_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), SegmentationError>> + Send {
        let store = self.clone();
        let slug = slug.to_string();

        async move {
            debug!(slug = %slug, "Soft-deleting segment");
            if let Some(segment) = store.write()?.segments.get_mut(&slug) {
                segment.mark_deleted(deleted_at);
            }
            Ok(())
        }
    }

    #[instrument(skip(self))]
    fn find_by_slug(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Segment>, SegmentationError>> + Send
    {
        let store = self.clone();
        let slug = slug.to_string();

        async move { Ok(store.read()?.segments.get(&slug).cloned()) }
    }

    #[instrument(skip(self, slugs), fields(requested = slugs.len()))]
    fn count_by_slugs(
        &self,
        slugs: &[String],
    ) -> impl std::future::Future<Output = Result<usize, SegmentationError>> + Send {
        let store = self.clone();
        let mut slugs = slugs.to_vec();
        slugs.sort();
        slugs.dedup();

        async move {
            let inner = store.read()?;
            let count = slugs
                .iter()
                .filter(|slug| inner.segments.contains_key(*slug))
                .count();
            Ok(count)
        }
    }
}

impl AssignmentStore for MemoryStore {
    #[instrument(skip(self, segments), fields(user_id = %user_id, entries = segments.len()))]
    fn upsert(
        &self,
        user_id: &UserId,
        segments: &[UserSegment],
        created_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), SegmentationError>> + Send {
        let store = self.clone();
        let user_id = *user_id;
        let segments = segments.to_vec();

        async move {
            debug!(user_id = %user_id, "Upserting assignments");
            let mut inner = store.write()?;
            let rows = inner.assignments.entry(user_id).or_default();

            for segment in segments {
                // Conflict on (user, slug) refreshes the expiration only.
                rows.entry(segment.slug)
                    .and_modify(|row| row.expired_at = segment.expire_at)
                    .or_insert(AssignmentRow {
                        created_at,
                        expired_at: segment.expire_at,
                        deleted_at: None,
                    });
            }

            Ok(())
        }
    }

    #[instrument(skip(self, slugs), fields(user_id = %user_id, entries = slugs.len()))]
    fn soft_delete_many(
        &self,
        user_id: &UserId,
        slugs: &[String],
        deleted_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), SegmentationError>> + Send {
        let store = self.clone();
        let user_id = *user_id;
        let slugs = slugs.to_vec();

        async move {
            debug!(user_id = %user_id, "Soft-deleting assignments");
            let mut inner = store.write()?;

            if let Some(rows) = inner.assignments.get_mut(&user_id) {
                for slug in &slugs {
                    if let Some(row) = rows.get_mut(slug) {
                        row.deleted_at = Some(deleted_at);
                    }
                }
            }

            Ok(())
        }
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    fn list_active(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Vec<String>>, SegmentationError>> + Send
    {
        let store = self.clone();
        let user_id = *user_id;

        async move {
            let inner = store.read()?;

            // No rows at all for the user is the "no such user" signal.
            let Some(rows) = inner.assignments.get(&user_id) else {
                return Ok(None);
            };

            let mut active: Vec<String> = rows
                .iter()
                .filter(|(slug, row)| {
                    row.deleted_at.is_none()
                        && row.expired_at.map_or(true, |at| at > now)
                        && inner
                            .segments
                            .get(*slug)
                            .is_some_and(|segment| !segment.is_deleted())
                })
                .map(|(slug, _)| slug.clone())
                .collect();
            active.sort();

            Ok(Some(active))
        }
    }
}

impl ReportStore for MemoryStore {
    #[instrument(skip(self))]
    fn list_events(
        &self,
        year: i32,
        month: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ReportEvent>, SegmentationError>> + Send
    {
        let store = self.clone();

        async move {
            let inner = store.read()?;
            let mut events = Vec::new();

            let in_window = |at: &DateTime<Utc>| at.year() == year && at.month() == month;

            for (user_id, rows) in &inner.assignments {
                for (slug, row) in rows {
                    let mut push = |method: EventKind, timestamp: DateTime<Utc>| {
                        events.push(ReportEvent {
                            user_id: *user_id,
                            slug: slug.clone(),
                            method,
                            timestamp,
                        });
                    };

                    if in_window(&row.created_at) {
                        push(EventKind::Added, row.created_at);
                    }
                    if let Some(at) = row.deleted_at.filter(in_window) {
                        push(EventKind::Deleted, at);
                    }
                    if let Some(at) = row.expired_at.filter(in_window) {
                        push(EventKind::Expired, at);
                    }
                }
            }

            events.sort_by(|a, b| {
                a.timestamp
                    .cmp(&b.timestamp)
                    .then_with(|| a.slug.cmp(&b.slug))
            });

            debug!(year, month, events = events.len(), "Reconstructed report events");
            Ok(events)
        }
    }
}
