//! Catalog service - Business logic orchestration
//!
//! This module contains the core business logic for the segment catalog.
//! The service coordinates between the Segment entity and the segment store
//! port.

use chrono::Utc;

use crate::error::{Result, SegmentationError};
use crate::storage::SegmentStore;
use crate::validation::is_valid_slug;

use super::Segment;

/// Service owning the set of defined segments
///
/// Business rules enforced here:
/// - Slug naming is validated before any store access
/// - A slug can be created at most once, ever: the duplicate check sees
///   soft-deleted rows too, so a retired slug cannot be revived
/// - Deleting an already deleted segment is an error
///
/// ## Static Dispatch
///
/// The service is generic over any `SegmentStore` implementation. The
/// compiler will generate specialized versions for each concrete type,
/// resulting in zero-cost abstractions.
///
/// The existence check and the following write are not wrapped in a
/// transaction; a racing creation of the same slug is caught by the store's
/// uniqueness constraint, not here.
pub struct CatalogService<R> {
    store: R,
}

impl<R> CatalogService<R>
where
    R: SegmentStore,
{
    /// Create a new CatalogService with the given store
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// Define a new segment
    ///
    /// # Errors
    ///
    /// - `SegmentationError::InvalidSlug` if the slug naming is invalid
    /// - `SegmentationError::DuplicateSegment` if any row with this slug
    ///   exists, active or soft-deleted
    /// - `SegmentationError::Storage` if the store fails
    pub async fn add_segment(&self, slug: &str, description: Option<String>) -> Result<()> {
        if !is_valid_slug(slug) {
            return Err(SegmentationError::invalid_slug(slug));
        }

        if self.store.find_by_slug(slug).await?.is_some() {
            return Err(SegmentationError::duplicate(slug));
        }

        let segment = Segment::new(slug, description);
        self.store.insert(&segment).await
    }

    /// Soft-delete a segment
    ///
    /// # Errors
    ///
    /// - `SegmentationError::InvalidSlug` if the slug naming is invalid
    /// - `SegmentationError::SegmentNotFound` if the slug was never created
    /// - `SegmentationError::AlreadyDeleted` if the segment is already
    ///   soft-deleted
    /// - `SegmentationError::Storage` if the store fails
    pub async fn delete_segment(&self, slug: &str) -> Result<()> {
        if !is_valid_slug(slug) {
            return Err(SegmentationError::invalid_slug(slug));
        }

        match self.store.find_by_slug(slug).await? {
            None => Err(SegmentationError::not_found(slug)),
            Some(segment) if segment.is_deleted() => {
                Err(SegmentationError::already_deleted(slug))
            }
            Some(_) => self.store.soft_delete(slug, Utc::now()).await,
        }
    }
}
