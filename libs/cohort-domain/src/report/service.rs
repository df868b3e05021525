//! Report service - Business logic orchestration
//!
//! Reconstructs the monthly ledger of assignment events and materializes it
//! as a CSV artifact. The artifact's presence under its deterministic
//! filename doubles as the cache: an existing file short-circuits the whole
//! pipeline, store query included.

use crate::error::{Result, SegmentationError};
use crate::storage::{ReportArchive, ReportStore};
use crate::validation::is_valid_report_period;

use super::{render_csv, report_filename};

/// Service generating and serving monthly CSV audit reports
///
/// Concurrent requests for the same period are safe: both may query and
/// write, the rendered bytes are identical, and a single write publishes the
/// complete file.
pub struct ReportService<R, A> {
    store: R,
    archive: A,
}

impl<R, A> ReportService<R, A>
where
    R: ReportStore,
    A: ReportArchive,
{
    /// Create a new ReportService with the given event store and archive
    pub fn new(store: R, archive: A) -> Self {
        Self { store, archive }
    }

    /// Create the CSV report for a (year, month) period
    ///
    /// Returns the deterministic filename `{month}_{year}_report.csv`. If
    /// the file already exists the filename is returned immediately and the
    /// event store is not queried.
    ///
    /// # Errors
    ///
    /// - `SegmentationError::InvalidPeriod` if the period is out of range
    /// - `SegmentationError::DataNotFound` if no events fall in the window
    /// - `SegmentationError::Storage` if the event query fails
    /// - `SegmentationError::Io` if the artifact cannot be written
    pub async fn create_report(&self, year: i32, month: u32) -> Result<String> {
        if !is_valid_report_period(year, month) {
            return Err(SegmentationError::InvalidPeriod { year, month });
        }

        let filename = report_filename(year, month);

        if self.archive.exists(&filename).await? {
            return Ok(filename);
        }

        let events = self.store.list_events(year, month).await?;

        if events.is_empty() {
            return Err(SegmentationError::DataNotFound);
        }

        let csv = render_csv(&events);
        self.archive.store(&filename, csv.as_bytes()).await?;

        Ok(filename)
    }

    /// Read a generated report back, byte for byte
    ///
    /// # Errors
    ///
    /// Returns `SegmentationError::DataNotFound` when no such report exists.
    pub async fn fetch_report(&self, filename: &str) -> Result<Vec<u8>> {
        self.archive.load(filename).await
    }
}
