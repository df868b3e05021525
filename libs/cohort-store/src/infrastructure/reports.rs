//! Filesystem Report Archive Implementation
//!
//! This module implements the `ReportArchive` port over a local reports
//! directory. Filenames are deterministic per period, so the presence of a
//! file is the cache signal the report service relies on.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument};

use cohort_domain::error::SegmentationError;
use cohort_domain::storage::ReportArchive;

/// Filesystem-backed implementation of the ReportArchive port
///
/// All I/O goes through `tokio::fs`. A report is published with a single
/// write, so a concurrent reader either misses the file or sees it complete.
///
/// ## Error Handling
///
/// A missing file on `load` is `SegmentationError::DataNotFound`; every
/// other I/O failure is converted to `SegmentationError::Io` with a
/// descriptive message.
#[derive(Clone)]
pub struct FsReportArchive {
    base_dir: PathBuf,
}

impl FsReportArchive {
    /// Create an archive rooted at the given reports directory
    ///
    /// The directory is created lazily on the first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        info!(dir = %base_dir.display(), "Initializing FsReportArchive");
        Self { base_dir }
    }

    /// Get the reports directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }
}

impl ReportArchive for FsReportArchive {
    #[instrument(skip(self))]
    fn exists(
        &self,
        filename: &str,
    ) -> impl std::future::Future<Output = Result<bool, SegmentationError>> + Send {
        let path = self.path_for(filename);

        async move {
            match tokio::fs::try_exists(&path).await {
                Ok(present) => Ok(present),
                Err(err) => {
                    error!(path = %path.display(), error = ?err, "Failed to stat report file");
                    Err(SegmentationError::io(format!(
                        "stat failed for '{}': {}",
                        path.display(),
                        err
                    )))
                }
            }
        }
    }

    #[instrument(skip(self, contents), fields(bytes = contents.len()))]
    fn store(
        &self,
        filename: &str,
        contents: &[u8],
    ) -> impl std::future::Future<Output = Result<(), SegmentationError>> + Send {
        let base_dir = self.base_dir.clone();
        let path = self.path_for(filename);
        let contents = contents.to_vec();

        async move {
            if let Err(err) = tokio::fs::create_dir_all(&base_dir).await {
                error!(dir = %base_dir.display(), error = ?err, "Failed to create reports directory");
                return Err(SegmentationError::io(format!(
                    "creating '{}' failed: {}",
                    base_dir.display(),
                    err
                )));
            }

            match tokio::fs::write(&path, &contents).await {
                Ok(()) => {
                    debug!(path = %path.display(), "Stored report file");
                    Ok(())
                }
                Err(err) => {
                    error!(path = %path.display(), error = ?err, "Failed to write report file");
                    Err(SegmentationError::io(format!(
                        "writing '{}' failed: {}",
                        path.display(),
                        err
                    )))
                }
            }
        }
    }

    #[instrument(skip(self))]
    fn load(
        &self,
        filename: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, SegmentationError>> + Send {
        let path = self.path_for(filename);

        async move {
            match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(bytes),
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    Err(SegmentationError::DataNotFound)
                }
                Err(err) => {
                    error!(path = %path.display(), error = ?err, "Failed to read report file");
                    Err(SegmentationError::io(format!(
                        "reading '{}' failed: {}",
                        path.display(),
                        err
                    )))
                }
            }
        }
    }
}
