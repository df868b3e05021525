//! # Cohort Storage Adapters
//!
//! Concrete implementations of the domain storage ports:
//!
//! - [`infrastructure::MemoryStore`]: process-local storage engine backing
//!   the segment catalog, the assignment table, and the report event
//!   projection
//! - [`infrastructure::FsReportArchive`]: report artifacts on local disk
//!
//! Adapters convert their native failures to domain error kinds; no
//! infrastructure error type crosses the port boundary.

pub mod infrastructure;

pub use infrastructure::{FsReportArchive, MemoryStore};
