//! Monthly audit report module
//!
//! Reconstructs assignment events for a (year, month) window and serializes
//! them into a content-addressed-by-name CSV artifact.

mod entity;
mod service;

pub use entity::{render_csv, report_filename, EventKind, ReportEvent};
pub use service::ReportService;
