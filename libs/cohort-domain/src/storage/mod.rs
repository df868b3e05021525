//! Storage ports

mod ports;

pub use ports::{AssignmentStore, ReportArchive, ReportStore, SegmentStore};
