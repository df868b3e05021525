//! Domain entities for the monthly audit report
//!
//! Report rows are a derived projection: one event per assignment timestamp
//! column falling inside the requested (year, month) window. They are never
//! stored; every report request recomputes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::membership::UserId;

/// Kind of membership event appearing in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The assignment was created (`created_at`)
    Added,
    /// The assignment was soft-deleted (`deleted_at`)
    Deleted,
    /// The assignment expired (`expired_at`)
    Expired,
}

impl EventKind {
    /// The method string used in CSV rows
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Added => "added",
            EventKind::Deleted => "deleted",
            EventKind::Expired => "expired",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assignment event inside a report window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEvent {
    /// The user the assignment belongs to
    pub user_id: UserId,

    /// Slug of the assigned segment
    pub slug: String,

    /// What happened to the assignment
    pub method: EventKind,

    /// When it happened, taken from the matching assignment column
    pub timestamp: DateTime<Utc>,
}

/// Render report events as CSV
///
/// No header row; columns are `user_id, slug, method, timestamp` with the
/// timestamp in its human-readable `Display` form. Every column is free of
/// commas and quotes, so no CSV escaping is needed.
pub fn render_csv(events: &[ReportEvent]) -> String {
    let mut out = String::new();

    for event in events {
        out.push_str(&event.user_id.to_string());
        out.push(',');
        out.push_str(&event.slug);
        out.push(',');
        out.push_str(event.method.as_str());
        out.push(',');
        out.push_str(&event.timestamp.to_string());
        out.push('\n');
    }

    out
}

/// Deterministic report filename for a period
pub fn report_filename(year: i32, month: u32) -> String {
    format!("{}_{}_report.csv", month, year)
}
