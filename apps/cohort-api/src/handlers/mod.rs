//! Request handlers

pub mod reports;
pub mod segments;
pub mod users;

use axum::http::StatusCode;

use cohort_domain::SegmentationError;

/// Map a domain error to a protocol status and client-facing message
///
/// Infrastructure failures keep a generic body; their cause is logged at the
/// handler, not echoed to the client.
pub fn status_for(err: &SegmentationError) -> (StatusCode, String) {
    match err {
        SegmentationError::InvalidSlug(_) => {
            (StatusCode::BAD_REQUEST, "invalid segment slug naming".to_string())
        }
        SegmentationError::InvalidUserId(_) => {
            (StatusCode::BAD_REQUEST, "invalid user id".to_string())
        }
        SegmentationError::DuplicateSegment(slug) => (
            StatusCode::CONFLICT,
            format!("segment {} already exists", slug),
        ),
        SegmentationError::SegmentNotFound(slug) => {
            (StatusCode::NOT_FOUND, format!("segment {} not found", slug))
        }
        SegmentationError::AlreadyDeleted(slug) => (
            StatusCode::GONE,
            format!("segment {} has already been deleted", slug),
        ),
        SegmentationError::AlreadyExpired(slug) => (
            StatusCode::BAD_REQUEST,
            format!("segment {} assignment is already expired", slug),
        ),
        SegmentationError::SegmentsNotFound => {
            (StatusCode::NOT_FOUND, "segment(s) not found".to_string())
        }
        SegmentationError::UserNotFound => {
            (StatusCode::NOT_FOUND, "user not found".to_string())
        }
        SegmentationError::InvalidPeriod { .. } => (
            StatusCode::BAD_REQUEST,
            "invalid time period provided".to_string(),
        ),
        SegmentationError::DataNotFound => {
            (StatusCode::NOT_FOUND, "no data for report".to_string())
        }
        SegmentationError::Storage(_) | SegmentationError::Io(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        ),
    }
}
