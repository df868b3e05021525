//! Segment catalog handlers

use axum::{extract::Path, extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info};

use crate::{
    dto::segments::{AddSegmentRequest, SegmentResponse},
    dto::ErrorResponse,
    AppState,
};

use super::status_for;

/// Handle segment creation requests
#[utoipa::path(
    post,
    path = "/api/v1/segments",
    request_body = AddSegmentRequest,
    responses(
        (status = 201, description = "Segment created successfully", body = SegmentResponse),
        (status = 400, description = "Invalid slug naming", body = ErrorResponse),
        (status = 409, description = "Segment already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "segments"
)]
pub async fn add_segment_handler(
    State(state): State<AppState>,
    Json(payload): Json<AddSegmentRequest>,
) -> impl IntoResponse {
    info!(slug = %payload.slug, "Received add segment request");

    match state
        .catalog
        .add_segment(&payload.slug, payload.description)
        .await
    {
        Ok(()) => (
            StatusCode::CREATED,
            Json(SegmentResponse {
                slug: payload.slug,
                message: "Segment created successfully".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            error!(slug = %payload.slug, error = %err, "Failed to add segment");
            let (status, message) = status_for(&err);
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}

/// Handle segment deletion requests
#[utoipa::path(
    delete,
    path = "/api/v1/segments/{slug}",
    params(
        ("slug" = String, Path, description = "Slug of the segment to retire")
    ),
    responses(
        (status = 200, description = "Segment deleted successfully", body = SegmentResponse),
        (status = 400, description = "Invalid slug naming", body = ErrorResponse),
        (status = 404, description = "Segment not found", body = ErrorResponse),
        (status = 410, description = "Segment already deleted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "segments"
)]
pub async fn delete_segment_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    info!(slug = %slug, "Received delete segment request");

    match state.catalog.delete_segment(&slug).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SegmentResponse {
                slug,
                message: "Segment deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            error!(slug = %slug, error = %err, "Failed to delete segment");
            let (status, message) = status_for(&err);
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}
