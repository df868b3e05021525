//! Report handlers

use axum::{
    extract::Path,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use crate::{
    dto::reports::{CreateReportRequest, CreateReportResponse},
    dto::ErrorResponse,
    AppState,
};

use super::status_for;

/// Handle report creation requests
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = CreateReportRequest,
    responses(
        (status = 200, description = "Report available under the returned filename", body = CreateReportResponse),
        (status = 400, description = "Invalid time period", body = ErrorResponse),
        (status = 404, description = "No data for the period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn create_report_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateReportRequest>,
) -> impl IntoResponse {
    info!(year = payload.year, month = payload.month, "Received create report request");

    match state.reports.create_report(payload.year, payload.month).await {
        Ok(filename) => (
            StatusCode::OK,
            Json(CreateReportResponse { filename }),
        )
            .into_response(),
        Err(err) => {
            error!(year = payload.year, month = payload.month, error = %err, "Failed to create report");
            let (status, message) = status_for(&err);
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}

/// Handle report downloads
#[utoipa::path(
    get,
    path = "/api/v1/reports/{filename}",
    params(
        ("filename" = String, Path, description = "Filename returned by report creation")
    ),
    responses(
        (status = 200, description = "CSV report contents", body = String, content_type = "text/csv"),
        (status = 400, description = "Malformed filename", body = ErrorResponse),
        (status = 404, description = "Report does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn fetch_report_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    // Filenames are flat; anything path-like never names a report.
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "malformed report filename".to_string(),
            }),
        )
            .into_response();
    }

    match state.reports.fetch_report(&filename).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment;filename={}", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            error!(filename = %filename, error = %err, "Failed to fetch report");
            let (status, message) = status_for(&err);
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}
