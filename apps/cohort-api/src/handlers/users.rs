//! User membership handlers

use axum::{extract::Path, extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info};

use cohort_domain::{UserId, UserSegment};

use crate::{
    dto::users::{DeleteSegmentsRequest, SetSegmentsRequest, UserSegmentsResponse},
    dto::ErrorResponse,
    AppState,
};

use super::status_for;

fn parse_user_id(raw: &str) -> Result<UserId, (StatusCode, Json<ErrorResponse>)> {
    raw.parse().map_err(|err| {
        let (status, message) = status_for(&err);
        (status, Json(ErrorResponse { error: message }))
    })
}

/// Handle assignment requests
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/segments",
    params(
        ("id" = String, Path, description = "User identifier (UUID)")
    ),
    request_body = SetSegmentsRequest,
    responses(
        (status = 200, description = "Segments assigned successfully"),
        (status = 400, description = "Invalid user id, slug naming, or expiration", body = ErrorResponse),
        (status = 404, description = "At least one segment does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn set_segments_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SetSegmentsRequest>,
) -> impl IntoResponse {
    let user_id = match parse_user_id(&id) {
        Ok(user_id) => user_id,
        Err(rejection) => return rejection.into_response(),
    };

    info!(user_id = %user_id, entries = payload.segments.len(), "Received set segments request");

    let segments: Vec<UserSegment> = payload
        .segments
        .into_iter()
        .map(|dto| UserSegment {
            slug: dto.slug,
            expire_at: dto.expire_at,
        })
        .collect();

    match state.membership.set_segments(&user_id, &segments).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => {
            error!(user_id = %user_id, error = %err, "Failed to set segments");
            let (status, message) = status_for(&err);
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}

/// Handle assignment removal requests
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/segments",
    params(
        ("id" = String, Path, description = "User identifier (UUID)")
    ),
    request_body = DeleteSegmentsRequest,
    responses(
        (status = 200, description = "Segments removed successfully"),
        (status = 400, description = "Invalid user id or slug naming", body = ErrorResponse),
        (status = 404, description = "At least one segment does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn delete_segments_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DeleteSegmentsRequest>,
) -> impl IntoResponse {
    let user_id = match parse_user_id(&id) {
        Ok(user_id) => user_id,
        Err(rejection) => return rejection.into_response(),
    };

    info!(user_id = %user_id, entries = payload.slugs.len(), "Received delete segments request");

    match state
        .membership
        .delete_segments(&user_id, &payload.slugs)
        .await
    {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => {
            error!(user_id = %user_id, error = %err, "Failed to delete segments");
            let (status, message) = status_for(&err);
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}

/// Handle active-membership queries
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/segments",
    params(
        ("id" = String, Path, description = "User identifier (UUID)")
    ),
    responses(
        (status = 200, description = "Active segments for the user", body = UserSegmentsResponse),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
        (status = 404, description = "User unknown or nothing active", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_segments_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let user_id = match parse_user_id(&id) {
        Ok(user_id) => user_id,
        Err(rejection) => return rejection.into_response(),
    };

    match state.membership.get_segments(&user_id).await {
        Ok(membership) => (
            StatusCode::OK,
            Json(UserSegmentsResponse {
                user_id: membership.user_id.to_string(),
                slugs: membership.slugs,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(user_id = %user_id, error = %err, "Failed to get segments");
            let (status, message) = status_for(&err);
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}
