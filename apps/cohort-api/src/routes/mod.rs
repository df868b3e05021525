//! API routes

pub mod reports;
pub mod segments;
pub mod users;

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::reports::{CreateReportRequest, CreateReportResponse},
    dto::segments::{AddSegmentRequest, SegmentResponse},
    dto::users::{
        DeleteSegmentsRequest, SetSegmentsRequest, UserSegmentDto, UserSegmentsResponse,
    },
    dto::ErrorResponse,
    handlers, AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::segments::add_segment_handler,
        handlers::segments::delete_segment_handler,
        handlers::users::set_segments_handler,
        handlers::users::delete_segments_handler,
        handlers::users::get_segments_handler,
        handlers::reports::create_report_handler,
        handlers::reports::fetch_report_handler,
        health_handler
    ),
    components(
        schemas(
            AddSegmentRequest,
            SegmentResponse,
            SetSegmentsRequest,
            DeleteSegmentsRequest,
            UserSegmentDto,
            UserSegmentsResponse,
            CreateReportRequest,
            CreateReportResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "segments", description = "Segment catalog endpoints"),
        (name = "users", description = "User membership endpoints"),
        (name = "reports", description = "Monthly CSV report endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "Cohort API",
        version = "0.1.0",
        description = "User-segmentation service: segment catalog, membership, and monthly audit reports",
        contact(
            name = "Cohort Maintainers"
        )
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(segments::routes())
        .merge(users::routes())
        .merge(reports::routes())
        .route("/health", axum::routing::get(health_handler))
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}
