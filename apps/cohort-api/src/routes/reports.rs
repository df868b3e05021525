//! Report routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::reports::{create_report_handler, fetch_report_handler},
    AppState,
};

/// Create report routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/reports", post(create_report_handler))
        .route("/api/v1/reports/:filename", get(fetch_report_handler))
}
