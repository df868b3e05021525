//! Segment catalog routes

use axum::{
    routing::{delete, post},
    Router,
};

use crate::{
    handlers::segments::{add_segment_handler, delete_segment_handler},
    AppState,
};

/// Create segment catalog routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/segments", post(add_segment_handler))
        .route("/api/v1/segments/:slug", delete(delete_segment_handler))
}
