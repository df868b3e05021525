//! User membership routes

use axum::{routing::get, Router};

use crate::{
    handlers::users::{delete_segments_handler, get_segments_handler, set_segments_handler},
    AppState,
};

/// Create user membership routes
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/users/:id/segments",
        get(get_segments_handler)
            .post(set_segments_handler)
            .delete(delete_segments_handler),
    )
}
