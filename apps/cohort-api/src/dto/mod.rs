//! API request/response types

pub mod reports;
pub mod segments;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Error response body shared by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "invalid segment slug naming")]
    pub error: String,
}
