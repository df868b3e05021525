//! DTOs for user membership endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One requested segment assignment
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserSegmentDto {
    /// Slug of the segment being assigned
    #[schema(example = "AVITO_DISCOUNT_50")]
    pub slug: String,
    /// Optional expiration; omitted means the assignment never expires
    pub expire_at: Option<DateTime<Utc>>,
}

/// Request body for assigning segments to a user
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetSegmentsRequest {
    /// Assignments to upsert
    pub segments: Vec<UserSegmentDto>,
}

/// Request body for removing segments from a user
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteSegmentsRequest {
    /// Slugs whose assignments are removed
    #[schema(example = json!(["AVITO_DISCOUNT_50"]))]
    pub slugs: Vec<String>,
}

/// Response body listing a user's active segments
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSegmentsResponse {
    /// The user the segments belong to
    #[schema(example = "80b0b88d-379e-11ee-8bf7-0242c0a80002")]
    pub user_id: String,
    /// Active segment slugs
    #[schema(example = json!(["AVITO_DISCOUNT_50"]))]
    pub slugs: Vec<String>,
}
