//! DTOs for segment catalog endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a segment
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddSegmentRequest {
    /// Unique uppercase identifier of the segment
    #[schema(example = "AVITO_DISCOUNT_50")]
    pub slug: String,
    /// Optional free-text description
    #[schema(example = "50% discount for the autumn campaign")]
    pub description: Option<String>,
}

/// Response body for a successful catalog mutation
#[derive(Debug, Serialize, ToSchema)]
pub struct SegmentResponse {
    /// Slug of the affected segment
    #[schema(example = "AVITO_DISCOUNT_50")]
    pub slug: String,
    /// Outcome message
    #[schema(example = "Segment created successfully")]
    pub message: String,
}
