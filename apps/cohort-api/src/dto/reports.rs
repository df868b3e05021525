//! DTOs for report endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a monthly report
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    /// Report year (after 1971, before the current year)
    #[schema(example = 2023)]
    pub year: i32,
    /// Report month (1-12)
    #[schema(example = 8)]
    pub month: u32,
}

/// Response body carrying the generated report's filename
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReportResponse {
    /// Deterministic filename of the CSV artifact
    #[schema(example = "8_2023_report.csv")]
    pub filename: String,
}
