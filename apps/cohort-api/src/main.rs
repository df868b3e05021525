//! Cohort API - User-Segmentation Service
//!
//! HTTP service for managing the segment catalog, user membership, and
//! monthly CSV audit reports. The storage engine is process-local; the
//! report artifacts live under a configurable reports directory.

mod dto;
mod handlers;
mod routes;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use cohort_domain::{CatalogService, MembershipService, ReportService};
use cohort_store::{FsReportArchive, MemoryStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService<MemoryStore>>,
    pub membership: Arc<MembershipService<MemoryStore>>,
    pub reports: Arc<ReportService<MemoryStore, FsReportArchive>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Starting Cohort segmentation service");

    // Load environment variables
    dotenvy::dotenv().ok();

    // The storage engine: one shared in-process store handle per service
    let store = MemoryStore::new();

    // Get reports directory from environment
    let reports_dir = std::env::var("COHORT_REPORTS_DIR").unwrap_or_else(|_| {
        info!("COHORT_REPORTS_DIR not set, using default: reports");
        "reports".to_string()
    });

    let archive = FsReportArchive::new(reports_dir);

    // Create shared application state
    let state = AppState {
        catalog: Arc::new(CatalogService::new(store.clone())),
        membership: Arc::new(MembershipService::new(store.clone())),
        reports: Arc::new(ReportService::new(store, archive)),
    };

    // Build HTTP router
    let app = routes::create_router(state);

    // Get bind address from environment
    let host = std::env::var("COHORT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("COHORT_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    info!(addr = %addr, "Starting HTTP server");

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
