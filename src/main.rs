// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::dataset_service::DatasetService;
use crate::application::page_service::PageService;
use crate::application::router::PageRouter;
use crate::application::view_update::ViewUpdateEngine;
use crate::infrastructure::config::{load_datasets_config, load_server_config};
use crate::infrastructure::dataset_source::LocationRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dash_gallery=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let server_config = load_server_config().context("Failed to load config/server")?;
    let datasets_config = load_datasets_config().context("Failed to load config/datasets")?;
    let page_router = PageRouter::new(&server_config.enabled_pages()?);

    // Load datasets once; there is no degraded mode without them
    let repository = Arc::new(LocationRepository::new(datasets_config.datasets));
    let datasets = Arc::new(DatasetService::new(repository).load_all().await?);

    // Create services (application layer)
    let view_engine = ViewUpdateEngine::new(datasets);
    let page_service = PageService::new(page_router, view_engine.clone());

    let state = Arc::new(AppState {
        page_service,
        view_engine,
    });

    let router = build_router(state);

    let addr = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Starting dash-gallery on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
