//! Phish-Guard Server
//!
//! URL phishing detection service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        PHISH-GUARD                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────┐   ┌──────────────────────┐  │
//! │  │  API      │──►│  Detector  │──►│  Feature Extractor   │  │
//! │  │  (Axum)   │   │            │   │  (6 lexical features)│  │
//! │  └───────────┘   └─────┬──────┘   └──────────────────────┘  │
//! │                 ┌──────┴───────┐                            │
//! │                 ▼              ▼                            │
//! │        ┌────────────────┐ ┌─────────────┐                   │
//! │        │ Inference      │ │ PostgreSQL  │                   │
//! │        │ Endpoint (CSV) │ │ Predictions │                   │
//! │        └────────────────┘ └─────────────┘                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod detector;
mod error;
mod features;
mod handlers;
mod models;
mod scoring;
mod store;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::AppResult;

use detector::Detector;
use features::LayoutInfo;
use scoring::HttpScoringClient;
use store::PgPredictionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phish_guard=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Phish-Guard starting ({})...", config.environment);
    tracing::info!("Database: {}", config.database_url.split('@').last().unwrap_or("***"));

    let layout = LayoutInfo::current();
    tracing::info!(
        "Feature layout v{} (hash {:08x}): {}",
        layout.version,
        layout.hash,
        layout.feature_names.join(",")
    );

    // Storage collaborator
    let table = db::TableName::parse(&config.detector.table_name)?;
    let pool = db::create_pool(&config.database_url, config.storage_timeout()).await
        .context("Failed to create database pool")?;
    let store = PgPredictionStore::new(pool, table, config.storage_timeout());
    store.ensure_table().await
        .context("Failed to prepare prediction table")?;

    // Scoring collaborator
    let scorer = HttpScoringClient::new(
        &config.scoring_base_url,
        &config.detector.endpoint_name,
        config.scoring_timeout(),
    )
    .context("Failed to create scoring client")?;
    tracing::info!(
        "Scoring endpoint: {} via {} (timeout {}s, no retries)",
        scorer.endpoint_name(),
        config.scoring_base_url,
        config.scoring_timeout_secs
    );

    // Build application state
    let state = AppState {
        detector: Arc::new(Detector::new(Arc::new(scorer), Arc::new(store))),
    };

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/invoke", post(handlers::detect::invoke))
        .route("/api/v1/detect", post(handlers::detect::detect))
        .route("/api/v1/features/layout", get(handlers::detect::layout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
