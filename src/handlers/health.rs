//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::features::layout::{layout_hash, FEATURE_VERSION};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    feature_version: u8,
    layout_hash: u32,
    timestamp: i64,
}

/// Liveness only; collaborators are not probed
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        feature_version: FEATURE_VERSION,
        layout_hash: layout_hash(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
