//! Detection handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::{AppState, AppResult};
use crate::detector::{error_envelope, event_url, DetectionError};
use crate::features::LayoutInfo;
use crate::models::{DetectResponse, InvocationResponse};

/// Unreadable bodies become InvalidInput instead of axum's plain-text rejection
fn read_event(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, DetectionError> {
    payload
        .map(|Json(event)| event)
        .map_err(|rejection| DetectionError::InvalidInput(rejection.body_text()))
}

/// Classify a URL, answering with the detection body directly
pub async fn detect(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<DetectResponse>> {
    let event = read_event(payload)?;
    let url = event_url(&event)?;
    let result = state.detector.detect(url).await?;
    Ok(Json(result))
}

/// Invocation-style entry point: the logical status travels in the envelope
pub async fn invoke(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Json<InvocationResponse> {
    match read_event(payload) {
        Ok(event) => Json(state.detector.handle_event(&event).await),
        Err(e) => {
            tracing::warn!("Rejected invocation body: {}", e);
            Json(error_envelope(&e))
        }
    }
}

/// Feature layout the scoring endpoint must be trained against
pub async fn layout() -> Json<LayoutInfo> {
    Json(LayoutInfo::current())
}
