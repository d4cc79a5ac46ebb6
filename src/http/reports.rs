//! Metrics document endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::http::response::ApiError;
use crate::http::server::AppState;

/// `GET /metrics`
pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let document = state.reports.read().await?;
    Ok(Json(document))
}
