//! Backend model listing proxy.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

/// Forward the backend's model list. Any failure is reported as a 500.
pub async fn list_models(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let models = state.relay.list_models().await.map_err(|e| {
        error!(error = %e, "Model listing failed");
        ApiError::internal(format!("Failed to fetch models: {}", e))
    })?;

    Ok(Json(models))
}
