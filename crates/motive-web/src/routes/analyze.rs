//! Story analysis handler.

use axum::{extract::State, Json};
use motive_core::{AnalyzeResponse, StoryRequest};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn analyze_story(
    State(state): State<AppState>,
    Json(req): Json<StoryRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    info!(
        revision = %state.revision(),
        chars = req.story.len(),
        "Analyzing story"
    );

    let response = state.relay.analyze(&req.story).await?;
    Ok(Json(response))
}
