use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use super::error_response;
use crate::app::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    prompt: String,
}

/// Pass a free-form prompt through to the configured model.
pub async fn api_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    let prompt = body.prompt.trim();
    if prompt.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "prompt must not be empty");
    }

    match state.chat.chat(prompt).await {
        Ok(answer) => Json(serde_json::json!({ "answer": answer })).into_response(),
        Err(e) => {
            warn!(error = %e, "Chat request failed");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
