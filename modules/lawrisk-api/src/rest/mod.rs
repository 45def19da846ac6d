pub mod articles;
pub mod chat;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use lawrisk_common::AnalyzeRequest;
use lawrisk_graph::GraphError;

use crate::app::AppState;

// --- Helpers ---

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Graph failures are never reported as empty results.
pub(crate) fn graph_failure(e: &GraphError, what: &str) -> Response {
    warn!(error = %e, "{what} failed");
    let status = match e {
        GraphError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_response(status, e.to_string())
}

// --- Handlers ---

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "health": "ok" }))
}

pub async fn neo4j_ping(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.analyzer.ping().await {
        Ok(true) => Json(serde_json::json!({ "neo4j": true })).into_response(),
        Ok(false) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "neo4j": false })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Graph ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "neo4j": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let scope = match body.scope() {
        Ok(scope) => scope,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.analyzer.analyze(&scope).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => graph_failure(&e, "Analyze"),
    }
}
