use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use ai_client::ChatBackend;
use lawrisk_graph::Analyzer;

use crate::rest;

pub struct AppState {
    pub analyzer: Analyzer,
    pub chat: Arc<dyn ChatBackend>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health checks
        .route("/", get(rest::root))
        .route("/health", get(rest::health))
        .route("/neo4j/ping", get(rest::neo4j_ping))
        // Analysis
        .route("/analyze", post(rest::analyze))
        .route("/api/articles", get(rest::articles::api_articles))
        .route("/api/chat", post(rest::chat::api_chat))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}
