use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::Ollama;
use lawrisk_common::{Config, GraphSource};
use lawrisk_graph::{Analyzer, GraphClient, GraphReader, LawGraph, SnapshotGraph};

mod app;
mod rest;

use app::AppState;

async fn open_graph(source: &GraphSource) -> Result<Arc<dyn LawGraph>> {
    Ok(match source {
        GraphSource::Neo4j {
            uri,
            user,
            password,
        } => {
            let client = GraphClient::connect(uri, user, password).await?;
            info!(uri = %uri, "Connected to Neo4j");
            Arc::new(GraphReader::new(client))
        }
        GraphSource::Snapshot { path } => Arc::new(SnapshotGraph::load(path)?),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lawrisk=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let graph = open_graph(&config.graph).await?;
    let analyzer = Analyzer::new(graph)
        .with_timeout(config.graph_timeout)
        .with_concurrency(config.analyze_concurrency);

    let chat = Ollama::new(&config.ollama_model)
        .with_base_url(&config.ollama_url)
        .with_num_predict(config.ollama_num_predict);

    let state = Arc::new(AppState {
        analyzer,
        chat: Arc::new(chat),
    });
    let app = app::router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Law risk API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
