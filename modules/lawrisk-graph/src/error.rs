use std::time::Duration;

use thiserror::Error;

/// Failure to reach or read the graph. Always distinct from "nothing
/// matched", which is an empty result.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),

    #[error("Failed to decode graph row: {0}")]
    Decode(#[from] neo4rs::DeError),

    #[error("Graph query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
