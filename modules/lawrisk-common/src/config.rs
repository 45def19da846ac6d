use std::env;
use std::time::Duration;

use crate::error::LawRiskError;

/// Where the API reads its legal graph from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    Neo4j {
        uri: String,
        user: String,
        password: String,
    },
    /// JSON export (`{nodes, edges}`) loaded into memory at startup.
    Snapshot { path: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub graph: GraphSource,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Query limits
    pub graph_timeout: Duration,
    pub analyze_concurrency: usize,

    // Chat pass-through
    pub ollama_url: String,
    pub ollama_model: String,
    pub ollama_num_predict: u32,
}

impl Config {
    /// Load configuration from environment variables.
    /// `GRAPH_SNAPSHOT_PATH` takes precedence over the `NEO4J_*` credentials.
    pub fn from_env() -> Result<Self, LawRiskError> {
        let graph = match env::var("GRAPH_SNAPSHOT_PATH") {
            Ok(path) if !path.trim().is_empty() => GraphSource::Snapshot { path },
            _ => GraphSource::Neo4j {
                uri: required_env("NEO4J_URI")?,
                user: required_env("NEO4J_USER")?,
                password: required_env("NEO4J_PASSWORD")?,
            },
        };

        Ok(Self {
            graph,
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: parsed_env("WEB_PORT", 8000)?,
            graph_timeout: Duration::from_secs(parsed_env("GRAPH_TIMEOUT_SECS", 30)?),
            analyze_concurrency: parsed_env::<usize>("ANALYZE_CONCURRENCY", 4)?.max(1),
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2:3b".to_string()),
            ollama_num_predict: parsed_env("OLLAMA_NUM_PREDICT", 16)?,
        })
    }
}

fn required_env(key: &str) -> Result<String, LawRiskError> {
    env::var(key).map_err(|_| LawRiskError::Config(format!("{key} environment variable is required")))
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, LawRiskError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| LawRiskError::Config(format!("{key} must be a number, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}
