use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::debug;

use super::types::*;

pub(crate) struct OllamaHttp {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);

        debug!(model = %request.model, "Ollama chat request");

        let response = self.http.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("Ollama API error ({}): {}", status, error_text));
        }

        Ok(response.json().await?)
    }
}
