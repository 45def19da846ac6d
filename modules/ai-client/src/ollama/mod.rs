mod client;
pub(crate) mod types;

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::{ChatBackend, Message};
use client::OllamaHttp;
use types::{ChatOptions, ChatRequest};

const OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_SYSTEM_PROMPT: &str = "너는 법률·컴플라이언스 분석 AI다.";

// =============================================================================
// Ollama Agent
// =============================================================================

#[derive(Clone)]
pub struct Ollama {
    model: String,
    base_url: String,
    system_prompt: String,
    num_predict: u32,
    timeout: Duration,
}

impl Ollama {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: OLLAMA_URL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            num_predict: 16,
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Cap on generated tokens per answer.
    pub fn with_num_predict(mut self, num_predict: u32) -> Self {
        self.num_predict = num_predict;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(&self.system_prompt), Message::user(prompt)],
            stream: false,
            options: ChatOptions {
                num_predict: self.num_predict,
            },
        }
    }
}

#[async_trait]
impl ChatBackend for Ollama {
    async fn chat(&self, prompt: &str) -> Result<String> {
        let client = OllamaHttp::new(&self.base_url, self.timeout)?;
        let response = client.chat(&self.request(prompt)).await?;
        let answer = response.message.content;
        if answer.is_empty() {
            return Err(anyhow!("Empty response from Ollama"));
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let agent = Ollama::new("llama3.2:3b").with_num_predict(64);
        let json = serde_json::to_value(agent.request("산업안전보건법 제38조 요약")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama3.2:3b",
                "messages": [
                    {"role": "system", "content": DEFAULT_SYSTEM_PROMPT},
                    {"role": "user", "content": "산업안전보건법 제38조 요약"}
                ],
                "stream": false,
                "options": {"num_predict": 64}
            })
        );
    }

    #[test]
    fn test_response_parses_message_content() {
        let parsed: types::ChatResponse = serde_json::from_str(
            r#"{"model":"llama3.2:3b","message":{"role":"assistant","content":"답변"},"done":true}"#,
        )
        .unwrap();
        assert_eq!(parsed.message, Message::assistant("답변"));
    }
}
