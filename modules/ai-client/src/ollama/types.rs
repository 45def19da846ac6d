use serde::{Deserialize, Serialize};

use crate::traits::Message;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    pub options: ChatOptions,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatOptions {
    pub num_predict: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatResponse {
    pub message: Message,
}
