pub mod ollama;
pub mod traits;

pub use ollama::Ollama;
pub use traits::{ChatBackend, Message, MessageRole};
