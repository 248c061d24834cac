use async_trait::async_trait;
use tracing::debug;

use crate::application::TextGenerator;
use crate::domain::DomainError;

/// Offline generator that echoes the prompt back. Used with `--mock-generator`.
pub struct MockTextGenerator {
    prefix: String,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            prefix: "echo: ".to_string(),
        }
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        debug!("Mock generator answering {} chars", prompt.len());
        let reply = format!("{}{}", self.prefix, prompt);
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(DomainError::invalid_input("Prompt is empty"));
        }
        Ok(reply.to_string())
    }
}
