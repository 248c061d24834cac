use async_trait::async_trait;

use crate::domain::DomainError;

/// Sends a free-text prompt to a generative-text backend and returns its reply.
///
/// Implementors own transport, retries and reply parsing. A successful result
/// is always non-empty trimmed text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
