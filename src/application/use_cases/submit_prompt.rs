use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::{HistoryRepository, TextGenerator};
use crate::domain::DomainError;

/// Forwards a user's prompt to the generator and records the exchange.
pub struct SubmitPromptUseCase {
    generator: Arc<dyn TextGenerator>,
    history_repo: Arc<dyn HistoryRepository>,
}

impl SubmitPromptUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>, history_repo: Arc<dyn HistoryRepository>) -> Self {
        Self {
            generator,
            history_repo,
        }
    }

    /// Nothing is recorded when generation fails.
    pub async fn execute(&self, username: &str, prompt: &str) -> Result<String, DomainError> {
        info!("Prompt from {} ({} chars)", username, prompt.chars().count());
        let start_time = Instant::now();

        let response = match self.generator.generate(prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Generation failed for {}: {}", username, e);
                return Err(e);
            }
        };

        self.history_repo.append(username, prompt, &response).await?;

        info!(
            "Answered {} in {:.2?} ({} chars)",
            username,
            start_time.elapsed(),
            response.chars().count()
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::RemoteCallError;
    use crate::InMemoryHistoryRepository;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
            Err(RemoteCallError::QuotaExceeded.into())
        }
    }

    #[tokio::test]
    async fn successful_prompt_is_recorded() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        let use_case = SubmitPromptUseCase::new(
            Arc::new(crate::MockTextGenerator::new()),
            history.clone(),
        );

        let response = use_case.execute("ayan", "hello").await.unwrap();

        assert_eq!(response, "echo: hello");
        let entries = history.list("ayan").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prompt(), "hello");
        assert_eq!(entries[0].response(), "echo: hello");
    }

    #[tokio::test]
    async fn failed_prompt_records_nothing() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        let use_case = SubmitPromptUseCase::new(Arc::new(FailingGenerator), history.clone());

        let err = use_case.execute("ayan", "hello").await.unwrap_err();

        assert!(err.is_remote_call());
        assert!(history.list("ayan").await.unwrap().is_empty());
    }
}
