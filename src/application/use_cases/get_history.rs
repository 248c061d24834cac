use std::sync::Arc;

use crate::application::HistoryRepository;
use crate::domain::{DomainError, HistoryEntry};

pub struct GetHistoryUseCase {
    history_repo: Arc<dyn HistoryRepository>,
}

impl GetHistoryUseCase {
    pub fn new(history_repo: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repo }
    }

    pub async fn execute(&self, username: &str) -> Result<Vec<HistoryEntry>, DomainError> {
        self.history_repo.list(username).await
    }
}
