use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::HistoryRepository;
use crate::domain::{DomainError, HistoryEntry};

/// In-memory history for testing and development. Lost on restart.
#[derive(Default)]
pub struct InMemoryHistoryRepository {
    entries: Arc<Mutex<HashMap<String, Vec<HistoryEntry>>>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, username: &str, prompt: &str, response: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        entries
            .entry(username.to_string())
            .or_default()
            .push(HistoryEntry::new(prompt, response));
        Ok(())
    }

    async fn list(&self, username: &str) -> Result<Vec<HistoryEntry>, DomainError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(username).cloned().unwrap_or_default())
    }
}
