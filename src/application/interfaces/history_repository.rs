use async_trait::async_trait;

use crate::domain::{DomainError, HistoryEntry};

/// Append-only per-user log of prompt/response exchanges.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Record an exchange for `username`, stamped with the current time.
    async fn append(&self, username: &str, prompt: &str, response: &str) -> Result<(), DomainError>;

    /// All entries for `username` in insertion order. Unknown users have none.
    async fn list(&self, username: &str) -> Result<Vec<HistoryEntry>, DomainError>;
}
