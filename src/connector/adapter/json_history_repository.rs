use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::HistoryRepository;
use crate::domain::{DomainError, HistoryEntry};

type HistoryMap = BTreeMap<String, Vec<HistoryEntry>>;

const EMPTY_DOCUMENT: &str = "{}";

/// History kept in a single JSON file shaped `{username: [entries...]}`.
///
/// A missing file is created empty. Unparseable content, or content of the
/// wrong shape, is replaced with an empty document instead of failing.
pub struct JsonHistoryRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonHistoryRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<HistoryMap, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Creating history file at {}", self.path.display());
                self.reset().await?;
                return Ok(HistoryMap::new());
            }
            Err(e) => {
                warn!("Unreadable history file {}: {}. Resetting.", self.path.display(), e);
                self.reset().await?;
                return Ok(HistoryMap::new());
            }
        };

        if raw.trim().is_empty() {
            return Ok(HistoryMap::new());
        }

        match serde_json::from_str::<HistoryMap>(&raw) {
            Ok(data) => Ok(data),
            Err(e) => {
                warn!("Corrupt history file {}: {}. Resetting.", self.path.display(), e);
                self.reset().await?;
                Ok(HistoryMap::new())
            }
        }
    }

    async fn write_all(&self, data: &HistoryMap) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| DomainError::storage(format!("Failed to serialize history: {e}")))?;
        self.write_raw(&json).await
    }

    async fn reset(&self) -> Result<(), DomainError> {
        self.write_raw(EMPTY_DOCUMENT).await
    }

    async fn write_raw(&self, contents: &str) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn append(&self, username: &str, prompt: &str, response: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_all().await?;
        data.entry(username.to_string())
            .or_default()
            .push(HistoryEntry::new(prompt, response));
        self.write_all(&data).await?;
        debug!("Appended history entry for {}", username);
        Ok(())
    }

    async fn list(&self, username: &str) -> Result<Vec<HistoryEntry>, DomainError> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_all().await?;
        Ok(data.remove(username).unwrap_or_default())
    }
}
