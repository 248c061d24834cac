use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One recorded prompt/response exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    timestamp: String,
    prompt: String,
    response: String,
}

impl HistoryEntry {
    /// Create an entry stamped with the current UTC time.
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self::with_timestamp(current_timestamp(), prompt, response)
    }

    pub fn with_timestamp(
        timestamp: impl Into<String>,
        prompt: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            prompt: prompt.into(),
            response: response.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// ISO-8601 UTC with microseconds, e.g. `2025-01-01T10:00:00.123456Z`.
fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
