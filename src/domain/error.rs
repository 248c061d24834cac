use thiserror::Error;

/// Failure of a call to the remote text-generation endpoint.
///
/// The variants keep the cause typed for logging and tests, but callers are
/// only expected to relay the message: every variant means "the call failed".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteCallError {
    #[error("Gemini API key not found. Set environment variable GEMINI_API_KEY before running.")]
    MissingApiKey,

    #[error("Request timed out while waiting for Gemini (overall timeout).")]
    Timeout,

    #[error("Network error contacting Gemini: {0}")]
    Network(String),

    #[error("Gemini API still overloaded after retries (503).")]
    Overloaded,

    #[error("Gemini API quota exceeded (429). Check billing/usage or use a different key.")]
    QuotaExceeded,

    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini returned non-JSON empty response.")]
    EmptyResponse,

    #[error("No usable text returned from Gemini. Last response: {last_body}")]
    Exhausted { last_body: String },
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    RemoteCall(#[from] RemoteCallError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_remote_call(&self) -> bool {
        matches!(self, Self::RemoteCall(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
