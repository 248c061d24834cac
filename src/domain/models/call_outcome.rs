use crate::domain::RemoteCallError;

/// Why an attempt may be worth repeating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    /// The request never produced an HTTP response.
    Network(String),
    /// HTTP 503 from the remote endpoint.
    Overloaded { body: String },
    /// A JSON reply from which no usable text could be extracted.
    EmptyReply { body: String },
}

impl RetryReason {
    /// Raw response body, when the attempt got as far as receiving one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Network(_) => None,
            Self::Overloaded { body } | Self::EmptyReply { body } => Some(body),
        }
    }

    /// The error to surface when this reason occurs on the final attempt.
    ///
    /// `None` means the loop should end through the exhaustion path instead.
    pub fn into_final_error(self) -> Option<RemoteCallError> {
        match self {
            Self::Network(message) => Some(RemoteCallError::Network(message)),
            Self::Overloaded { .. } => Some(RemoteCallError::Overloaded),
            Self::EmptyReply { .. } => None,
        }
    }
}

/// Result of a single attempt against the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success(String),
    RetryableFailure(RetryReason),
    FatalFailure(RemoteCallError),
}
