pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    Authenticator, GetHistoryUseCase, HistoryRepository, LoginUseCase, SubmitPromptUseCase,
    TextGenerator,
};

pub use connector::{
    Clock, GeminiClient, GeminiConfig, InMemoryHistoryRepository, JsonHistoryRepository,
    ManualClock, MockTextGenerator, RawResponse, ReqwestTransport, StaticAuthenticator,
    SystemClock, Transport, TransportError,
};

pub use domain::{
    extract_text, CallOutcome, DomainError, HistoryEntry, RemoteCallError, RetryPolicy,
    RetryReason, UserRecord, UserTable,
};
