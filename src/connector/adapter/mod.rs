mod clock;
mod gemini_client;
mod http_transport;
mod in_memory_history_repository;
mod json_history_repository;
mod mock_text_generator;
mod static_authenticator;

pub use clock::*;
pub use gemini_client::*;
pub use http_transport::*;
pub use in_memory_history_repository::*;
pub use json_history_repository::*;
pub use mock_text_generator::*;
pub use static_authenticator::*;
