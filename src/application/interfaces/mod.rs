mod authenticator;
mod history_repository;
mod text_generator;

pub use authenticator::*;
pub use history_repository::*;
pub use text_generator::*;
