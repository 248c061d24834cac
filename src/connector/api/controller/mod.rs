pub mod history_controller;
pub mod prompt_controller;

pub use history_controller::HistoryController;
pub use prompt_controller::PromptController;
