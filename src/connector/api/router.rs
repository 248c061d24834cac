use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{HistoryController, PromptController};

/// Dispatches one-shot CLI commands to their controllers.
pub struct Router<'a> {
    prompt_controller: PromptController<'a>,
    history_controller: HistoryController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            prompt_controller: PromptController::new(container),
            history_controller: HistoryController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Prompt { text, username } => self.prompt_controller.prompt(text, username).await,
            Commands::History { username } => self.history_controller.history(username).await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
