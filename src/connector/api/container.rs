use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::application::{
    Authenticator, GetHistoryUseCase, HistoryRepository, LoginUseCase, SubmitPromptUseCase,
    TextGenerator,
};
use crate::domain::UserTable;
use crate::{
    GeminiClient, GeminiConfig, InMemoryHistoryRepository, JsonHistoryRepository,
    MockTextGenerator, StaticAuthenticator,
};

pub const HISTORY_FILE_NAME: &str = "history.json";

pub struct ContainerConfig {
    pub data_dir: String,
    /// Keep history in memory instead of `<data_dir>/history.json`.
    pub memory_storage: bool,
    /// Answer prompts with the offline echo generator instead of Gemini.
    pub mock_generator: bool,
    /// JSON users table; the built-in demo account is used when absent.
    pub users_file: Option<String>,
    pub gemini: GeminiConfig,
}

impl ContainerConfig {
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(HISTORY_FILE_NAME)
    }
}

pub struct Container {
    generator: Arc<dyn TextGenerator>,
    history_repo: Arc<dyn HistoryRepository>,
    authenticator: Arc<dyn Authenticator>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let generator: Arc<dyn TextGenerator> = if config.mock_generator {
            debug!("Using mock text generator");
            Arc::new(MockTextGenerator::new())
        } else {
            if !config.gemini.has_api_key() {
                warn!("GEMINI_API_KEY is not set; prompt calls will fail until it is configured");
            }
            debug!(
                "Using Gemini model {} at {}",
                config.gemini.model(),
                config.gemini.base_url()
            );
            Arc::new(GeminiClient::new(config.gemini.clone()))
        };

        let history_repo: Arc<dyn HistoryRepository> = if config.memory_storage {
            debug!("Using in-memory history storage");
            Arc::new(InMemoryHistoryRepository::new())
        } else {
            let path = config.history_path();
            debug!("Using history file at {}", path.display());
            Arc::new(JsonHistoryRepository::new(path))
        };

        let users = match config.users_file.as_deref() {
            Some(path) => UserTable::load(Path::new(path))
                .with_context(|| format!("Failed to load users table from {path}"))?,
            None => {
                info!("No users file configured; using the built-in demo account");
                UserTable::demo()
            }
        };
        let authenticator = Arc::new(StaticAuthenticator::new(users));

        Ok(Self::from_parts(generator, history_repo, authenticator))
    }

    /// Assemble a container from ready-made components.
    pub fn from_parts(
        generator: Arc<dyn TextGenerator>,
        history_repo: Arc<dyn HistoryRepository>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            generator,
            history_repo,
            authenticator,
        }
    }

    pub fn login_use_case(&self) -> LoginUseCase {
        LoginUseCase::new(self.authenticator.clone())
    }

    pub fn submit_prompt_use_case(&self) -> SubmitPromptUseCase {
        SubmitPromptUseCase::new(self.generator.clone(), self.history_repo.clone())
    }

    pub fn history_use_case(&self) -> GetHistoryUseCase {
        GetHistoryUseCase::new(self.history_repo.clone())
    }

    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        self.authenticator.clone()
    }
}
