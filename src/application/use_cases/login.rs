use std::sync::Arc;

use tracing::{info, warn};

use crate::application::Authenticator;
use crate::domain::DomainError;

pub struct LoginUseCase {
    authenticator: Arc<dyn Authenticator>,
}

impl LoginUseCase {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    pub fn execute(&self, username: &str, password: &str) -> Result<String, DomainError> {
        match self.authenticator.authenticate(username, password) {
            Some(token) => {
                info!("User {} logged in", username);
                Ok(token)
            }
            None => {
                warn!("Rejected login for {}", username);
                Err(DomainError::unauthorized("Invalid username or password"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserTable;
    use crate::StaticAuthenticator;

    #[test]
    fn login_returns_token_or_unauthorized() {
        let use_case = LoginUseCase::new(Arc::new(StaticAuthenticator::new(UserTable::demo())));

        assert_eq!(use_case.execute("ayan", "ayan123").unwrap(), "ayan-123");
        let err = use_case.execute("ayan", "wrong").unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid username or password");
    }
}
