use crate::application::Authenticator;
use crate::domain::UserTable;

/// Authenticates against a fixed [`UserTable`] supplied at construction.
pub struct StaticAuthenticator {
    users: UserTable,
}

impl StaticAuthenticator {
    pub fn new(users: UserTable) -> Self {
        Self { users }
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> Option<String> {
        let user = self.users.get(username)?;
        (user.password == password).then(|| user.token.clone())
    }

    fn resolve_user(&self, token: &str) -> Option<String> {
        self.users
            .iter()
            .find(|(_, user)| user.token == token)
            .map(|(username, _)| username.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;

    fn authenticator() -> StaticAuthenticator {
        StaticAuthenticator::new(
            UserTable::new()
                .with_user("alice", UserRecord::new("wonderland", "alice-token"))
                .with_user("bob", UserRecord::new("builder", "bob-token")),
        )
    }

    #[test]
    fn correct_password_yields_token() {
        assert_eq!(
            authenticator().authenticate("alice", "wonderland").as_deref(),
            Some("alice-token")
        );
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        let auth = authenticator();
        assert_eq!(auth.authenticate("alice", "builder"), None);
        assert_eq!(auth.authenticate("carol", "wonderland"), None);
    }

    #[test]
    fn token_resolves_to_username() {
        let auth = authenticator();
        assert_eq!(auth.resolve_user("bob-token").as_deref(), Some("bob"));
        assert_eq!(auth.resolve_user("unknown"), None);
    }

    #[test]
    fn demo_table_has_default_account() {
        let auth = StaticAuthenticator::new(UserTable::demo());
        assert_eq!(auth.authenticate("ayan", "ayan123").as_deref(), Some("ayan-123"));
    }
}
