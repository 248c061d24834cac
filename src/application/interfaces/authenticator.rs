/// Checks credentials and maps bearer tokens back to usernames.
pub trait Authenticator: Send + Sync {
    /// Returns the user's token when the username exists and the password matches.
    fn authenticate(&self, username: &str, password: &str) -> Option<String>;

    fn resolve_user(&self, token: &str) -> Option<String>;
}
