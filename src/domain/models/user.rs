use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,
    pub token: String,
}

impl UserRecord {
    pub fn new(password: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            token: token.into(),
        }
    }
}

/// Fixed set of users known to the gateway, keyed by username.
///
/// Loaded from a JSON file of the form
/// `{"alice": {"password": "...", "token": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserTable {
    users: HashMap<String, UserRecord>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single demo account used when no users file is configured.
    pub fn demo() -> Self {
        Self::new().with_user("ayan", UserRecord::new("ayan123", "ayan-123"))
    }

    pub fn with_user(mut self, username: impl Into<String>, record: UserRecord) -> Self {
        self.users.insert(username.into(), record);
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::invalid_input(format!("Invalid users table: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &UserRecord)> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_users_file_shape() {
        let table = UserTable::from_json(
            r#"{"bob": {"password": "pw", "token": "bob-token"}}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("bob").unwrap().token, "bob-token");
    }

    #[test]
    fn rejects_malformed_table() {
        assert!(UserTable::from_json(r#"["bob"]"#).is_err());
    }
}
