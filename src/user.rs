//! User - identity record

use serde::{Deserialize, Serialize};

/// A user account.
///
/// Email is meant to be unique across users. That is checked by the
/// request handlers before creation; the store does not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Store-generated id (0 before insertion)
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Administrator of the whole instance, not a single space
    pub instance_admin: bool,
    pub origin: bool,
}

impl User {
    /// Create a new user for insertion (id will be set by DB)
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}
