//! Language - locale lookup entity
//!
//! Languages are not addressed directly over HTTP. They are created and
//! linked through the Space aggregate, either as its primary language or
//! as a member of its language set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    /// 0 means "not stored yet"; the store assigns an id on insertion
    pub id: i64,
    /// Locale tag, e.g. `en-US`
    pub name: String,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: 0, name: name.into() }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Whether this language still needs an id from the store
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}
