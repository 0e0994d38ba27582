//! Space - workspace / content container
//!
//! A Space is an aggregate: its scalar display metadata lives in the
//! `spaces` table, the primary language is a foreign key into `languages`
//! and the language set goes through the `space_languages` join table.
//! Reads from the store always return the aggregate fully populated.

use crate::language::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Space {
    /// Store-generated id (0 before insertion)
    pub id: i64,
    pub name: String,
    pub color1: String,
    pub color2: String,
    pub color3: String,
    pub color4: String,
    pub image_url: String,
    /// Foreign key of the primary language, `None` when unset
    pub primary_language_id: Option<i64>,
    /// The primary language record, loaded eagerly on reads
    pub primary_language: Option<Language>,
    /// Associated languages (many-to-many)
    pub languages: Vec<Language>,
}

impl Space {
    /// Create a new space for insertion (id will be set by DB)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_colors(mut self, colors: [&str; 4]) -> Self {
        let [c1, c2, c3, c4] = colors.map(str::to_string);
        self.color1 = c1;
        self.color2 = c2;
        self.color3 = c3;
        self.color4 = c4;
        self
    }

    pub fn with_primary_language(mut self, language: Language) -> Self {
        if !language.is_new() {
            self.primary_language_id = Some(language.id);
        }
        self.primary_language = Some(language);
        self
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }
}
