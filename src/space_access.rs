//! SpaceAccess - grant linking a User to a Space
//!
//! Keyed by the `(user_id, space_id)` pair, there is no surrogate id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpaceAccess {
    pub user_id: i64,
    pub space_id: i64,
    /// Whether the user administers this space
    pub admin: bool,
}

impl SpaceAccess {
    pub fn new(user_id: i64, space_id: i64, admin: bool) -> Self {
        Self { user_id, space_id, admin }
    }

    /// The composite primary key
    pub fn key(&self) -> (i64, i64) {
        (self.user_id, self.space_id)
    }
}
