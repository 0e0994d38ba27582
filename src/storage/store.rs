//! Store interface - persistence contract used by the request handlers

use crate::language::Language;
use crate::space::Space;
use crate::space_access::SpaceAccess;
use crate::user::User;
use crate::Result;

/// Persistence operations for every entity.
///
/// Lookups of a single record return `Ok(None)` when it does not exist;
/// `Err` is reserved for failures of the underlying storage. `update_*`
/// does not check that the record exists and `delete_*` of a missing key
/// succeeds, so callers must resolve existence first.
pub trait Store: Send + Sync {
    /// Create missing tables and indexes. Safe to call repeatedly.
    fn ensure_schema(&self) -> Result<()>;

    // ========== Users ==========

    fn get_user(&self, user_id: i64) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn list_users(&self) -> Result<Vec<User>>;
    /// Insert a user; any supplied id is ignored
    fn create_user(&self, user: &User) -> Result<User>;
    /// Full replace by `user.id`
    fn update_user(&self, user: &User) -> Result<User>;
    fn delete_user(&self, user_id: i64) -> Result<()>;

    // ========== Spaces ==========

    /// Space with its primary language and language set loaded
    fn get_space(&self, space_id: i64) -> Result<Option<Space>>;
    fn list_spaces(&self) -> Result<Vec<Space>>;
    fn create_space(&self, space: &Space) -> Result<Space>;
    fn update_space(&self, space: &Space) -> Result<Space>;
    fn delete_space(&self, space_id: i64) -> Result<()>;

    // ========== Space access ==========

    fn get_space_access(&self, user_id: i64, space_id: i64) -> Result<Option<SpaceAccess>>;
    fn list_space_accesses_for_user(&self, user_id: i64) -> Result<Vec<SpaceAccess>>;
    fn create_space_access(&self, access: &SpaceAccess) -> Result<SpaceAccess>;
    fn update_space_access(&self, access: &SpaceAccess) -> Result<SpaceAccess>;
    fn delete_space_access(&self, user_id: i64, space_id: i64) -> Result<()>;

    // ========== Languages & maintenance ==========

    fn list_languages(&self) -> Result<Vec<Language>>;
    fn stats(&self) -> Result<DbStats>;
}

/// Row counts per table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbStats {
    pub users: usize,
    pub spaces: usize,
    pub languages: usize,
    pub space_accesses: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Users: {}", self.users)?;
        writeln!(f, "  Spaces: {}", self.spaces)?;
        writeln!(f, "  Languages: {}", self.languages)?;
        writeln!(f, "  Space accesses: {}", self.space_accesses)
    }
}
