//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - users(id, name, email, instance_admin, origin)
//! - languages(id, name)
//! - spaces(id, name, color1..color4, image_url, primary_language_id)
//! - space_languages(space_id, language_id)
//! - space_access(user_id, space_id, admin)

pub mod schema;
pub mod sqlite;
pub mod store;

pub use sqlite::SqliteStore;
pub use store::{DbStats, Store};
