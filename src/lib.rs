//! # NimbusX - Content Management Backend
//!
//! CRUD over four related entities exposed as an HTTP/JSON API:
//! - Users, with application-level email uniqueness
//! - Spaces, each with a primary Language and a Language set
//! - Languages, owned by the Space aggregate
//! - SpaceAccess grants, keyed by the (user, space) pair
//!
//! Persistence goes through the [`Store`] trait; [`SqliteStore`] is the
//! relational implementation.

pub mod user;
pub mod language;
pub mod space;
pub mod space_access;
pub mod storage;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use user::User;
pub use language::Language;
pub use space::Space;
pub use space_access::SpaceAccess;
pub use storage::{SqliteStore, Store};

/// Result type alias for NimbusX operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for NimbusX operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store connection poisoned by a panicking writer")]
    Poisoned,
}
