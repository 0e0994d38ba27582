//! Database schema definitions
//!
//! Every statement is `IF NOT EXISTS`, so applying the schema to an
//! existing database is a no-op.

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    instance_admin INTEGER NOT NULL DEFAULT 0,
    origin INTEGER NOT NULL DEFAULT 0
)
"#;

/// SQL to create the languages table
pub const CREATE_LANGUAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS languages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT ''
)
"#;

/// SQL to create the spaces table
pub const CREATE_SPACES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS spaces (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL DEFAULT '',
    color1 TEXT NOT NULL DEFAULT '',
    color2 TEXT NOT NULL DEFAULT '',
    color3 TEXT NOT NULL DEFAULT '',
    color4 TEXT NOT NULL DEFAULT '',
    image_url TEXT NOT NULL DEFAULT '',
    primary_language_id INTEGER REFERENCES languages(id)
)
"#;

/// SQL to create the space_languages join table
pub const CREATE_SPACE_LANGUAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS space_languages (
    space_id INTEGER NOT NULL REFERENCES spaces(id),
    language_id INTEGER NOT NULL REFERENCES languages(id),
    PRIMARY KEY (space_id, language_id)
)
"#;

/// SQL to create the space_access table
/// Keyed by the (user, space) pair only; no surrogate id
pub const CREATE_SPACE_ACCESS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS space_access (
    user_id INTEGER NOT NULL,
    space_id INTEGER NOT NULL,
    admin INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (user_id, space_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
    "CREATE INDEX IF NOT EXISTS idx_space_languages_language ON space_languages(language_id)",
    "CREATE INDEX IF NOT EXISTS idx_space_access_space ON space_access(space_id)",
];

/// Tables in creation order, used for stats and tests
pub const TABLES: &[&str] = &["users", "languages", "spaces", "space_languages", "space_access"];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_USERS_TABLE,
        CREATE_LANGUAGES_TABLE,
        CREATE_SPACES_TABLE,
        CREATE_SPACE_LANGUAGES_TABLE,
        CREATE_SPACE_ACCESS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
