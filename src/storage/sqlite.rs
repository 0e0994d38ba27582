//! SQLite storage implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use rusqlite::{Connection, OptionalExtension, params};
use crate::{Error, Result};
use crate::language::Language;
use crate::space::Space;
use crate::space_access::SpaceAccess;
use crate::user::User;
use super::schema;
use super::store::{DbStats, Store};

const USER_SELECT_SQL: &str = "SELECT id, name, email, instance_admin, origin FROM users";

const SPACE_SELECT_SQL: &str = "SELECT
    id,
    name,
    color1,
    color2,
    color3,
    color4,
    image_url,
    primary_language_id
FROM spaces";

/// SQLite-backed store for users, spaces, languages and space access.
///
/// One connection shared behind a mutex; every call holds the lock for
/// the duration of its statements.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.ensure_schema()?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.ensure_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::Poisoned)
    }

    fn count(conn: &Connection, table: &str) -> Result<usize> {
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl Store for SqliteStore {
    fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== User Operations ==========

    fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(&format!("{USER_SELECT_SQL} WHERE id = ?1"), [user_id], row_to_user)
            .optional()
            .map_err(Into::into)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("{USER_SELECT_SQL} WHERE email = ?1 ORDER BY id LIMIT 1"),
            [email],
            row_to_user,
        )
        .optional()
        .map_err(Into::into)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} ORDER BY id"))?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    fn create_user(&self, user: &User) -> Result<User> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (name, email, instance_admin, origin) VALUES (?1, ?2, ?3, ?4)",
            params![user.name, user.email, user.instance_admin, user.origin],
        )?;
        Ok(User {
            id: conn.last_insert_rowid(),
            ..user.clone()
        })
    }

    fn update_user(&self, user: &User) -> Result<User> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO users (id, name, email, instance_admin, origin)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                instance_admin = excluded.instance_admin,
                origin = excluded.origin
            "#,
            params![user.id, user.name, user.email, user.instance_admin, user.origin],
        )?;
        Ok(user.clone())
    }

    fn delete_user(&self, user_id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM users WHERE id = ?1", [user_id])?;
        Ok(())
    }

    // ========== Space Operations ==========

    fn get_space(&self, space_id: i64) -> Result<Option<Space>> {
        let conn = self.conn()?;
        Ok(load_space(&conn, space_id)?)
    }

    fn list_spaces(&self) -> Result<Vec<Space>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{SPACE_SELECT_SQL} ORDER BY id"))?;
        let mut spaces = stmt
            .query_map([], row_to_space)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for space in &mut spaces {
            load_space_languages(&conn, space)?;
        }
        Ok(spaces)
    }

    fn create_space(&self, space: &Space) -> Result<Space> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let primary_language_id = resolve_primary_language(&tx, space)?;
        tx.execute(
            r#"
            INSERT INTO spaces (name, color1, color2, color3, color4, image_url, primary_language_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                space.name,
                space.color1,
                space.color2,
                space.color3,
                space.color4,
                space.image_url,
                primary_language_id,
            ],
        )?;
        let space_id = tx.last_insert_rowid();
        link_languages(&tx, space_id, &space.languages)?;

        let stored = load_space(&tx, space_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(stored)
    }

    fn update_space(&self, space: &Space) -> Result<Space> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let primary_language_id = resolve_primary_language(&tx, space)?;
        tx.execute(
            r#"
            INSERT INTO spaces (id, name, color1, color2, color3, color4, image_url, primary_language_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                color1 = excluded.color1,
                color2 = excluded.color2,
                color3 = excluded.color3,
                color4 = excluded.color4,
                image_url = excluded.image_url,
                primary_language_id = excluded.primary_language_id
            "#,
            params![
                space.id,
                space.name,
                space.color1,
                space.color2,
                space.color3,
                space.color4,
                space.image_url,
                primary_language_id,
            ],
        )?;
        tx.execute("DELETE FROM space_languages WHERE space_id = ?1", [space.id])?;
        link_languages(&tx, space.id, &space.languages)?;

        let stored = load_space(&tx, space.id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(stored)
    }

    fn delete_space(&self, space_id: i64) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM space_languages WHERE space_id = ?1", [space_id])?;
        tx.execute("DELETE FROM spaces WHERE id = ?1", [space_id])?;
        tx.commit()?;
        Ok(())
    }

    // ========== Space Access Operations ==========

    fn get_space_access(&self, user_id: i64, space_id: i64) -> Result<Option<SpaceAccess>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT user_id, space_id, admin FROM space_access WHERE user_id = ?1 AND space_id = ?2",
            [user_id, space_id],
            row_to_space_access,
        )
        .optional()
        .map_err(Into::into)
    }

    fn list_space_accesses_for_user(&self, user_id: i64) -> Result<Vec<SpaceAccess>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, space_id, admin FROM space_access WHERE user_id = ?1 ORDER BY space_id",
        )?;
        let accesses = stmt
            .query_map([user_id], row_to_space_access)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(accesses)
    }

    fn create_space_access(&self, access: &SpaceAccess) -> Result<SpaceAccess> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO space_access (user_id, space_id, admin) VALUES (?1, ?2, ?3)",
            params![access.user_id, access.space_id, access.admin],
        )?;
        Ok(*access)
    }

    fn update_space_access(&self, access: &SpaceAccess) -> Result<SpaceAccess> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO space_access (user_id, space_id, admin) VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, space_id) DO UPDATE SET admin = excluded.admin
            "#,
            params![access.user_id, access.space_id, access.admin],
        )?;
        Ok(*access)
    }

    fn delete_space_access(&self, user_id: i64, space_id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM space_access WHERE user_id = ?1 AND space_id = ?2",
            [user_id, space_id],
        )?;
        Ok(())
    }

    // ========== Languages & Maintenance ==========

    fn list_languages(&self) -> Result<Vec<Language>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM languages ORDER BY id")?;
        let languages = stmt
            .query_map([], row_to_language)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(languages)
    }

    fn stats(&self) -> Result<DbStats> {
        let conn = self.conn()?;
        Ok(DbStats {
            users: Self::count(&conn, "users")?,
            spaces: Self::count(&conn, "spaces")?,
            languages: Self::count(&conn, "languages")?,
            space_accesses: Self::count(&conn, "space_access")?,
        })
    }
}

// ========== Row Mapping ==========

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        instance_admin: row.get(3)?,
        origin: row.get(4)?,
    })
}

fn row_to_language(row: &rusqlite::Row) -> rusqlite::Result<Language> {
    Ok(Language {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Scalar columns only; languages are filled by `load_space_languages`
fn row_to_space(row: &rusqlite::Row) -> rusqlite::Result<Space> {
    Ok(Space {
        id: row.get(0)?,
        name: row.get(1)?,
        color1: row.get(2)?,
        color2: row.get(3)?,
        color3: row.get(4)?,
        color4: row.get(5)?,
        image_url: row.get(6)?,
        primary_language_id: row.get(7)?,
        primary_language: None,
        languages: Vec::new(),
    })
}

fn row_to_space_access(row: &rusqlite::Row) -> rusqlite::Result<SpaceAccess> {
    Ok(SpaceAccess {
        user_id: row.get(0)?,
        space_id: row.get(1)?,
        admin: row.get(2)?,
    })
}

// ========== Space Aggregate Helpers ==========

fn load_space(conn: &Connection, space_id: i64) -> rusqlite::Result<Option<Space>> {
    let space = conn
        .query_row(&format!("{SPACE_SELECT_SQL} WHERE id = ?1"), [space_id], row_to_space)
        .optional()?;

    match space {
        Some(mut space) => {
            load_space_languages(conn, &mut space)?;
            Ok(Some(space))
        }
        None => Ok(None),
    }
}

/// Eager-load the primary language and the language set
fn load_space_languages(conn: &Connection, space: &mut Space) -> rusqlite::Result<()> {
    space.primary_language = match space.primary_language_id {
        Some(language_id) => conn
            .query_row(
                "SELECT id, name FROM languages WHERE id = ?1",
                [language_id],
                row_to_language,
            )
            .optional()?,
        None => None,
    };

    let mut stmt = conn.prepare(
        r#"
        SELECT l.id, l.name
        FROM languages l
        JOIN space_languages sl ON sl.language_id = l.id
        WHERE sl.space_id = ?1
        ORDER BY l.id
        "#,
    )?;
    space.languages = stmt
        .query_map([space.id], row_to_language)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(())
}

/// Insert a language when new, or make sure a referenced id exists.
/// An existing row with the same id is left untouched.
fn upsert_language(conn: &Connection, language: &Language) -> rusqlite::Result<i64> {
    if language.is_new() {
        conn.execute("INSERT INTO languages (name) VALUES (?1)", [&language.name])?;
        Ok(conn.last_insert_rowid())
    } else {
        conn.execute(
            "INSERT INTO languages (id, name) VALUES (?1, ?2) ON CONFLICT(id) DO NOTHING",
            params![language.id, language.name],
        )?;
        Ok(language.id)
    }
}

/// The embedded `primary_language` object wins over `primary_language_id`.
/// An all-default object counts as absent.
fn resolve_primary_language(conn: &Connection, space: &Space) -> rusqlite::Result<Option<i64>> {
    match &space.primary_language {
        Some(language) if *language != Language::default() => upsert_language(conn, language).map(Some),
        _ => Ok(space.primary_language_id),
    }
}

fn link_languages(conn: &Connection, space_id: i64, languages: &[Language]) -> rusqlite::Result<()> {
    for language in languages {
        let language_id = upsert_language(conn, language)?;
        conn.execute(
            "INSERT OR IGNORE INTO space_languages (space_id, language_id) VALUES (?1, ?2)",
            params![space_id, language_id],
        )?;
    }
    Ok(())
}
