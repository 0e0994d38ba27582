#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use nimbusx::server::{router, AppState};
use nimbusx::storage::DbStats;
use nimbusx::{Error, Language, Result, Space, SpaceAccess, SqliteStore, Store, User};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub store: Arc<SqliteStore>,
    pub router: Router,
}

/// Router over a fresh in-memory database
pub fn setup() -> TestApp {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let router = router(AppState::new(store.clone()));
    TestApp { store, router }
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        send(&self.router, method, uri, body).await
    }
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body)
        .unwrap_or_else(|e| panic!("unexpected body {:?}: {e}", String::from_utf8_lossy(body)))
}

pub fn error_message(body: &[u8]) -> String {
    parse::<serde_json::Value>(body)["error"]
        .as_str()
        .expect("error body must carry an \"error\" string")
        .to_string()
}

/// A store whose every operation fails, for the 500 paths
pub struct FailingStore;

impl Store for FailingStore {
    fn ensure_schema(&self) -> Result<()> {
        Err(Error::Poisoned)
    }
    fn get_user(&self, _user_id: i64) -> Result<Option<User>> {
        Err(Error::Poisoned)
    }
    fn get_user_by_email(&self, _email: &str) -> Result<Option<User>> {
        Err(Error::Poisoned)
    }
    fn list_users(&self) -> Result<Vec<User>> {
        Err(Error::Poisoned)
    }
    fn create_user(&self, _user: &User) -> Result<User> {
        Err(Error::Poisoned)
    }
    fn update_user(&self, _user: &User) -> Result<User> {
        Err(Error::Poisoned)
    }
    fn delete_user(&self, _user_id: i64) -> Result<()> {
        Err(Error::Poisoned)
    }
    fn get_space(&self, _space_id: i64) -> Result<Option<Space>> {
        Err(Error::Poisoned)
    }
    fn list_spaces(&self) -> Result<Vec<Space>> {
        Err(Error::Poisoned)
    }
    fn create_space(&self, _space: &Space) -> Result<Space> {
        Err(Error::Poisoned)
    }
    fn update_space(&self, _space: &Space) -> Result<Space> {
        Err(Error::Poisoned)
    }
    fn delete_space(&self, _space_id: i64) -> Result<()> {
        Err(Error::Poisoned)
    }
    fn get_space_access(&self, _user_id: i64, _space_id: i64) -> Result<Option<SpaceAccess>> {
        Err(Error::Poisoned)
    }
    fn list_space_accesses_for_user(&self, _user_id: i64) -> Result<Vec<SpaceAccess>> {
        Err(Error::Poisoned)
    }
    fn create_space_access(&self, _access: &SpaceAccess) -> Result<SpaceAccess> {
        Err(Error::Poisoned)
    }
    fn update_space_access(&self, _access: &SpaceAccess) -> Result<SpaceAccess> {
        Err(Error::Poisoned)
    }
    fn delete_space_access(&self, _user_id: i64, _space_id: i64) -> Result<()> {
        Err(Error::Poisoned)
    }
    fn list_languages(&self) -> Result<Vec<Language>> {
        Err(Error::Poisoned)
    }
    fn stats(&self) -> Result<DbStats> {
        Err(Error::Poisoned)
    }
}

/// A store that reads from a real database but refuses every write, for
/// failures that happen after the existence check passed
pub struct WriteFailingStore {
    pub inner: SqliteStore,
}

impl WriteFailingStore {
    /// User 1 with access to space 1, then writes start failing
    pub fn seeded() -> Self {
        let inner = SqliteStore::open_in_memory().unwrap();
        let user = inner.create_user(&User::new("Ann", "ann@example.com")).unwrap();
        let space = inner.create_space(&Space::default()).unwrap();
        inner.create_space_access(&SpaceAccess::new(user.id, space.id, false)).unwrap();
        Self { inner }
    }
}

impl Store for WriteFailingStore {
    fn ensure_schema(&self) -> Result<()> {
        self.inner.ensure_schema()
    }
    fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.inner.get_user(user_id)
    }
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.inner.get_user_by_email(email)
    }
    fn list_users(&self) -> Result<Vec<User>> {
        self.inner.list_users()
    }
    fn create_user(&self, _user: &User) -> Result<User> {
        Err(Error::Poisoned)
    }
    fn update_user(&self, _user: &User) -> Result<User> {
        Err(Error::Poisoned)
    }
    fn delete_user(&self, _user_id: i64) -> Result<()> {
        Err(Error::Poisoned)
    }
    fn get_space(&self, space_id: i64) -> Result<Option<Space>> {
        self.inner.get_space(space_id)
    }
    fn list_spaces(&self) -> Result<Vec<Space>> {
        self.inner.list_spaces()
    }
    fn create_space(&self, _space: &Space) -> Result<Space> {
        Err(Error::Poisoned)
    }
    fn update_space(&self, _space: &Space) -> Result<Space> {
        Err(Error::Poisoned)
    }
    fn delete_space(&self, _space_id: i64) -> Result<()> {
        Err(Error::Poisoned)
    }
    fn get_space_access(&self, user_id: i64, space_id: i64) -> Result<Option<SpaceAccess>> {
        self.inner.get_space_access(user_id, space_id)
    }
    fn list_space_accesses_for_user(&self, user_id: i64) -> Result<Vec<SpaceAccess>> {
        self.inner.list_space_accesses_for_user(user_id)
    }
    fn create_space_access(&self, _access: &SpaceAccess) -> Result<SpaceAccess> {
        Err(Error::Poisoned)
    }
    fn update_space_access(&self, _access: &SpaceAccess) -> Result<SpaceAccess> {
        Err(Error::Poisoned)
    }
    fn delete_space_access(&self, _user_id: i64, _space_id: i64) -> Result<()> {
        Err(Error::Poisoned)
    }
    fn list_languages(&self) -> Result<Vec<Language>> {
        self.inner.list_languages()
    }
    fn stats(&self) -> Result<DbStats> {
        self.inner.stats()
    }
}
