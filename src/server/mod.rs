use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::storage::Store;

pub mod error;
pub mod space_access;
pub mod spaces;
pub mod stubs;
pub mod users;

pub use error::{ApiError, ErrorResponse};

/// Server state
///
/// The store handle is injected by the caller, so tests can hand every
/// router its own in-memory database.
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Arc<Self> {
        Arc::new(Self { store })
    }

    /// Run store work on the blocking pool.
    ///
    /// SQLite calls block while holding the connection mutex, so they stay
    /// off the async workers. The caller's span is re-entered on the pool
    /// thread so handler logs keep their request context.
    pub(crate) async fn with_store<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn Store) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            work(store.as_ref())
        })
        .await?
    }
}

/// Build the API router over the given state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/user", post(users::post_user))
        .route(
            "/user/{id}",
            get(users::get_user).put(users::put_user).delete(users::delete_user),
        )
        .route("/users", get(users::get_users))
        .route("/users/{id}/spaces", get(space_access::get_user_spaces))
        .route("/user/{id}/space", patch(space_access::patch_user_space))
        .route(
            "/user/{id}/space/{space_id}",
            axum::routing::delete(space_access::delete_user_space),
        )
        .route("/spaces", get(spaces::get_spaces).post(spaces::post_space))
        .route(
            "/spaces/{id}",
            get(spaces::get_space).put(spaces::put_space).delete(spaces::delete_space),
        )
        .route("/login", get(stubs::not_implemented).post(stubs::not_implemented))
        .route("/password/{token}", post(stubs::not_implemented))
        .route("/webhooks", get(stubs::not_implemented).post(stubs::not_implemented))
        .route("/webhooks/{name}", put(stubs::not_implemented))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, store: Arc<dyn Store>) -> anyhow::Result<()> {
    store.ensure_schema()?;
    let app = router(AppState::new(store));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
