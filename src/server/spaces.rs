//! Space endpoints
//!
//! - `POST /spaces`, `GET /spaces`
//! - `GET|PUT|DELETE /spaces/{id}`
//!
//! Bodies and responses carry the whole aggregate, including the primary
//! language and the language set.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use crate::server::error::{decode_body, ApiError, ERROR_SPACE_NOT_FOUND};
use crate::server::AppState;
use crate::space::Space;
use crate::storage::Store;

/// Resolve a space by id or fail the request with 404.
pub(crate) fn find_space(store: &dyn Store, space_id: i64) -> Result<Space, ApiError> {
    match store.get_space(space_id)? {
        Some(space) => Ok(space),
        None => {
            tracing::warn!(space_id, "space not found");
            Err(ApiError::NotFound(ERROR_SPACE_NOT_FOUND))
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn post_space(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Space>), ApiError> {
    let space: Space = decode_body(&body)?;

    let created = state
        .with_store(move |store| Ok(store.create_space(&space)?))
        .await?;
    tracing::info!(space_id = created.id, languages = created.languages.len(), "created space");
    Ok((StatusCode::CREATED, Json(created)))
}

#[tracing::instrument(skip(state))]
pub async fn get_space(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Space>, ApiError> {
    let space = state.with_store(move |store| find_space(store, id)).await?;
    Ok(Json(space))
}

#[tracing::instrument(skip(state, body))]
pub async fn put_space(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Space>, ApiError> {
    let mut space: Space = decode_body(&body)?;
    space.id = id;

    let updated = state
        .with_store(move |store| {
            find_space(store, id)?;
            Ok(store.update_space(&space)?)
        })
        .await?;
    Ok(Json(updated))
}

#[tracing::instrument(skip(state))]
pub async fn delete_space(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_store(move |store| {
            find_space(store, id)?;
            Ok(store.delete_space(id)?)
        })
        .await?;
    tracing::info!(space_id = id, "deleted space");
    Ok(StatusCode::OK)
}

#[tracing::instrument(skip_all)]
pub async fn get_spaces(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Space>>, ApiError> {
    let spaces = state.with_store(|store| Ok(store.list_spaces()?)).await?;
    Ok(Json(spaces))
}
