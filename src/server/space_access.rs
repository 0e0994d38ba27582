//! Space access endpoints
//!
//! - `GET /users/{id}/spaces` lists the grants of a user
//! - `PATCH /user/{id}/space` creates or updates one grant
//! - `DELETE /user/{id}/space/{space_id}` revokes one grant

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use crate::server::error::{decode_body, ApiError, ERROR_SPACE_ACCESS_NOT_FOUND};
use crate::server::users::find_user;
use crate::server::AppState;
use crate::space_access::SpaceAccess;
use crate::storage::Store;

/// Resolve a grant by its (user, space) key or fail the request with 404.
pub(crate) fn find_space_access(
    store: &dyn Store,
    user_id: i64,
    space_id: i64,
) -> Result<SpaceAccess, ApiError> {
    match store.get_space_access(user_id, space_id)? {
        Some(access) => Ok(access),
        None => {
            tracing::warn!(user_id, space_id, "space access not found");
            Err(ApiError::NotFound(ERROR_SPACE_ACCESS_NOT_FOUND))
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_user_spaces(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SpaceAccess>>, ApiError> {
    let accesses = state
        .with_store(move |store| {
            find_user(store, id)?;
            Ok(store.list_space_accesses_for_user(id)?)
        })
        .await?;
    Ok(Json(accesses))
}

/// Upsert the grant for `(id, body.spaceId)`.
///
/// The user id always comes from the path. Whether to create or update is
/// decided by a lookup, not by the database, so the sequence is not atomic.
#[tracing::instrument(skip(state, body))]
pub async fn patch_user_space(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<SpaceAccess>, ApiError> {
    let mut access: SpaceAccess = decode_body(&body)?;
    access.user_id = id;

    let stored = state
        .with_store(move |store| {
            find_user(store, id)?;

            let (user_id, space_id) = access.key();
            let stored = match store.get_space_access(user_id, space_id)? {
                None => {
                    tracing::info!(user_id, space_id, "granting space access");
                    store.create_space_access(&access)?
                }
                Some(_) => {
                    tracing::info!(user_id, space_id, admin = access.admin, "updating space access");
                    store.update_space_access(&access)?
                }
            };
            Ok(stored)
        })
        .await?;
    Ok(Json(stored))
}

/// Revoke a grant and answer with the record as it was before deletion.
#[tracing::instrument(skip(state))]
pub async fn delete_user_space(
    State(state): State<Arc<AppState>>,
    Path((id, space_id)): Path<(i64, i64)>,
) -> Result<Json<SpaceAccess>, ApiError> {
    let access = state
        .with_store(move |store| {
            let access = find_space_access(store, id, space_id)?;
            store.delete_space_access(id, space_id)?;
            Ok(access)
        })
        .await?;
    Ok(Json(access))
}
