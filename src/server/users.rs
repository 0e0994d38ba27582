//! User endpoints
//!
//! - `POST /user`
//! - `GET /users`
//! - `GET|PUT|DELETE /user/{id}`

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use crate::server::error::{decode_body, ApiError, ERROR_EMAIL_ALREADY_IN_USE, ERROR_USER_NOT_FOUND};
use crate::server::AppState;
use crate::storage::Store;
use crate::user::User;

/// Resolve a user by id or fail the request with 404.
pub(crate) fn find_user(store: &dyn Store, user_id: i64) -> Result<User, ApiError> {
    match store.get_user(user_id)? {
        Some(user) => Ok(user),
        None => {
            tracing::warn!(user_id, "user not found");
            Err(ApiError::NotFound(ERROR_USER_NOT_FOUND))
        }
    }
}

/// Create a user unless another one already uses the email.
///
/// The lookup and the insert are separate store calls, so two concurrent
/// requests with the same email can both pass the check.
#[tracing::instrument(skip_all)]
pub async fn post_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user: User = decode_body(&body)?;

    let created = state
        .with_store(move |store| {
            if let Some(existing) = store.get_user_by_email(&user.email)? {
                tracing::warn!(existing_id = existing.id, "email already in use");
                return Err(ApiError::Conflict(ERROR_EMAIL_ALREADY_IN_USE));
            }
            Ok(store.create_user(&user)?)
        })
        .await?;
    tracing::info!(user_id = created.id, "created user");
    Ok((StatusCode::CREATED, Json(created)))
}

#[tracing::instrument(skip(state))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = state.with_store(move |store| find_user(store, id)).await?;
    Ok(Json(user))
}

/// Replace a user. The path id wins over any id in the body.
#[tracing::instrument(skip(state, body))]
pub async fn put_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let mut user: User = decode_body(&body)?;
    user.id = id;

    let updated = state
        .with_store(move |store| {
            find_user(store, id)?;
            Ok(store.update_user(&user)?)
        })
        .await?;
    Ok(Json(updated))
}

#[tracing::instrument(skip(state))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .with_store(move |store| {
            find_user(store, id)?;
            Ok(store.delete_user(id)?)
        })
        .await?;
    tracing::info!(user_id = id, "deleted user");
    Ok(StatusCode::OK)
}

#[tracing::instrument(skip_all)]
pub async fn get_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.with_store(|store| Ok(store.list_users()?)).await?;
    Ok(Json(users))
}
