//! HTTP error taxonomy
//!
//! Client errors carry a `{"error": "<message>"}` body. Storage failures
//! are logged here and answered with a bare 500 so nothing about the
//! store leaks to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const ERROR_EMAIL_ALREADY_IN_USE: &str = "User with this email already exists";
pub const ERROR_USER_NOT_FOUND: &str = "User not found, by the given id";
pub const ERROR_SPACE_NOT_FOUND: &str = "Space not found, by the given id";
pub const ERROR_SPACE_ACCESS_NOT_FOUND: &str = "SpaceAccess not found, by the given id's";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body could not be decoded; carries the decoder's message verbatim
    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    NotFound(&'static str),

    /// Uniqueness violation detected by a handler (answered with 400)
    #[error("{0}")]
    Conflict(&'static str),

    #[error("storage failure: {0}")]
    Storage(#[from] crate::Error),

    /// Blocking store work panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("not implemented")]
    NotImplemented,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidBody(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message.to_string() })).into_response()
            }
            ApiError::Conflict(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message.to_string() })).into_response()
            }
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::Task(err) => {
                tracing::error!(error = %err, "store task failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::NotImplemented => StatusCode::NOT_IMPLEMENTED.into_response(),
        }
    }
}

/// Decode a JSON request body into `T`.
///
/// The body must be a JSON object. Missing fields take their defaults;
/// malformed JSON, other top-level values, wrong types and an empty body
/// all become [`ApiError::InvalidBody`].
pub fn decode_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(reject_body)?;
    if !value.is_object() {
        return Err(reject_body(serde::de::Error::invalid_type(
            unexpected(&value),
            &"a JSON object",
        )));
    }
    serde_json::from_value(value).map_err(reject_body)
}

fn reject_body(e: serde_json::Error) -> ApiError {
    tracing::debug!(error = %e, "rejecting undecodable request body");
    ApiError::InvalidBody(e.to_string())
}

fn unexpected(value: &serde_json::Value) -> serde::de::Unexpected<'_> {
    use serde::de::Unexpected;
    use serde_json::Value;

    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
