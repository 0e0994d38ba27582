//! Login, password-token and webhook endpoints.
//!
//! Routed so clients get a definite answer, but nothing behind them exists
//! yet: every request is answered with `501 Not Implemented`.

use crate::server::error::ApiError;

pub async fn not_implemented() -> ApiError {
    ApiError::NotImplemented
}
