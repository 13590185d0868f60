//! Response envelope and error mapping.
//!
//! The front-end contract wraps every response: `{"Data": ...}` on success,
//! `{"Error": "..."}` with the mapped status code on failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use voxgate_ca::CaError;

/// Success envelope.
pub struct ApiData<T>(pub T);

impl<T: Serialize> IntoResponse for ApiData<T> {
    fn into_response(self) -> Response {
        Json(json!({ "Data": self.0 })).into_response()
    }
}

/// Error side of the envelope.
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed to bind
    BadRequest(String),
    /// CA integration is disabled in configuration
    ServiceUnavailable(String),
    /// Failure from the CA client
    Ca(CaError),
}

impl From<CaError> for ApiError {
    fn from(err: CaError) -> Self {
        ApiError::Ca(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::ServiceUnavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
            ApiError::Ca(err) => {
                let status = match &err {
                    CaError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CaError::InvalidState { .. } => StatusCode::BAD_REQUEST,
                    CaError::Transport(_)
                    | CaError::Decode(_)
                    | CaError::Tls { .. }
                    | CaError::UnexpectedStatus { .. } => StatusCode::BAD_GATEWAY,
                };
                (status, err.to_string())
            }
        };

        (status, Json(json!({ "Error": message }))).into_response()
    }
}
