//! API error handling.

use axum::Json;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<deploytrack_core::Error> for ApiError {
    fn from(err: deploytrack_core::Error) -> Self {
        match err {
            deploytrack_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            deploytrack_core::Error::InvalidPayload(msg) => ApiError::BadRequest(msg),
        }
    }
}

/// Decode a JSON object request body regardless of its declared content type.
pub fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(ApiError::BadRequest(
            "Invalid JSON: expected an object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e)))
}
