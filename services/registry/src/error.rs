//! Custom error types for the registry service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Custom error type for the registry service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Access gate rejected the request
    #[error("Unauthorized")]
    Unauthorized,

    /// No user with the requested id
    #[error("User not found")]
    NotFound,

    /// Malformed request body
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Payload parsed but one or more fields were rejected
    #[error("Invalid user data: {0}")]
    Validation(ValidationErrors),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "User not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Validation(errors) => {
                let body = Json(json!({
                    "error": "Invalid user data",
                    "fields": errors,
                }));

                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
