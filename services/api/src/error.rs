//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{error::DatabaseError, lookup::LookupError, token::TokenError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Session JWT missing or rejected
    #[error("Unauthorized")]
    Unauthorized,

    /// API token rejected
    #[error("Token rejected: {0}")]
    Token(TokenError),

    /// Anything but GET on the prompt route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request path carried no prompt id
    #[error("Prompt ID is required")]
    MissingPromptId,

    /// Resource not found
    #[error("{0}")]
    NotFound(&'static str),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Store(db) => ApiError::Database(db),
            other => ApiError::Token(other),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => ApiError::NotFound("Prompt not found"),
            LookupError::Store(db) => ApiError::Database(db),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Token(reason) => match reason {
                TokenError::MissingToken => (
                    StatusCode::UNAUTHORIZED,
                    "Missing authorization token".to_string(),
                ),
                TokenError::InvalidFormat => {
                    (StatusCode::UNAUTHORIZED, "Invalid token format".to_string())
                }
                TokenError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
                TokenError::Expired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
                TokenError::Store(e) => {
                    error!("Token lookup failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            ApiError::MissingPromptId => {
                (StatusCode::BAD_REQUEST, "Prompt ID is required".to_string())
            }
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
