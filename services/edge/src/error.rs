//! Error vocabulary of the edge service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{lookup::LookupError, token::TokenError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the edge service
#[derive(Error, Debug)]
pub enum EdgeError {
    /// Anything but GET on the lookup route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request path carried no prompt id
    #[error("Prompt ID is required")]
    MissingPromptId,

    /// Bearer credential rejected
    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    /// No prompt matched
    #[error("Prompt not found")]
    NotFound,

    /// Data store failure
    #[error("Lookup failed: {0}")]
    Lookup(#[source] LookupError),
}

impl From<LookupError> for EdgeError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound => EdgeError::NotFound,
            other => EdgeError::Lookup(other),
        }
    }
}

impl EdgeError {
    fn status_and_reason(&self) -> (StatusCode, &'static str) {
        match self {
            EdgeError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            EdgeError::MissingPromptId => (StatusCode::BAD_REQUEST, "Prompt ID is required"),
            EdgeError::Token(token_error) => match token_error {
                TokenError::MissingToken => {
                    (StatusCode::UNAUTHORIZED, "Authorization header is required")
                }
                TokenError::InvalidFormat => {
                    (StatusCode::UNAUTHORIZED, "Invalid authorization header format")
                }
                TokenError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid API token"),
                TokenError::Expired => (StatusCode::UNAUTHORIZED, "API token has expired"),
                TokenError::Store(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            EdgeError::NotFound => (StatusCode::NOT_FOUND, "Prompt not found"),
            EdgeError::Lookup(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        let (status, reason) = self.status_and_reason();

        if status.is_server_error() {
            error!("Edge request failed: {}", self);
        }

        let body = Json(json!({
            "error": reason,
        }));

        (status, body).into_response()
    }
}

/// Type alias for edge results
pub type EdgeResult<T> = Result<T, EdgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::DatabaseError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EdgeError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (EdgeError::MissingPromptId, StatusCode::BAD_REQUEST),
            (EdgeError::Token(TokenError::MissingToken), StatusCode::UNAUTHORIZED),
            (EdgeError::Token(TokenError::InvalidFormat), StatusCode::UNAUTHORIZED),
            (EdgeError::Token(TokenError::InvalidToken), StatusCode::UNAUTHORIZED),
            (EdgeError::Token(TokenError::Expired), StatusCode::UNAUTHORIZED),
            (
                EdgeError::Token(TokenError::Store(DatabaseError::Migration("x".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (EdgeError::from(LookupError::NotFound), StatusCode::NOT_FOUND),
            (
                EdgeError::from(LookupError::Store(DatabaseError::Migration("x".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_and_reason().0, status, "{err}");
        }
    }
}
