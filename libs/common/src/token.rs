//! API token validation
//!
//! Tokens are opaque bearer strings looked up verbatim in the token table.
//! Validation itself is read-only; recording use is a separate call so each
//! entry point can decide whether to await it.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{error::DatabaseError, models::ApiToken, store::PromptStore};

/// Reasons a bearer credential can be rejected
#[derive(Error, Debug)]
pub enum TokenError {
    /// No header, or an empty token
    #[error("missing token")]
    MissingToken,

    /// Header present but not of the form `Bearer <token>`
    #[error("malformed authorization header")]
    InvalidFormat,

    /// No token row matches
    #[error("unknown token")]
    InvalidToken,

    /// Token row exists but `expires_at` has passed
    #[error("token expired")]
    Expired,

    /// The token store could not be queried
    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Extract the token from an `Authorization` header value
pub fn parse_bearer(header: Option<&str>) -> Result<&str, TokenError> {
    let header = header.ok_or(TokenError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(TokenError::InvalidFormat)?
        .trim();

    if token.is_empty() {
        return Err(TokenError::InvalidFormat);
    }

    Ok(token)
}

/// Resolve a raw token to its row
///
/// `raw` may already be stripped of the `Bearer ` prefix. Expiry is
/// compared against `now`.
pub async fn validate_token(
    store: &dyn PromptStore,
    raw: &str,
    now: DateTime<Utc>,
) -> Result<ApiToken, TokenError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TokenError::MissingToken);
    }

    let token = store.find_token(raw).await.map_err(|e| match e {
        DatabaseError::NotFound => TokenError::InvalidToken,
        other => TokenError::Store(other),
    })?;

    if token.is_expired_at(now) {
        debug!(token_id = %token.id, "Rejected expired API token");
        return Err(TokenError::Expired);
    }

    Ok(token)
}

/// Record that a token was used at `now`
pub async fn record_token_use(
    store: &dyn PromptStore,
    token_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    store.touch_token(token_id, now).await
}
