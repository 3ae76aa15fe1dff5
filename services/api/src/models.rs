//! API models for request and response payloads

use chrono::{DateTime, Utc};
use common::models::ApiToken;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for API token creation
#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    pub name: String,
    pub expires_in_days: Option<i64>,
}

/// Response for API token creation; the only place the secret is returned
#[derive(Debug, Serialize)]
pub struct CreatedTokenResponse {
    pub id: Uuid,
    pub name: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ApiToken> for CreatedTokenResponse {
    fn from(token: ApiToken) -> Self {
        Self {
            id: token.id,
            name: token.name,
            token: token.token,
            created_at: token.created_at,
            expires_at: token.expires_at,
        }
    }
}

/// Response for token listing
#[derive(Debug, Serialize)]
pub struct TokenSummary {
    pub id: Uuid,
    pub name: String,
    /// First characters of the secret, for recognition only
    pub token_preview: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ApiToken> for TokenSummary {
    fn from(token: ApiToken) -> Self {
        let token_preview = format!("{}…", token.token.chars().take(7).collect::<String>());

        Self {
            id: token.id,
            name: token.name,
            token_preview,
            created_at: token.created_at,
            last_used_at: token.last_used_at,
            expires_at: token.expires_at,
        }
    }
}
