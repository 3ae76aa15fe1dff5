//! Repositories for API token management

use chrono::{Duration, Utc};
use common::{
    error::DatabaseResult,
    models::{ApiToken, NewApiToken},
    store::PromptStore,
};
use rand::{Rng, distributions::Alphanumeric};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{error::ApiError, models::CreateTokenRequest};

/// Prefix carried by every issued API token
pub const TOKEN_PREFIX: &str = "pm_";

const TOKEN_RANDOM_LEN: usize = 40;
const MAX_NAME_LEN: usize = 100;
const MAX_EXPIRY_DAYS: i64 = 365;

/// Generate a fresh opaque token secret
pub fn generate_token() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LEN)
        .map(char::from)
        .collect();

    format!("{TOKEN_PREFIX}{random}")
}

/// API token repository
#[derive(Clone)]
pub struct TokenRepository {
    store: Arc<dyn PromptStore>,
}

impl TokenRepository {
    /// Create a new token repository
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self { store }
    }

    /// Issue a new token for `user_id`
    pub async fn create(
        &self,
        user_id: Uuid,
        payload: &CreateTokenRequest,
    ) -> Result<ApiToken, ApiError> {
        let name = payload.name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(ApiError::BadRequest(format!(
                "Token name must be between 1 and {MAX_NAME_LEN} characters"
            )));
        }

        let expires_at = match payload.expires_in_days {
            Some(days) if (1..=MAX_EXPIRY_DAYS).contains(&days) => {
                Some(Utc::now() + Duration::days(days))
            }
            Some(_) => {
                return Err(ApiError::BadRequest(format!(
                    "expires_in_days must be between 1 and {MAX_EXPIRY_DAYS}"
                )));
            }
            None => None,
        };

        let token = self
            .store
            .insert_token(&NewApiToken {
                user_id,
                name: name.to_string(),
                token: generate_token(),
                expires_at,
            })
            .await?;

        info!(token_id = %token.id, %user_id, "Created API token");
        Ok(token)
    }

    /// Get all tokens for a user
    pub async fn list(&self, user_id: Uuid) -> DatabaseResult<Vec<ApiToken>> {
        self.store.list_tokens(user_id).await
    }

    /// Delete a token owned by the user
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool> {
        let deleted = self.store.delete_token(user_id, id).await?;
        if deleted {
            info!(token_id = %id, %user_id, "Deleted API token");
        }
        Ok(deleted)
    }
}
