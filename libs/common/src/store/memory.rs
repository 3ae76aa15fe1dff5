//! In-process store with the same query semantics as [`PgStore`]
//!
//! Used by the service test suites so routers can be exercised without a
//! database.
//!
//! [`PgStore`]: super::PgStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PromptQuery, PromptStore};
use crate::{
    error::{DatabaseError, DatabaseResult},
    models::{ApiToken, NewApiToken, Prompt},
};

#[derive(Default)]
struct Tables {
    tokens: Vec<ApiToken>,
    prompts: Vec<Prompt>,
}

/// Store holding rows in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a prompt row
    pub async fn put_prompt(&self, prompt: Prompt) {
        self.tables.write().await.prompts.push(prompt);
    }

    /// Seed a token row as-is
    pub async fn put_token(&self, token: ApiToken) {
        self.tables.write().await.tokens.push(token);
    }

    /// Read a token row back by id
    pub async fn token_by_id(&self, id: Uuid) -> Option<ApiToken> {
        self.tables
            .read()
            .await
            .tokens
            .iter()
            .find(|token| token.id == id)
            .cloned()
    }
}

#[async_trait]
impl PromptStore for MemoryStore {
    async fn find_token(&self, token: &str) -> DatabaseResult<ApiToken> {
        self.tables
            .read()
            .await
            .tokens
            .iter()
            .find(|row| row.token == token)
            .cloned()
            .ok_or(DatabaseError::NotFound)
    }

    async fn touch_token(&self, id: Uuid, at: DateTime<Utc>) -> DatabaseResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.tokens.iter_mut().find(|row| row.id == id) {
            row.last_used_at = Some(at);
        }
        Ok(())
    }

    async fn insert_token(&self, new_token: &NewApiToken) -> DatabaseResult<ApiToken> {
        let mut tables = self.tables.write().await;

        if tables.tokens.iter().any(|row| row.token == new_token.token) {
            return Err(DatabaseError::Conflict(
                "api_tokens.token already exists".to_string(),
            ));
        }

        let row = ApiToken {
            id: Uuid::new_v4(),
            user_id: new_token.user_id,
            name: new_token.name.clone(),
            token: new_token.token.clone(),
            created_at: Utc::now(),
            last_used_at: None,
            expires_at: new_token.expires_at,
        };
        tables.tokens.push(row.clone());

        Ok(row)
    }

    async fn list_tokens(&self, user_id: Uuid) -> DatabaseResult<Vec<ApiToken>> {
        let mut tokens: Vec<ApiToken> = self
            .tables
            .read()
            .await
            .tokens
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(tokens)
    }

    async fn delete_token(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.tokens.len();
        tables
            .tokens
            .retain(|row| !(row.id == id && row.user_id == user_id));

        Ok(tables.tokens.len() < before)
    }

    async fn find_prompt(&self, query: &PromptQuery) -> DatabaseResult<Prompt> {
        let tables = self.tables.read().await;
        let mut candidates = tables.prompts.iter().filter(|row| {
            row.id == query.id && query.owner.is_none_or(|owner| row.user_id == owner)
        });

        let found = match &query.version {
            Some(version) => candidates.find(|row| &row.version == version),
            None => candidates.max_by(|a, b| a.version.cmp(&b.version)),
        };

        found.cloned().ok_or(DatabaseError::NotFound)
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        Ok(true)
    }
}
