//! PostgreSQL-backed store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{PromptQuery, PromptStore};
use crate::{
    database,
    error::{DatabaseError, DatabaseResult},
    models::{ApiToken, NewApiToken, Prompt},
};

const TOKEN_COLUMNS: &str = "id, user_id, name, token, created_at, last_used_at, expires_at";

const PROMPT_COLUMNS: &str = "id, user_id, title, description, content, system_prompt, \
    user_prompt, version, token_count, system_tokens, user_tokens, performance, model, \
    temperature, max_tokens, is_favorite, category_id, created_at, updated_at";

/// Store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PromptStore for PgStore {
    async fn find_token(&self, token: &str) -> DatabaseResult<ApiToken> {
        sqlx::query_as::<_, ApiToken>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM api_tokens WHERE token = $1"
        ))
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn touch_token(&self, id: Uuid, at: DateTime<Utc>) -> DatabaseResult<()> {
        sqlx::query("UPDATE api_tokens SET last_used_at = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }

    async fn insert_token(&self, new_token: &NewApiToken) -> DatabaseResult<ApiToken> {
        sqlx::query_as::<_, ApiToken>(&format!(
            r#"
            INSERT INTO api_tokens (user_id, name, token, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {TOKEN_COLUMNS}
            "#
        ))
        .bind(new_token.user_id)
        .bind(&new_token.name)
        .bind(&new_token.token)
        .bind(new_token.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn list_tokens(&self, user_id: Uuid) -> DatabaseResult<Vec<ApiToken>> {
        sqlx::query_as::<_, ApiToken>(&format!(
            r#"
            SELECT {TOKEN_COLUMNS}
            FROM api_tokens
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete_token(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM api_tokens WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_prompt(&self, query: &PromptQuery) -> DatabaseResult<Prompt> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = "));
        builder.push_bind(query.id);

        if let Some(owner) = query.owner {
            builder.push(" AND user_id = ").push_bind(owner);
        }

        match &query.version {
            Some(version) => {
                builder.push(" AND version = ").push_bind(version.clone());
            }
            // Byte-wise collation keeps the ordering a plain string sort
            None => {
                builder.push(r#" ORDER BY version COLLATE "C" DESC"#);
            }
        }

        builder.push(" LIMIT 1");

        builder
            .build_query_as::<Prompt>()
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        database::health_check(&self.pool).await
    }
}
