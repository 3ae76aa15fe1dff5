//! Data-store client seam
//!
//! Handlers never talk to a database directly. They receive an
//! `Arc<dyn PromptStore>` through their state, which is a [`PgStore`] in
//! production and a [`MemoryStore`] in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::DatabaseResult,
    models::{ApiToken, NewApiToken, Prompt},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Filter for resolving a single prompt row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptQuery {
    /// Durable prompt identity
    pub id: Uuid,
    /// Exact version to match; `None` resolves the greatest version string
    pub version: Option<String>,
    /// Restrict to prompts owned by this user
    pub owner: Option<Uuid>,
}

impl PromptQuery {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: None,
            owner: None,
        }
    }

    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn owned_by(mut self, owner: Uuid) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Operations the prompt API needs from the hosted data store
///
/// Single-row fetches return [`DatabaseError::NotFound`] on an empty result
/// so callers can tell absence apart from store failures.
///
/// [`DatabaseError::NotFound`]: crate::error::DatabaseError::NotFound
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Fetch the token row whose secret equals `token`
    async fn find_token(&self, token: &str) -> DatabaseResult<ApiToken>;

    /// Set `last_used_at` on a token
    async fn touch_token(&self, id: Uuid, at: DateTime<Utc>) -> DatabaseResult<()>;

    /// Insert a new token and return the stored row
    async fn insert_token(&self, new_token: &NewApiToken) -> DatabaseResult<ApiToken>;

    /// List a user's tokens, newest first
    async fn list_tokens(&self, user_id: Uuid) -> DatabaseResult<Vec<ApiToken>>;

    /// Delete a token owned by `user_id`; returns whether a row was removed
    async fn delete_token(&self, user_id: Uuid, id: Uuid) -> DatabaseResult<bool>;

    /// Resolve one prompt row
    ///
    /// Without a version, rows are ordered by `version` descending as plain
    /// strings and the first is returned, so "2.0.0" wins over "10.0.0".
    async fn find_prompt(&self, query: &PromptQuery) -> DatabaseResult<Prompt>;

    /// Check that the store is reachable
    async fn health_check(&self) -> DatabaseResult<bool>;
}
