//! Prompt lookup and response projections

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::DatabaseError,
    models::Prompt,
    store::{PromptQuery, PromptStore},
};

/// Lookup failures
#[derive(Error, Debug)]
pub enum LookupError {
    /// No row matched the id, version and owner filters
    #[error("prompt not found")]
    NotFound,

    /// Any other store failure
    #[error(transparent)]
    Store(DatabaseError),
}

impl From<DatabaseError> for LookupError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound => LookupError::NotFound,
            other => LookupError::Store(other),
        }
    }
}

/// Resolve a single prompt row
pub async fn find_prompt(
    store: &dyn PromptStore,
    query: &PromptQuery,
) -> Result<Prompt, LookupError> {
    Ok(store.find_prompt(query).await?)
}

/// Pick the requested version out of raw query-string pairs
///
/// The first `version` pair wins. An empty value means the latest version.
pub fn requested_version(pairs: &[(String, String)]) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == "version")
        .map(|(_, value)| value.clone())
        .filter(|value| !value.is_empty())
}

/// Allow-listed projection served by the public edge endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicPrompt {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub version: String,
    pub token_count: i32,
    pub performance: Option<f64>,
    pub is_favorite: bool,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub system_tokens: i32,
    pub user_tokens: i32,
}

impl From<Prompt> for PublicPrompt {
    fn from(prompt: Prompt) -> Self {
        Self {
            title: prompt.title,
            description: prompt.description,
            content: prompt.content,
            version: prompt.version,
            token_count: prompt.token_count,
            performance: prompt.performance,
            is_favorite: prompt.is_favorite,
            model: prompt.model,
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            created_at: prompt.created_at,
            updated_at: prompt.updated_at,
            system_prompt: prompt.system_prompt,
            user_prompt: prompt.user_prompt,
            system_tokens: prompt.system_tokens,
            user_tokens: prompt.user_tokens,
        }
    }
}

/// Projection served to a prompt's owner
///
/// Carries every column except the row identity, the owner and the
/// performance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedPrompt {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub version: String,
    pub token_count: i32,
    pub system_tokens: i32,
    pub user_tokens: i32,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i32>,
    pub is_favorite: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Prompt> for OwnedPrompt {
    fn from(prompt: Prompt) -> Self {
        Self {
            title: prompt.title,
            description: prompt.description,
            content: prompt.content,
            system_prompt: prompt.system_prompt,
            user_prompt: prompt.user_prompt,
            version: prompt.version,
            token_count: prompt.token_count,
            system_tokens: prompt.system_tokens,
            user_tokens: prompt.user_tokens,
            model: prompt.model,
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            is_favorite: prompt.is_favorite,
            category_id: prompt.category_id,
            created_at: prompt.created_at,
            updated_at: prompt.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn prompt(id: Uuid, owner: Uuid, version: &str) -> Prompt {
        let now = Utc::now();
        Prompt {
            id,
            user_id: owner,
            title: "Code reviewer".to_string(),
            description: Some("Reviews pull requests".to_string()),
            content: "Review this diff".to_string(),
            system_prompt: Some("You are a senior engineer".to_string()),
            user_prompt: Some("{{diff}}".to_string()),
            version: version.to_string(),
            token_count: 12,
            system_tokens: 6,
            user_tokens: 2,
            performance: Some(0.87),
            model: Some("gpt-4o".to_string()),
            temperature: Some(0.2),
            max_tokens: Some(1024),
            is_favorite: true,
            category_id: Some(Uuid::new_v4()),
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded(id: Uuid, owner: Uuid, versions: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for version in versions {
            store.put_prompt(prompt(id, owner, version)).await;
        }
        store
    }

    #[tokio::test]
    async fn test_latest_is_greatest_version_string() {
        let id = Uuid::new_v4();
        let store = seeded(id, Uuid::new_v4(), &["1.0.0", "2.0.0", "1.5.0"]).await;

        let found = find_prompt(&store, &PromptQuery::new(id)).await.unwrap();
        assert_eq!(found.version, "2.0.0");
    }

    #[tokio::test]
    async fn test_exact_version_and_missing_version() {
        let id = Uuid::new_v4();
        let store = seeded(id, Uuid::new_v4(), &["1.0.0", "2.0.0"]).await;

        let found = find_prompt(
            &store,
            &PromptQuery::new(id).version(Some("1.0.0".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(found.version, "1.0.0");

        let err = find_prompt(
            &store,
            &PromptQuery::new(id).version(Some("3.0.0".to_string())),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LookupError::NotFound));
    }

    #[tokio::test]
    async fn test_owner_mismatch_is_not_found() {
        let id = Uuid::new_v4();
        let store = seeded(id, Uuid::new_v4(), &["1.0.0"]).await;

        let err = find_prompt(&store, &PromptQuery::new(id).owned_by(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::NotFound));
    }

    #[test]
    fn test_store_errors_stay_distinct() {
        assert!(matches!(
            LookupError::from(DatabaseError::NotFound),
            LookupError::NotFound
        ));
        assert!(matches!(
            LookupError::from(DatabaseError::Query(sqlx::Error::PoolTimedOut)),
            LookupError::Store(_)
        ));
    }

    #[test]
    fn test_requested_version() {
        let pairs = |items: &[(&str, &str)]| -> Vec<(String, String)> {
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        assert_eq!(requested_version(&pairs(&[])), None);
        assert_eq!(requested_version(&pairs(&[("version", "")])), None);
        assert_eq!(
            requested_version(&pairs(&[("lang", "en"), ("version", "1.2.0")])),
            Some("1.2.0".to_string())
        );
        assert_eq!(
            requested_version(&pairs(&[("version", "1"), ("version", "2")])),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_projections_select_fields() {
        let row = prompt(Uuid::new_v4(), Uuid::new_v4(), "1.0.0");

        let public = serde_json::to_value(PublicPrompt::from(row.clone())).unwrap();
        let public = public.as_object().unwrap();
        assert_eq!(public.len(), 16);
        for hidden in ["id", "user_id", "category_id"] {
            assert!(!public.contains_key(hidden), "{hidden} leaked");
        }
        assert!(public.contains_key("performance"));

        let owned = serde_json::to_value(OwnedPrompt::from(row)).unwrap();
        let owned = owned.as_object().unwrap();
        for hidden in ["id", "user_id", "performance"] {
            assert!(!owned.contains_key(hidden), "{hidden} leaked");
        }
        assert!(owned.contains_key("category_id"));
    }
}
