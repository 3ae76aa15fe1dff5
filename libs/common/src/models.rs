//! Rows of the hosted data store touched by the prompt API

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// API token entity
///
/// `token` is the opaque bearer credential. It is compared verbatim against
/// the `Authorization` header and is never signed.
#[derive(Debug, Clone, FromRow)]
pub struct ApiToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    /// Whether the token has passed its expiry at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }
}

/// New API token creation payload
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub user_id: Uuid,
    pub name: String,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Prompt entity
///
/// Not serializable; responses go through the projections in [`crate::lookup`].
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Prompt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub version: String,
    pub token_count: i32,
    pub system_tokens: i32,
    pub user_tokens: i32,
    pub performance: Option<f64>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i32>,
    pub is_favorite: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_at: Option<DateTime<Utc>>) -> ApiToken {
        ApiToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "ci".to_string(),
            token: "pm_secret".to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            expires_at,
        }
    }

    #[test]
    fn test_token_without_expiry_never_expires() {
        assert!(!token(None).is_expired_at(Utc::now() + Duration::days(10_000)));
    }

    #[test]
    fn test_token_expiry_boundary() {
        let now = Utc::now();
        assert!(token(Some(now - Duration::seconds(1))).is_expired_at(now));
        assert!(!token(Some(now)).is_expired_at(now));
        assert!(!token(Some(now + Duration::hours(1))).is_expired_at(now));
    }
}
