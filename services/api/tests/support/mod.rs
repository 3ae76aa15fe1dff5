//! Fixtures for driving the api router in-process

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chrono::{DateTime, Utc};
use common::{
    models::{ApiToken, Prompt},
    store::MemoryStore,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use api::{
    middleware::{Claims, SessionConfig},
    routes::create_router,
    state::AppState,
};

pub const JWT_SECRET: &str = "test-session-secret";
pub const JWT_AUDIENCE: &str = "authenticated";

/// Router wired to a shared in-memory store
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let session = SessionConfig::new(JWT_SECRET, JWT_AUDIENCE);
    create_router(AppState::new(store, session))
}

/// Sign a session JWT for `user_id`
pub fn session_token(user_id: Uuid) -> String {
    let now = Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: user_id,
        aud: JWT_AUDIENCE.to_string(),
        exp: now + 3600,
        iat: now,
        role: Some("authenticated".to_string()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Seed a token for `owner` and return its row
pub async fn seed_token(
    store: &MemoryStore,
    owner: Uuid,
    secret: &str,
    expires_at: Option<DateTime<Utc>>,
) -> ApiToken {
    let token = ApiToken {
        id: Uuid::new_v4(),
        user_id: owner,
        name: "fixture".to_string(),
        token: secret.to_string(),
        created_at: Utc::now(),
        last_used_at: None,
        expires_at,
    };
    store.put_token(token.clone()).await;
    token
}

/// Seed one version of a prompt
pub async fn seed_prompt(store: &MemoryStore, id: Uuid, owner: Uuid, version: &str) -> Prompt {
    let created_at = "2024-06-10T08:30:00Z".parse().unwrap();
    let prompt = Prompt {
        id,
        user_id: owner,
        title: "SQL explainer".to_string(),
        description: None,
        content: "Explain this query step by step".to_string(),
        system_prompt: Some("You are a database tutor".to_string()),
        user_prompt: Some("{{query}}".to_string()),
        version: version.to_string(),
        token_count: 14,
        system_tokens: 5,
        user_tokens: 2,
        performance: Some(3.9),
        model: Some("claude-3-haiku".to_string()),
        temperature: Some(0.0),
        max_tokens: Some(512),
        is_favorite: true,
        category_id: None,
        created_at,
        updated_at: created_at,
    };
    store.put_prompt(prompt.clone()).await;
    prompt
}

/// Response parts needed by assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw: Vec<u8>,
}

/// Send one request through the router
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    json: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    let body = match json {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let raw = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

    TestResponse { status, body, raw }
}

/// GET with an optional bearer credential
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> TestResponse {
    let auth = token.map(|t| format!("Bearer {t}"));
    send(app, Method::GET, uri, auth.as_deref(), None).await
}
