//! Fixtures for driving the edge router in-process

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use chrono::{DateTime, Utc};
use common::{
    models::{ApiToken, Prompt},
    store::MemoryStore,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use edge::{routes::create_router, state::AppState};

/// Router wired to a shared in-memory store
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    create_router(AppState::new(store))
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
    let created_at = "2024-05-01T12:00:00Z".parse().unwrap();
    let prompt = Prompt {
        id,
        user_id: owner,
        title: "Release notes writer".to_string(),
        description: Some("Turns commit logs into release notes".to_string()),
        content: "Write release notes for: {{commits}}".to_string(),
        system_prompt: Some("You write concise release notes".to_string()),
        user_prompt: Some("{{commits}}".to_string()),
        version: version.to_string(),
        token_count: 18,
        system_tokens: 7,
        user_tokens: 3,
        performance: Some(4.5),
        model: Some("gpt-4o-mini".to_string()),
        temperature: Some(0.3),
        max_tokens: Some(800),
        is_favorite: false,
        category_id: Some(Uuid::new_v4()),
        created_at,
        updated_at: created_at,
    };
    store.put_prompt(prompt.clone()).await;
    prompt
}

/// Response parts needed by assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw: Vec<u8>,
}

/// Send one request through the router
pub async fn send(app: Router, method: Method, uri: &str, auth: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let raw = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
        raw,
    }
}

/// GET with a bearer token
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> TestResponse {
    let auth = token.map(|t| format!("Bearer {t}"));
    send(app, Method::GET, uri, auth.as_deref()).await
}
