//! Edge service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    handler::Handler,
    http::{
        HeaderMap, HeaderValue,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION},
    },
    response::IntoResponse,
    routing::{MethodRouter, get},
};
use chrono::Utc;
use common::{
    lookup::{PublicPrompt, find_prompt, requested_version},
    store::PromptQuery,
    token::{TokenError, parse_bearer, record_token_use, validate_token},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    error::{EdgeError, EdgeResult},
    state::AppState,
};

/// Create the router for the edge service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get_only(missing_prompt_id))
        .route("/:prompt_id", get_only(get_prompt))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "edge-service"
    }))
}

/// GET handler that answers every other method, HEAD included, with 405
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

async fn method_not_allowed() -> EdgeError {
    EdgeError::MethodNotAllowed
}

async fn missing_prompt_id() -> EdgeError {
    EdgeError::MissingPromptId
}

/// Fetch a prompt with an API token
///
/// Any valid token may read any prompt. The token's `last_used_at` is
/// updated in the background once the prompt has been found.
pub async fn get_prompt(
    State(state): State<AppState>,
    Path(prompt_id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> EdgeResult<Json<PublicPrompt>> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| TokenError::InvalidFormat)?),
        None => None,
    };
    let raw = parse_bearer(header)?;

    let token = validate_token(state.store.as_ref(), raw, Utc::now()).await?;

    // Ids are UUIDs; anything else cannot match a row
    let id = Uuid::parse_str(&prompt_id).map_err(|_| EdgeError::NotFound)?;
    let version = requested_version(&params);

    let prompt = find_prompt(state.store.as_ref(), &PromptQuery::new(id).version(version)).await?;
    debug!(prompt_id = %id, token_id = %token.id, "Served prompt");

    let store = Arc::clone(&state.store);
    let token_id = token.id;
    tokio::spawn(async move {
        if let Err(e) = record_token_use(store.as_ref(), token_id, Utc::now()).await {
            warn!(%token_id, "Failed to record API token use: {}", e);
        }
    });

    Ok(Json(PublicPrompt::from(prompt)))
}
