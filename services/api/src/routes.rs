//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    handler::Handler,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware,
    response::IntoResponse,
    routing::{MethodRouter, delete, get},
};
use chrono::Utc;
use common::{
    lookup::{OwnedPrompt, find_prompt, requested_version},
    store::{PromptQuery, PromptStore},
    token::{TokenError, parse_bearer, record_token_use, validate_token},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, session_auth},
    models::{CreateTokenRequest, CreatedTokenResponse, TokenSummary},
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/api/tokens", get(list_tokens).post(create_token))
        .route("/api/tokens/:id", delete(delete_token))
        .route_layer(middleware::from_fn_with_state(state.clone(), session_auth));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/prompts", get_only(missing_prompt_id))
        .route("/api/prompts/", get_only(missing_prompt_id))
        .route("/api/prompts/:id", get_only(get_prompt))
        .merge(session_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    Json(json!({
        "status": "ok",
        "service": "api-service",
        "db_healthy": db_healthy
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

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn missing_prompt_id() -> ApiError {
    ApiError::MissingPromptId
}

/// Fetch one of the token owner's prompts
///
/// Prompts owned by someone else are reported as not found.
pub async fn get_prompt(
    State(state): State<AppState>,
    Path(prompt_id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> ApiResult<Json<OwnedPrompt>> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| TokenError::InvalidFormat)?),
        None => None,
    };
    let raw = parse_bearer(header)?;

    let now = Utc::now();
    let token = validate_token(state.store.as_ref(), raw, now).await?;

    if let Err(e) = record_token_use(state.store.as_ref(), token.id, now).await {
        warn!(token_id = %token.id, "Failed to record API token use: {}", e);
    }

    let id = Uuid::parse_str(&prompt_id).map_err(|_| ApiError::NotFound("Prompt not found"))?;
    let version = requested_version(&params);
    let query = PromptQuery::new(id)
        .version(version)
        .owned_by(token.user_id);

    let prompt = find_prompt(state.store.as_ref(), &query).await?;
    debug!(prompt_id = %id, user_id = %token.user_id, "Served owned prompt");

    Ok(Json(OwnedPrompt::from(prompt)))
}

/// Issue a new API token for the signed-in user
pub async fn create_token(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateTokenRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let token = state.token_repository.create(user.id, &payload).await?;

    Ok((StatusCode::CREATED, Json(CreatedTokenResponse::from(token))))
}

/// List the signed-in user's API tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<TokenSummary>>> {
    let tokens = state.token_repository.list(user.id).await?;

    Ok(Json(tokens.into_iter().map(TokenSummary::from).collect()))
}

/// Revoke one of the signed-in user's API tokens
pub async fn delete_token(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound("Token not found"))?;
    if state.token_repository.delete(user.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Token not found"))
    }
}
