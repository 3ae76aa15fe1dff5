//! Session authentication for token-management routes
//!
//! The hosted auth provider issues HS256 access tokens. This middleware only
//! verifies them; sign-in flows happen elsewhere.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Session JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Audience
    pub aud: String,
    /// Expiration time
    pub exp: u64,
    /// Issued at time
    #[serde(default)]
    pub iat: u64,
    /// Auth provider role
    #[serde(default)]
    pub role: Option<String>,
}

/// Authenticated user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Session verification settings
#[derive(Clone)]
pub struct SessionConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionConfig {
    /// Build a verifier for HS256 tokens signed with `secret`
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_audience(&[audience]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Create a new SessionConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared secret of the hosted auth provider (required)
    /// - `JWT_AUDIENCE`: Expected `aud` claim (default: "authenticated")
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;
        let audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string());

        Ok(Self::new(&secret, &audience))
    }

    /// Validate a session token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
    }
}

/// Session authentication middleware
pub async fn session_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.session.verify(token).map_err(|e| {
        debug!("Rejected session token: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(req).await)
}
