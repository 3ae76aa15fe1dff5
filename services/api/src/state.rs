//! Application state shared across handlers

use common::store::PromptStore;
use std::sync::Arc;

use crate::{middleware::SessionConfig, repositories::TokenRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PromptStore>,
    pub token_repository: TokenRepository,
    pub session: SessionConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn PromptStore>, session: SessionConfig) -> Self {
        Self {
            token_repository: TokenRepository::new(Arc::clone(&store)),
            store,
            session,
        }
    }
}
