//! Application state shared across handlers

use common::store::PromptStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PromptStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self { store }
    }
}
