//! In-app prompt API
//!
//! Serves `/api/prompts/{id}` to holders of an API token, scoped to the
//! token owner's prompts, and lets signed-in users manage their tokens.

pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
