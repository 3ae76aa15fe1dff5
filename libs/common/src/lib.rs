//! Common library for the Promplify prompt API
//!
//! This crate provides the pieces shared by the edge and api services:
//! the data model, the data-store seam with its PostgreSQL and in-memory
//! implementations, API token validation, prompt lookup, database and
//! listener configuration, and logging setup.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool};
//! use common::lookup::find_prompt;
//! use common::store::{PgStore, PromptQuery};
//! use common::token::validate_token;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let store = PgStore::new(init_pool(&config).await?);
//!     let token = validate_token(&store, "pm_example", chrono::Utc::now()).await?;
//!     let query = PromptQuery::new(uuid::Uuid::nil()).owned_by(token.user_id);
//!     let prompt = find_prompt(&store, &query).await?;
//!     println!("{} v{}", prompt.title, prompt.version);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod lookup;
pub mod models;
pub mod store;
pub mod telemetry;
pub mod token;
