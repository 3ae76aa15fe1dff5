//! Edge prompt endpoint
//!
//! A small public service answering `GET /{promptId}?version=X` for any
//! holder of a valid API token.

pub mod error;
pub mod routes;
pub mod state;
