//! Axum HTTP API server.
//!
//! This crate provides:
//! - `GET /transcript` for transcript acquisition plus video metadata
//! - Optional bearer-token authentication
//! - CORS, body-limit, and request-logging layers

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
