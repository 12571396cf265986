//! JobLinks HTTP API server.
//!
//! This crate provides:
//! - JWT bearer authentication and Argon2id password hashing
//! - Role-based authorization over the job-board resources
//! - Rate limiting, security headers and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod state;

pub use config::{ApiConfig, ConfigError, JwtConfig};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
