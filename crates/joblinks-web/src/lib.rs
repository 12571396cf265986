//! JobLinks front-end tier.
//!
//! Holds the session cookie, forwards the caller's token to the API and
//! shapes role-aware view models. All decisions stay in the API.

pub mod client;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod views;

pub use client::{ApiClient, ApiReply};
pub use config::{ConfigError, WebConfig};
pub use error::{ClientError, ClientResult, WebError};
pub use routes::{create_router, Resource, WebState};
pub use session::{SessionToken, TOKEN_COOKIE};
