//! Front-end error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("API returned {status}")]
    Api { status: StatusCode, body: Value },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Status the API returned, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error returned by front-end handlers.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Not signed in.")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            // API errors reach the caller unchanged.
            WebError::Client(ClientError::Api { status, body }) => {
                (status, Json(body)).into_response()
            }
            WebError::Client(e) => {
                error!(error = %e, "API request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({"detail": "The API is unavailable."})),
                )
                    .into_response()
            }
            WebError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": self.to_string()})),
            )
                .into_response(),
            WebError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({"detail": msg}))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_status_passes_through() {
        let err = WebError::from(ClientError::Api {
            status: StatusCode::FORBIDDEN,
            body: json!({"detail": "Admin access required."}),
        });
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unreachable_api_is_bad_gateway() {
        let err = WebError::from(ClientError::InvalidResponse("truncated".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            WebError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
