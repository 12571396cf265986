//! API error types.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use joblinks_db::DbError;
use joblinks_models::Forbidden;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::{PasswordError, TokenError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[source] DbError),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation(_) => "validation_error",
            ApiError::Conflict(_) => "conflict",
            ApiError::RateLimited => "rate_limited",
            ApiError::Internal(_) | ApiError::Database(_) => "internal_error",
        }
    }

    /// Client-facing message, without the variant prefix.
    fn detail(&self) -> String {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg)
            | ApiError::Internal(msg) => msg.clone(),
            ApiError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            ApiError::Database(e) => e.to_string(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(entity) => Self::NotFound(format!("{entity} not found")),
            DbError::InvalidReference(msg) => {
                Self::BadRequest(format!("Referenced record does not exist ({msg})"))
            }
            DbError::Duplicate(_) => Self::Conflict("Record already exists.".to_string()),
            DbError::Conflict(entity) => {
                Self::Conflict(format!("{entity} was modified by another request."))
            }
            other => Self::Database(other),
        }
    }
}

impl From<Forbidden> for ApiError {
    fn from(err: Forbidden) -> Self {
        Self::Forbidden(err.reason().to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => Self::Internal(msg),
            other => Self::Unauthorized(other.to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

/// Marks a response rendered from an internal failure, so the
/// `mask_internal_errors` middleware can replace its detail.
#[derive(Debug, Clone, Copy)]
pub struct InternalErrorMarker;

/// Body sent instead of internal failure details in production.
pub fn masked_internal_response() -> Response {
    let body = ErrorResponse {
        detail: "An internal error occurred".to_string(),
        code: Some("internal_error".to_string()),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let internal = matches!(self, ApiError::Internal(_) | ApiError::Database(_));
        if internal {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            detail: self.detail(),
            code: Some(self.code().to_string()),
        };

        let mut response = (status, Json(body)).into_response();
        if internal {
            response.extensions_mut().insert(InternalErrorMarker);
        }
        response
    }
}
