//! Bearer-token request extractor.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use joblinks_models::Actor;

use crate::error::ApiError;
use crate::state::AppState;

/// Caller identity established from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing, malformed, or the token fails
/// validation. Wrap in `Option` for endpoints where authentication is optional.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub actor: Actor,
    pub name: String,
}

/// Pull the token out of an `Authorization` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

        let token = bearer_token(header)
            .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;

        let claims = state
            .tokens
            .validate(token)
            .map_err(|e| ApiError::unauthorized(e.to_string()))?;
        let actor = claims
            .actor()
            .map_err(|e| ApiError::unauthorized(e.to_string()))?;

        Ok(AuthUser {
            actor,
            name: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcg=="), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
