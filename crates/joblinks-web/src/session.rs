//! Session token: read from the cookie or an `Authorization` header, and
//! the `Set-Cookie` values that store and clear it.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::error::WebError;

pub const TOKEN_COOKIE: &str = "joblinks_token";

/// Bearer token of the caller, forwarded verbatim to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(token) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer)
        {
            return Ok(SessionToken(token.to_string()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        jar.get(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .map(SessionToken)
            .ok_or(WebError::Unauthorized)
    }
}

/// `Set-Cookie` value storing the token for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age_secs.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session immediately.
pub fn clear_session_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
