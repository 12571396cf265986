//! Signed bearer tokens (HS256).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use joblinks_models::{Actor, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JwtConfig;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per RFC 7519.
    pub sub: String,
    pub name: String,
    /// Role code: 0 = Admin, 1 = User, 2 = Employer.
    pub role: i32,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Identity the policy layer works with. Fails on a malformed subject or role.
    pub fn actor(&self) -> Result<Actor, TokenError> {
        let user_id = self.sub.parse().map_err(|_| TokenError::Invalid)?;
        let role = Role::try_from(self.role).map_err(|_| TokenError::Invalid)?;
        Ok(Actor::new(user_id, role))
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(&config.key)),
            decoding: Arc::new(DecodingKey::from_secret(&config.key)),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::from_std(config.ttl).unwrap_or_else(|_| Duration::hours(1)),
        }
    }

    /// Sign a token for the given user.
    pub fn issue(&self, user_id: i32, name: &str, role: Role) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.code(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to encode token: {}", e);
            TokenError::Signing(e.to_string())
        })?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature, issuer, audience and expiry.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(issuer: &str) -> JwtConfig {
        JwtConfig {
            key: b"test-secret-key-at-least-32-bytes-long".to_vec(),
            issuer: issuer.to_string(),
            audience: "joblinks-clients".to_string(),
            ttl: std::time::Duration::from_secs(600),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let service = TokenService::new(&config("joblinks-api"));
        let issued = service.issue(42, "Ana", Role::Employer).unwrap();
        assert!(issued.expires_at > Utc::now());

        let claims = service.validate(&issued.token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "Ana");
        assert_eq!(claims.actor().unwrap(), Actor::new(42, Role::Employer));
    }

    #[test]
    fn test_rejects_foreign_issuer_and_garbage() {
        let ours = TokenService::new(&config("joblinks-api"));
        let theirs = TokenService::new(&config("someone-else"));
        let token = theirs.issue(1, "Eve", Role::Admin).unwrap().token;

        assert!(matches!(ours.validate(&token), Err(TokenError::Invalid)));
        assert!(matches!(ours.validate("not.a.token"), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token() {
        let service = TokenService::new(&config("joblinks-api"));
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            name: "Old".to_string(),
            role: 1,
            iss: "joblinks-api".to_string(),
            aud: "joblinks-clients".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::default(), &claims, &service.encoding).unwrap();
        assert!(matches!(service.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_unknown_role_claim_is_invalid() {
        let claims = Claims {
            sub: "1".to_string(),
            name: "X".to_string(),
            role: 9,
            iss: String::new(),
            aud: String::new(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.actor().is_err());
    }
}
