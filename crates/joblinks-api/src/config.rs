//! API configuration.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Minimum decoded signing key length for HS256.
pub const MIN_JWT_KEY_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Token signing settings.
#[derive(Clone)]
pub struct JwtConfig {
    /// Decoded HMAC key.
    pub key: Vec<u8>,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtConfig {
    /// Build from a base64-encoded key.
    pub fn from_base64(
        encoded: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, ConfigError> {
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ConfigError::Invalid {
                var: "JWT_KEY",
                reason: e.to_string(),
            })?;
        if key.len() < MIN_JWT_KEY_BYTES {
            return Err(ConfigError::Invalid {
                var: "JWT_KEY",
                reason: format!("decoded key must be at least {MIN_JWT_KEY_BYTES} bytes"),
            });
        }
        Ok(Self {
            key,
            issuer: issuer.into(),
            audience: audience.into(),
            ttl,
        })
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Connection string understood by the ORM
    pub database_url: String,
    pub database_max_connections: u32,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
    pub jwt: JwtConfig,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second, per client IP
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    pub metrics_enabled: bool,
    /// Environment (development/production)
    pub environment: String,
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_key = var("JWT_KEY").ok_or(ConfigError::Missing("JWT_KEY"))?;
        let jwt = JwtConfig::from_base64(
            &jwt_key,
            var("JWT_ISSUER").unwrap_or_else(|| "joblinks-api".to_string()),
            var("JWT_AUDIENCE").unwrap_or_else(|| "joblinks-clients".to_string()),
            Duration::from_secs(60 * parsed(&var, "JWT_TTL_MINUTES").unwrap_or(60u64)),
        )?;

        Ok(Self {
            host: var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&var, "API_PORT").unwrap_or(5270),
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://joblinks.db?mode=rwc".to_string()),
            database_max_connections: parsed(&var, "DATABASE_MAX_CONNECTIONS").unwrap_or(10),
            run_migrations: flag(&var, "RUN_MIGRATIONS", true),
            jwt,
            cors_origins: var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| vec!["*".to_string()]),
            rate_limit_rps: parsed(&var, "RATE_LIMIT_RPS").unwrap_or(20),
            max_body_size: parsed(&var, "MAX_BODY_SIZE").unwrap_or(1024 * 1024),
            metrics_enabled: flag(&var, "METRICS_ENABLED", true),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T, F>(var: &F, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(name).and_then(|s| s.trim().parse().ok())
}

fn flag<F>(var: &F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    var(name)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY="; // 32 bytes

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[("JWT_KEY", KEY)])).unwrap();
        assert_eq!(config.port, 5270);
        assert_eq!(config.jwt.issuer, "joblinks-api");
        assert_eq!(config.jwt.audience, "joblinks-clients");
        assert_eq!(config.jwt.ttl, Duration::from_secs(3600));
        assert_eq!(config.cors_origins, vec!["*"]);
        assert!(config.run_migrations);
        assert!(config.metrics_enabled);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("JWT_KEY", KEY),
            ("API_PORT", "9000"),
            ("JWT_TTL_MINUTES", "5"),
            ("CORS_ORIGINS", "https://a.test, https://b.test"),
            ("METRICS_ENABLED", "false"),
            ("ENVIRONMENT", "Production"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.jwt.ttl, Duration::from_secs(300));
        assert_eq!(config.cors_origins, vec!["https://a.test", "https://b.test"]);
        assert!(!config.metrics_enabled);
        assert!(config.is_production());
    }

    #[test]
    fn test_jwt_key_is_required_and_long_enough() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("JWT_KEY"))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("JWT_KEY", "c2hvcnQ=")])),
            Err(ConfigError::Invalid { var: "JWT_KEY", .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("JWT_KEY", "not base64!")])),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
