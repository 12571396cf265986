//! Front-end configuration.

use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Front-end configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// API root; always ends with `/` so relative joins keep its path.
    pub api_base_url: Url,
    pub request_timeout: Duration,
    /// Add `Secure` to the session cookie.
    pub secure_cookies: bool,
}

impl WebConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base = var("API_BASE_URL").unwrap_or_else(|| "http://localhost:5270/".to_string());
        let api_base_url = parse_base_url(&raw_base).map_err(|e| ConfigError::Invalid {
            var: "API_BASE_URL",
            reason: e.to_string(),
        })?;

        Ok(Self {
            host: var("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("WEB_PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(5080),
            api_base_url,
            request_timeout: Duration::from_secs(
                var("API_TIMEOUT_SECS")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(30),
            ),
            secure_cookies: var("SECURE_COOKIES")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1"))
                .unwrap_or(false),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse an API root, appending the trailing slash `Url::join` relies on.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WebConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5080");
        assert_eq!(config.api_base_url.as_str(), "http://localhost:5270/");
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = WebConfig::from_lookup(|name| {
            (name == "API_BASE_URL").then(|| "https://api.example/v1".to_string())
        })
        .unwrap();
        assert_eq!(config.api_base_url.as_str(), "https://api.example/v1/");
        assert_eq!(
            config.api_base_url.join("api/users").unwrap().as_str(),
            "https://api.example/v1/api/users"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = WebConfig::from_lookup(|name| {
            (name == "API_BASE_URL").then(|| "not a url".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { var: "API_BASE_URL", .. })
        ));
    }
}
