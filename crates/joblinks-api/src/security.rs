//! Input validation and sanitization for free-text and URL fields.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::warn;
use url::Url;

/// Maximum URL length accepted for company websites.
const MAX_URL_LENGTH: usize = 2048;

/// Maximum length of long free-text fields (bios, descriptions, cover letters).
pub const MAX_TEXT_LENGTH: usize = 8000;

/// Maximum length of names and titles.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Hosts a stored website must never point at.
static BLOCKED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://127\.",
        r"^https?://localhost",
        r"^https?://10\.",
        r"^https?://172\.(1[6-9]|2[0-9]|3[0-1])\.",
        r"^https?://192\.168\.",
        r"^https?://169\.254\.",
        r"^https?://\[::1\]",
        r"^https?://\[fd",
        r"^https?://\[fe80",
        r"^https?://metadata\.",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Result of website validation.
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationResult {
    /// URL is well-formed http(s); carries the trimmed value.
    Valid(String),
    /// URL is malformed or uses an unsupported protocol.
    Invalid(String),
    /// URL targets an internal or link-local address.
    Blocked(String),
    /// URL exceeds maximum length.
    TooLong,
}

impl UrlValidationResult {
    pub fn into_result(self) -> Result<String, String> {
        match self {
            Self::Valid(url) => Ok(url),
            Self::Invalid(msg) | Self::Blocked(msg) => Err(msg),
            Self::TooLong => Err(format!(
                "URL exceeds maximum length of {MAX_URL_LENGTH} characters"
            )),
        }
    }
}

/// Validate a company website: http/https only, public host.
pub fn validate_website(url: &str) -> UrlValidationResult {
    if url.len() > MAX_URL_LENGTH {
        return UrlValidationResult::TooLong;
    }

    let url = url.trim();
    if url.is_empty() {
        return UrlValidationResult::Invalid("URL cannot be empty".to_string());
    }

    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => return UrlValidationResult::Invalid(format!("Invalid URL format: {e}")),
    };

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return UrlValidationResult::Invalid(format!(
                "Invalid protocol '{scheme}'. Only HTTP and HTTPS are allowed."
            ))
        }
    }

    if parsed.host_str().is_none() {
        return UrlValidationResult::Invalid("URL must have a valid domain".to_string());
    }

    let lowered = url.to_lowercase();
    if BLOCKED_PATTERNS.iter().any(|p| p.is_match(&lowered)) {
        warn!(url = %url, "Rejected website pointing at an internal address");
        return UrlValidationResult::Blocked(
            "URL appears to target an internal or restricted endpoint".to_string(),
        );
    }

    UrlValidationResult::Valid(url.to_string())
}

/// Strip control characters (keeping newlines and tabs) and cap the length.
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(MAX_TEXT_LENGTH)
        .collect()
}

/// Trim a name or title and cap its length.
pub fn sanitize_title(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_TITLE_LENGTH)
        .collect()
}

/// `sanitize_text` over an optional field; blank values become `None`.
pub fn sanitize_optional(input: Option<String>) -> Option<String> {
    input
        .map(|s| sanitize_text(s.trim()))
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_websites_pass() {
        assert_eq!(
            validate_website(" https://acme.example/careers "),
            UrlValidationResult::Valid("https://acme.example/careers".to_string())
        );
        assert!(matches!(
            validate_website("http://jobs.example.org"),
            UrlValidationResult::Valid(_)
        ));
    }

    #[test]
    fn test_internal_hosts_blocked() {
        for url in [
            "http://127.0.0.1/admin",
            "http://localhost:8080",
            "http://192.168.1.1",
            "http://169.254.169.254/latest/meta-data/",
            "http://LOCALHOST/",
        ] {
            assert!(
                matches!(validate_website(url), UrlValidationResult::Blocked(_)),
                "{url} should be blocked"
            );
        }
    }

    #[test]
    fn test_invalid_protocols() {
        assert!(matches!(
            validate_website("ftp://acme.example"),
            UrlValidationResult::Invalid(_)
        ));
        assert!(matches!(
            validate_website("javascript:alert(1)"),
            UrlValidationResult::Invalid(_)
        ));
        assert!(validate_website("").into_result().is_err());
    }

    #[test]
    fn test_too_long() {
        let url = format!("https://acme.example/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_website(&url), UrlValidationResult::TooLong);
    }

    #[test]
    fn test_sanitizers() {
        assert_eq!(sanitize_text("line\u{0}one\nline two"), "lineone\nline two");
        assert_eq!(sanitize_title("  Backend Engineer \t"), "Backend Engineer");
        assert_eq!(sanitize_title(&"x".repeat(500)).len(), MAX_TITLE_LENGTH);
        assert_eq!(sanitize_optional(Some("   ".to_string())), None);
        assert_eq!(
            sanitize_optional(Some(" Rust dev ".to_string())),
            Some("Rust dev".to_string())
        );
    }
}
