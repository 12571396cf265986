//! Typed HTTP client for the JobLinks API.

use std::time::Duration;

use axum::http::header::LOCATION;
use axum::http::{Method, StatusCode};
use joblinks_models::{
    CurrentUser, LoginRequest, Opportunity, RegisterRequest, RegisteredUser, TokenResponse, User,
    UserFilter,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::{parse_base_url, WebConfig};
use crate::error::{ClientError, ClientResult};

/// A successful API response, kept raw for pass-through.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl ApiReply {
    pub fn json<T: DeserializeOwned>(self) -> ClientResult<T> {
        serde_json::from_value(self.body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Client for the API. Every call forwards the caller's bearer token.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &WebConfig) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Client for an arbitrary API root, with a short timeout.
    pub fn with_base_url(base_url: &str) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send a request and return the raw reply; non-2xx becomes `ClientError::Api`.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> ClientResult<ApiReply>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!(method = %method, url = %url, "Calling API");

        let mut request = self.http.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        if !status.is_success() {
            return Err(ClientError::Api { status, body });
        }
        Ok(ApiReply {
            status,
            location,
            body,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> ClientResult<T> {
        self.send::<()>(Method::GET, path, Some(token), None)
            .await?
            .json()
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<TokenResponse> {
        self.send(Method::POST, "api/auth/login", None, Some(request))
            .await?
            .json()
    }

    pub async fn register(
        &self,
        request: &RegisterRequest,
        token: Option<&str>,
    ) -> ClientResult<RegisteredUser> {
        self.send(Method::POST, "api/auth/register", token, Some(request))
            .await?
            .json()
    }

    pub async fn me(&self, token: &str) -> ClientResult<CurrentUser> {
        self.get("api/auth/me", token).await
    }

    pub async fn list_users(&self, token: &str, filter: &UserFilter) -> ClientResult<Vec<User>> {
        let query = filter.to_query();
        if query.is_empty() {
            self.get("api/users", token).await
        } else {
            self.get(&format!("api/users?{query}"), token).await
        }
    }

    pub async fn get_user(&self, token: &str, user_id: i32) -> ClientResult<User> {
        self.get(&format!("api/users/{user_id}"), token).await
    }

    pub async fn list_opportunities(&self, token: &str) -> ClientResult<Vec<Opportunity>> {
        self.get("api/opportunities", token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_under_base_path() {
        let client = ApiClient::with_base_url("http://api.test/root").unwrap();
        assert_eq!(
            client.url("/api/companies/3").unwrap().as_str(),
            "http://api.test/root/api/companies/3"
        );
        assert_eq!(
            client.url("api/users?jobPreference=2").unwrap().as_str(),
            "http://api.test/root/api/users?jobPreference=2"
        );
    }
}
