//! Shared fixtures for router-level tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use joblinks_api::auth::PasswordHasher;
use joblinks_api::{create_router, ApiConfig, AppState};
use joblinks_db::UserRecord;
use joblinks_models::Role;
use serde_json::Value;
use tower::ServiceExt;

/// 32-byte key, base64.
pub const JWT_KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct Seeded {
    pub id: i32,
    pub token: String,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = ApiConfig::from_lookup(|name| match name {
            "JWT_KEY" => Some(JWT_KEY.to_string()),
            "METRICS_ENABLED" => Some("false".to_string()),
            _ => None,
        })
        .unwrap();
        let db = joblinks_db::connect_in_memory().await.unwrap();
        let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
        let state = AppState::with_database(config, db, hasher);
        let router = create_router(state.clone(), None);
        Self { router, state }
    }

    /// Insert a user directly and mint a token for them.
    pub async fn seed(&self, name: &str, role: Role) -> Seeded {
        self.seed_with(name, role, None, None).await
    }

    pub async fn seed_with(
        &self,
        name: &str,
        role: Role,
        job_preference: Option<i32>,
        nationality: Option<i32>,
    ) -> Seeded {
        let password_hash = self.state.hasher.hash("secret-pw".to_string()).await.unwrap();
        let user = self
            .state
            .repos
            .users
            .create(UserRecord {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash,
                phone_number: None,
                nationality,
                job_preference,
                profile_bio: None,
                do_b: None,
                role,
            })
            .await
            .unwrap();
        let token = self
            .state
            .tokens
            .issue(user.user_id, &user.name, role)
            .unwrap()
            .token;
        Seeded {
            id: user.user_id,
            token,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}
