//! Front-end routes: session management, view models and API proxies.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use joblinks_models::{LoginRequest, RegisterRequest, UserFilter};
use serde::Deserialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::{ApiClient, ApiReply};
use crate::config::WebConfig;
use crate::error::WebError;
use crate::session::{clear_session_cookie, session_cookie, SessionToken};
use crate::views::{application_draft_view, users_view};

/// Shared front-end state.
#[derive(Clone)]
pub struct WebState {
    pub client: ApiClient,
    pub config: Arc<WebConfig>,
}

/// API collections the front-end proxies one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Companies,
    CompanyMembers,
    Opportunities,
    Applications,
    Chats,
    ChatUsers,
}

impl Resource {
    pub fn segment(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Companies => "companies",
            Resource::CompanyMembers => "companymembers",
            Resource::Opportunities => "opportunities",
            Resource::Applications => "applications",
            Resource::Chats => "chats",
            Resource::ChatUsers => "chatusers",
        }
    }

    fn api_path(self, id: Option<i32>) -> String {
        match id {
            Some(id) => format!("api/{}/{id}", self.segment()),
            None => format!("api/{}", self.segment()),
        }
    }
}

impl FromStr for Resource {
    type Err = WebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "users" => Ok(Resource::Users),
            "companies" => Ok(Resource::Companies),
            "companymembers" => Ok(Resource::CompanyMembers),
            "opportunities" => Ok(Resource::Opportunities),
            "applications" => Ok(Resource::Applications),
            "chats" => Ok(Resource::Chats),
            "chatusers" => Ok(Resource::ChatUsers),
            other => Err(WebError::NotFound(format!("Unknown resource: {other}"))),
        }
    }
}

/// Relay a successful API reply: same status, `Location` and body.
fn relay(reply: ApiReply) -> Response {
    let mut headers = HeaderMap::new();
    if let Some(location) = reply.location.and_then(|l| HeaderValue::from_str(&l).ok()) {
        headers.insert(LOCATION, location);
    }
    if reply.body.is_null() {
        (reply.status, headers).into_response()
    } else {
        (reply.status, headers, Json(reply.body)).into_response()
    }
}

async fn proxy(
    state: &WebState,
    method: Method,
    resource: Resource,
    id: Option<i32>,
    token: &SessionToken,
    body: Option<&Value>,
) -> Result<Response, WebError> {
    let reply = state
        .client
        .send(method, &resource.api_path(id), Some(token.as_str()), body)
        .await?;
    Ok(relay(reply))
}

pub async fn login(
    State(state): State<WebState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, WebError> {
    let token = state.client.login(&request).await?;
    let max_age = (token.expires_at - Utc::now()).num_seconds();
    let cookie = session_cookie(&token.token, max_age, state.config.secure_cookies);

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(SET_COOKIE, value);
    }
    info!("Session started");
    Ok((headers, Json(token)).into_response())
}

pub async fn logout() -> Response {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie())],
    )
        .into_response()
}

/// Registration, forwarding the session when an Admin registers someone.
pub async fn register(
    State(state): State<WebState>,
    token: Option<SessionToken>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    let created = state
        .client
        .register(&request, token.as_ref().map(SessionToken::as_str))
        .await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

pub async fn me(
    State(state): State<WebState>,
    token: SessionToken,
) -> Result<Response, WebError> {
    Ok(Json(state.client.me(token.as_str()).await?).into_response())
}

pub async fn list_users(
    State(state): State<WebState>,
    token: SessionToken,
    Query(filter): Query<UserFilter>,
) -> Result<Response, WebError> {
    Ok(Json(users_view(&state.client, token.as_str(), filter).await?).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQuery {
    pub opportunity_id: Option<i32>,
}

pub async fn new_application(
    State(state): State<WebState>,
    token: SessionToken,
    Query(query): Query<DraftQuery>,
) -> Result<Response, WebError> {
    let view = application_draft_view(&state.client, token.as_str(), query.opportunity_id).await?;
    Ok(Json(view).into_response())
}

pub async fn list(
    State(state): State<WebState>,
    token: SessionToken,
    Path(resource): Path<String>,
) -> Result<Response, WebError> {
    proxy(&state, Method::GET, resource.parse()?, None, &token, None).await
}

pub async fn create(
    State(state): State<WebState>,
    token: SessionToken,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, WebError> {
    proxy(&state, Method::POST, resource.parse()?, None, &token, Some(&body)).await
}

pub async fn create_user(
    State(state): State<WebState>,
    token: SessionToken,
    Json(body): Json<Value>,
) -> Result<Response, WebError> {
    proxy(&state, Method::POST, Resource::Users, None, &token, Some(&body)).await
}

pub async fn details(
    State(state): State<WebState>,
    token: SessionToken,
    Path((resource, id)): Path<(String, i32)>,
) -> Result<Response, WebError> {
    proxy(&state, Method::GET, resource.parse()?, Some(id), &token, None).await
}

pub async fn edit(
    State(state): State<WebState>,
    token: SessionToken,
    Path((resource, id)): Path<(String, i32)>,
    Json(body): Json<Value>,
) -> Result<Response, WebError> {
    proxy(&state, Method::PUT, resource.parse()?, Some(id), &token, Some(&body)).await
}

pub async fn remove(
    State(state): State<WebState>,
    token: SessionToken,
    Path((resource, id)): Path<(String, i32)>,
) -> Result<Response, WebError> {
    proxy(&state, Method::DELETE, resource.parse()?, Some(id), &token, None).await
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

pub fn create_router(state: WebState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/register", post(register))
        .route("/me", get(me))
        .route("/users", get(list_users).post(create_user))
        .route("/applications/new", get(new_application))
        .route("/:resource", get(list).post(create))
        .route("/:resource/:id", get(details).put(edit).delete(remove))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        let resource: Resource = "CompanyMembers".parse().unwrap();
        assert_eq!(resource, Resource::CompanyMembers);
        assert_eq!(resource.api_path(Some(4)), "api/companymembers/4");
        assert_eq!(Resource::Chats.api_path(None), "api/chats");
        assert!("videos".parse::<Resource>().is_err());
    }
}
