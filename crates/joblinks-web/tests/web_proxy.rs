//! Front-end tests against a mocked API using wiremock.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use joblinks_web::{create_router, ApiClient, WebConfig, WebState};

fn create_app(mock_server: &MockServer) -> Router {
    let config = WebConfig::from_lookup(|_| None).unwrap();
    create_router(WebState {
        client: ApiClient::with_base_url(&mock_server.uri()).unwrap(),
        config: Arc::new(config),
    })
}

fn with_cookie(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("joblinks_token={token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn mock_me(mock_server: &MockServer, token: &str, user_id: i32, role: i32) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header_eq("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": user_id,
            "name": "someone",
            "role": role
        })))
        .mount(mock_server)
        .await;
}

fn user_json(user_id: i32, name: &str, role: i32) -> Value {
    json!({
        "userId": user_id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "role": role
    })
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let mock_server = MockServer::start().await;
    let expires_at = Utc::now() + Duration::hours(1);

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc.def.ghi",
            "expiresAt": expires_at
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": "ana", "password": "pw"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("joblinks_token=abc.def.ghi;"));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Max-Age=0"));

    let body = body_json(response).await;
    assert_eq!(body["token"], "abc.def.ghi");
}

#[tokio::test]
async fn test_failed_login_passes_status_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Invalid username or password."})),
        )
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": "ana", "password": "wrong"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(
        body_json(response).await["detail"],
        "Invalid username or password."
    );
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let mock_server = MockServer::start().await;
    let app = create_app(&mock_server);

    let response = app
        .oneshot(with_cookie("POST", "/logout", "abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_cookie_forwarded_as_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/companies/7"))
        .and(header_eq("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Acme"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(with_cookie("GET", "/companies/7", "abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Acme");
}

#[tokio::test]
async fn test_api_errors_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/opportunities/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Opportunity not found"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/companies/3"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"detail": "Admin access required."})),
        )
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);

    let response = app
        .clone()
        .oneshot(with_cookie("GET", "/opportunities/99", "abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "Opportunity not found");

    let response = app
        .oneshot(with_cookie("DELETE", "/companies/3", "abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_relays_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chats"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", "/api/chats/5")
                .set_body_json(json!({"id": 5, "chatUsers": [2]})),
        )
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chats")
                .header(header::COOKIE, "joblinks_token=abc")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/chats/5"
    );
}

#[tokio::test]
async fn test_unknown_resource_is_not_found() {
    let mock_server = MockServer::start().await;
    let app = create_app(&mock_server);

    let response = app
        .oneshot(with_cookie("GET", "/videos", "abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_anonymous_requests_are_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/companies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employer_without_filters_gets_message() {
    let mock_server = MockServer::start().await;
    mock_me(&mock_server, "emp", 4, 2).await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(with_cookie("GET", "/users", "emp"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], 2);
    assert_eq!(body["users"], json!([]));
    assert_eq!(body["message"], "Use filters to find candidates.");
}

#[tokio::test]
async fn test_employer_with_filters_lists_candidates() {
    let mock_server = MockServer::start().await;
    mock_me(&mock_server, "emp", 4, 2).await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("jobPreference", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_json(9, "Bea", 1)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(with_cookie("GET", "/users?jobPreference=3", "emp"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["users"][0]["name"], "Bea");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_user_sees_own_profile() {
    let mock_server = MockServer::start().await;
    mock_me(&mock_server, "usr", 9, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/users/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(9, "Bea", 1)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(with_cookie("GET", "/users", "usr"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["users"][0]["userId"], 9);
}

#[tokio::test]
async fn test_admin_lists_everyone() {
    let mock_server = MockServer::start().await;
    mock_me(&mock_server, "adm", 1, 0).await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(1, "Root", 0),
            user_json(9, "Bea", 1)
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);
    let response = app
        .oneshot(with_cookie("GET", "/users", "adm"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_application_draft_prefills_opportunity() {
    let mock_server = MockServer::start().await;
    mock_me(&mock_server, "usr", 9, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/opportunities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "title": "Welder", "createdAt": Utc::now()},
            {"id": 4, "title": "Baker", "createdAt": Utc::now()}
        ])))
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server);

    let response = app
        .clone()
        .oneshot(with_cookie("GET", "/applications/new?opportunityId=4", "usr"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["draft"]["userId"], 9);
    assert_eq!(body["draft"]["opportunityId"], 4);
    assert_eq!(body["opportunities"].as_array().unwrap().len(), 2);

    // An unknown opportunity is not pre-selected.
    let response = app
        .oneshot(with_cookie("GET", "/applications/new?opportunityId=40", "usr"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["draft"]["opportunityId"].is_null());
}
