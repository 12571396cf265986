//! Login, registration and identity over the full router.

mod common;

use axum::http::{header, Method, StatusCode};
use joblinks_api::auth::PasswordHasher;
use joblinks_models::Role;
use sea_orm::ConnectionTrait;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_health_and_ready() {
    let app = TestApp::new().await;

    let health = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");
    assert!(health.headers.contains_key("x-request-id"));

    let ready = app.request(Method::GET, "/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let app = TestApp::new().await;

    let missing = app.request(Method::GET, "/api/companies", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert!(missing.body["detail"].is_string());

    let garbage = app.get("/api/companies", "not-a-jwt").await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_by_email_or_name_then_me() {
    let app = TestApp::new().await;
    let rui = app.seed("Rui", Role::Employer).await;

    let by_email = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "  RUI@example.com ", "password": "secret-pw"})),
        )
        .await;
    assert_eq!(by_email.status, StatusCode::OK);
    let token = by_email.body["token"].as_str().unwrap().to_string();
    assert!(by_email.body["expiresAt"].is_string());

    let by_name = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "rui", "password": "secret-pw"})),
        )
        .await;
    assert_eq!(by_name.status, StatusCode::OK);

    let me = app.get("/api/auth/me", &token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["userId"], rui.id);
    assert_eq!(me.body["name"], "Rui");
    assert_eq!(me.body["role"], 2);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    app.seed("Ana", Role::User).await;

    assert_eq!(login(&app, "", "secret-pw").await, StatusCode::BAD_REQUEST);
    assert_eq!(login(&app, "ana", "").await, StatusCode::BAD_REQUEST);
    assert_eq!(login(&app, "ana", "wrong").await, StatusCode::UNAUTHORIZED);
    assert_eq!(login(&app, "nobody", "secret-pw").await, StatusCode::UNAUTHORIZED);
}

async fn login(app: &TestApp, username: &str, password: &str) -> StatusCode {
    app.request(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await
    .status
}

#[tokio::test]
async fn test_login_upgrades_weak_hash() {
    let app = TestApp::new().await;
    let user = app.seed("Eva", Role::User).await;

    let weak = PasswordHasher::with_params(512, 1, 1)
        .unwrap()
        .hash("old-pw".to_string())
        .await
        .unwrap();
    app.state
        .repos
        .users
        .update_password_hash(user.id, weak.clone())
        .await
        .unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "eva@example.com", "password": "old-pw"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let stored = app
        .state
        .repos
        .users
        .find_model(user.id)
        .await
        .unwrap()
        .unwrap()
        .password_hash;
    assert_ne!(stored, weak);
    assert!(stored.contains("m=1024"));
}

#[tokio::test]
async fn test_login_fails_when_rehash_cannot_be_saved() {
    let app = TestApp::new().await;
    let user = app.seed("Ivo", Role::User).await;

    let weak = PasswordHasher::with_params(512, 1, 1)
        .unwrap()
        .hash("old-pw".to_string())
        .await
        .unwrap();
    app.state
        .repos
        .users
        .update_password_hash(user.id, weak.clone())
        .await
        .unwrap();

    app.state
        .db
        .execute_unprepared(
            "CREATE TRIGGER users_read_only BEFORE UPDATE ON users \
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .await
        .unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "ivo@example.com", "password": "old-pw"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.get("token").is_none());

    let stored = app
        .state
        .repos
        .users
        .find_model(user.id)
        .await
        .unwrap()
        .unwrap()
        .password_hash;
    assert_eq!(stored, weak);
}

#[tokio::test]
async fn test_blank_password_is_a_bad_request() {
    let app = TestApp::new().await;
    app.seed("Ana", Role::User).await;

    assert_eq!(
        login(&app, "ana@example.com", "   ").await,
        StatusCode::BAD_REQUEST
    );

    let response = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "blank@example.com", "password": "  "})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_ignores_unknown_role_from_anonymous_callers() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "mal@example.com", "password": "pw-123456", "role": 7})),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], 1);
}

#[tokio::test]
async fn test_register_rejects_unknown_role_from_admin() {
    let app = TestApp::new().await;
    let admin = app.seed("Root", Role::Admin).await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/register",
            Some(&admin.token),
            Some(json!({"email": "odd@example.com", "password": "pw-123456", "role": 7})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "validation_error");
}

#[tokio::test]
async fn test_register_forces_default_role_for_anonymous_callers() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "Mallory@Example.com", "password": "pw", "role": 0})),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], 1);
    assert_eq!(response.body["email"], "mallory@example.com");
    let id = response.body["id"].as_i64().unwrap();
    assert_eq!(
        response.headers[header::LOCATION],
        format!("/api/users/{id}").as_str()
    );

    let user = app.state.repos.users.get(id as i32).await.unwrap().unwrap();
    assert_eq!(user.role, Role::User);
    assert_eq!(user.name, "Mallory@Example.com");
}

#[tokio::test]
async fn test_register_role_from_non_admin_token_is_ignored() {
    let app = TestApp::new().await;
    let employer = app.seed("Boss", Role::Employer).await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/register",
            Some(&employer.token),
            Some(json!({"email": "x@example.com", "password": "pw", "role": 2})),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], 1);
}

#[tokio::test]
async fn test_register_honours_role_for_admin() {
    let app = TestApp::new().await;
    let admin = app.seed("Root", Role::Admin).await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/register",
            Some(&admin.token),
            Some(json!({"name": "Hiring", "email": "hr@example.com", "password": "pw", "role": 2})),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], 2);
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = TestApp::new().await;
    app.seed("Ana", Role::User).await;

    let blank_email = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "", "password": "pw"})),
        )
        .await;
    assert_eq!(blank_email.status, StatusCode::BAD_REQUEST);

    let no_password = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "a@b.com"})),
        )
        .await;
    assert_eq!(no_password.status, StatusCode::BAD_REQUEST);

    let duplicate = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "ANA@example.com", "password": "pw"})),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["detail"], "Email already in use.");
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;
    let admin = app.seed("Root", Role::Admin).await;

    let response = app
        .post("/api/companies", &admin.token, json!({"description": "no name"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["detail"].is_string());
}
