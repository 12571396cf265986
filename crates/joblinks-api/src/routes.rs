//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::applications::{
    create_application, delete_application, get_application, list_applications,
    update_application,
};
use crate::handlers::auth::{login, me, register};
use crate::handlers::chat_users::{
    create_chat_user, delete_chat_user, get_chat_user, list_chat_users,
};
use crate::handlers::chats::{create_chat, delete_chat, get_chat, list_chats};
use crate::handlers::companies::{
    create_company, delete_company, get_company, list_companies, update_company,
};
use crate::handlers::company_members::{
    create_company_member, delete_company_member, get_company_member, list_company_members,
};
use crate::handlers::opportunities::{
    create_opportunity, delete_opportunity, get_opportunity, list_opportunities,
    update_opportunity,
};
use crate::handlers::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::handlers::{health, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, mask_internal_errors, rate_limit_middleware, request_id, request_logging,
    security_headers, RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me));

    let resource_routes = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route(
            "/companymembers",
            get(list_company_members).post(create_company_member),
        )
        .route(
            "/companymembers/:id",
            get(get_company_member).delete(delete_company_member),
        )
        .route(
            "/opportunities",
            get(list_opportunities).post(create_opportunity),
        )
        .route(
            "/opportunities/:id",
            get(get_opportunity)
                .put(update_opportunity)
                .delete(delete_opportunity),
        )
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/applications/:id",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
        .route("/chats", get(list_chats).post(create_chat))
        .route("/chats/:id", get(get_chat).delete(delete_chat))
        .route("/chatusers", get(list_chat_users).post(create_chat_user))
        .route(
            "/chatusers/:id",
            get(get_chat_user).delete(delete_chat_user),
        );

    let rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(resource_routes)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let metrics_routes = match metrics_handle {
        Some(handle) => Router::new().route("/metrics", get(move || async move { handle.render() })),
        None => Router::new(),
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(middleware::from_fn_with_state(
            state.config.is_production(),
            mask_internal_errors,
        ))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
