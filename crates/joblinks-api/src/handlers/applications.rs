//! Application handlers. Applicants see and submit their own; Admins manage all.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use joblinks_models::policy::applications as policy;
use joblinks_models::{Application, ApplicationInput};
use tracing::info;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ensure_same_id, ApiJson, ApiPath};
use crate::security::sanitize_optional;
use crate::state::AppState;

pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Application>>> {
    let scope = policy::list(&user.actor);
    Ok(Json(state.repos.applications.list(scope).await?))
}

pub async fn get_application(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Application>> {
    let application = state
        .repos
        .applications
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;
    policy::read(&user.actor, application.user_id).check()?;
    Ok(Json(application))
}

/// `POST /api/applications`. Applicants always apply as themselves.
pub async fn create_application(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(mut input): ApiJson<ApplicationInput>,
) -> ApiResult<Response> {
    let applicant = policy::create_for(&user.actor, input.user_id)?
        .ok_or_else(|| ApiError::bad_request("userId is required."))?;
    input.validate()?;
    input.cover_letter = sanitize_optional(input.cover_letter);

    let application = state.repos.applications.create(applicant, &input).await?;
    info!(
        application_id = application.id,
        actor_id = user.actor.user_id,
        "Submitted application"
    );
    Ok(created(
        format!("/api/applications/{}", application.id),
        application,
    ))
}

pub async fn update_application(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(mut input): ApiJson<ApplicationInput>,
) -> ApiResult<StatusCode> {
    ensure_same_id(id, input.id)?;
    policy::update(&user.actor).check()?;
    input.validate()?;
    input.cover_letter = sanitize_optional(input.cover_letter);

    state.repos.applications.update(id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_application(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    policy::delete(&user.actor).check()?;
    state.repos.applications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
