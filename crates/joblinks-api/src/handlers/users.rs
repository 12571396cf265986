//! User handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use joblinks_db::UserRecord;
use joblinks_models::policy::users as policy;
use joblinks_models::{NewUser, User, UserFilter, UserUpdate};
use tracing::info;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ensure_same_id, ApiJson, ApiPath, ApiQuery};
use crate::security::{sanitize_optional, sanitize_title};
use crate::state::AppState;

/// `GET /api/users`. Unfiltered listing is Admin-only.
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> ApiResult<Json<Vec<User>>> {
    policy::list(&user.actor, &filter).check()?;
    Ok(Json(state.repos.users.list(&filter).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<User>> {
    policy::read(&user.actor, id).check()?;
    let found = state
        .repos
        .users
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(found))
}

/// `POST /api/users`: Admin creates an account with a plaintext password.
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<NewUser>,
) -> ApiResult<Response> {
    policy::create(&user.actor).check()?;
    request.validate()?;

    if state.repos.users.email_exists(&request.email).await? {
        return Err(ApiError::conflict("Email already in use."));
    }

    let password_hash = state.hasher.hash(request.password).await?;
    let created_user = state
        .repos
        .users
        .create(UserRecord {
            name: sanitize_title(&request.name),
            email: request.email,
            password_hash,
            phone_number: request.phone_number,
            nationality: request.nationality,
            job_preference: request.job_preference,
            profile_bio: sanitize_optional(request.profile_bio),
            do_b: request.do_b,
            role: request.role,
        })
        .await?;

    info!(
        admin_id = user.actor.user_id,
        user_id = created_user.user_id,
        "Admin created user"
    );
    Ok(created(
        format!("/api/users/{}", created_user.user_id),
        created_user,
    ))
}

/// `PUT /api/users/{id}`. Self-service edits silently keep email and role.
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<UserUpdate>,
) -> ApiResult<StatusCode> {
    ensure_same_id(id, request.user_id)?;
    let scope = policy::update(&user.actor, id)?;
    request.validate()?;

    let mut update = request.restrict_to(scope);
    update.name = sanitize_title(&update.name);
    update.profile_bio = sanitize_optional(update.profile_bio);

    state.repos.users.update(id, &update).await?;
    info!(actor_id = user.actor.user_id, user_id = id, ?scope, "Updated user");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    policy::delete(&user.actor).check()?;
    state.repos.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
