//! Chat membership handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use joblinks_models::policy::chat_users as policy;
use joblinks_models::{ChatUser, ChatUserInput};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ApiJson, ApiPath};
use crate::state::AppState;

pub async fn list_chat_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<ChatUser>>> {
    let scope = policy::list(&user.actor);
    Ok(Json(state.repos.chat_users.list(scope).await?))
}

pub async fn get_chat_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<ChatUser>> {
    let row = state
        .repos
        .chat_users
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Chat user not found"))?;
    let is_member = state
        .repos
        .chat_users
        .is_chat_member(row.chat_id, user.actor.user_id)
        .await?;
    policy::read(&user.actor, row.user_id, is_member).check()?;
    Ok(Json(row))
}

pub async fn create_chat_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<ChatUserInput>,
) -> ApiResult<Response> {
    let is_member = state
        .repos
        .chat_users
        .is_chat_member(input.chat_id, user.actor.user_id)
        .await?;
    policy::create(&user.actor, input.user_id, is_member).check()?;

    let row = state.repos.chat_users.create(input).await?;
    Ok(created(format!("/api/chatusers/{}", row.chat_user_id), row))
}

pub async fn delete_chat_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    let row = state
        .repos
        .chat_users
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Chat user not found"))?;
    policy::delete(&user.actor, row.user_id).check()?;

    state.repos.chat_users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
