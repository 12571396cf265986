//! Chat handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use joblinks_models::policy::chats as policy;
use joblinks_models::Chat;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ApiPath};
use crate::state::AppState;

pub async fn list_chats(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Chat>>> {
    let scope = policy::list(&user.actor);
    Ok(Json(state.repos.chats.list(scope).await?))
}

pub async fn get_chat(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Chat>> {
    let chat = state
        .repos
        .chats
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Chat not found"))?;
    let is_member = chat.chat_users.contains(&user.actor.user_id);
    policy::read(&user.actor, is_member).check()?;
    Ok(Json(chat))
}

/// `POST /api/chats`. Any body is ignored; the caller becomes creator and first member.
pub async fn create_chat(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Response> {
    let chat = state.repos.chats.create(user.actor.user_id).await?;
    Ok(created(format!("/api/chats/{}", chat.chat_id), chat))
}

pub async fn delete_chat(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    policy::delete(&user.actor).check()?;
    state.repos.chats.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
