//! Company membership handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use joblinks_models::policy::company_members as policy;
use joblinks_models::{CompanyMember, CompanyMemberInput};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ApiJson, ApiPath};
use crate::state::AppState;

async fn actor_is_member(state: &AppState, user: &AuthUser, company_id: i32) -> ApiResult<bool> {
    if !user.actor.is_employer() {
        return Ok(false);
    }
    Ok(state
        .repos
        .company_members
        .is_company_member(company_id, user.actor.user_id)
        .await?)
}

pub async fn list_company_members(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<CompanyMember>>> {
    Ok(Json(state.repos.company_members.list().await?))
}

pub async fn get_company_member(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<CompanyMember>> {
    let member = state
        .repos
        .company_members
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("CompanyMember not found"))?;
    Ok(Json(member))
}

pub async fn create_company_member(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CompanyMemberInput>,
) -> ApiResult<Response> {
    let is_member = actor_is_member(&state, &user, input.company_id).await?;
    policy::create(&user.actor, is_member).check()?;

    let member = state.repos.company_members.create(input).await?;
    info!(
        company_id = member.company_id,
        user_id = member.user_id,
        actor_id = user.actor.user_id,
        "Added company member"
    );
    Ok(created(
        format!("/api/companymembers/{}", member.company_member_id),
        member,
    ))
}

pub async fn delete_company_member(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    let member = state
        .repos
        .company_members
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("CompanyMember not found"))?;

    let is_member = actor_is_member(&state, &user, member.company_id).await?;
    policy::delete(&user.actor, is_member).check()?;

    state.repos.company_members.delete(id).await?;
    info!(
        company_id = member.company_id,
        user_id = member.user_id,
        actor_id = user.actor.user_id,
        "Removed company member"
    );
    Ok(StatusCode::NO_CONTENT)
}
