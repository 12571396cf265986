//! Opportunity handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use joblinks_models::policy::opportunities as policy;
use joblinks_models::{Opportunity, OpportunityInput};
use tracing::info;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ensure_same_id, ApiJson, ApiPath};
use crate::security::{sanitize_optional, sanitize_title};
use crate::state::AppState;

/// Membership of the caller in `company_id`, or `None` when there is no company.
async fn membership(
    state: &AppState,
    user: &AuthUser,
    company_id: Option<i32>,
) -> ApiResult<Option<bool>> {
    match company_id {
        None => Ok(None),
        Some(_) if !user.actor.is_employer() => Ok(Some(false)),
        Some(company_id) => Ok(Some(
            state
                .repos
                .company_members
                .is_company_member(company_id, user.actor.user_id)
                .await?,
        )),
    }
}

fn prepare(mut input: OpportunityInput) -> ApiResult<OpportunityInput> {
    input.validate()?;
    input.title = sanitize_title(&input.title);
    input.description = sanitize_optional(input.description);
    input.location = sanitize_optional(input.location);
    Ok(input)
}

pub async fn list_opportunities(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<Opportunity>>> {
    Ok(Json(state.repos.opportunities.list().await?))
}

pub async fn get_opportunity(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Opportunity>> {
    let opportunity = state
        .repos
        .opportunities
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Opportunity not found"))?;
    Ok(Json(opportunity))
}

/// `POST /api/opportunities`. `createdBy` is always the caller.
pub async fn create_opportunity(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<OpportunityInput>,
) -> ApiResult<Response> {
    let is_member = membership(&state, &user, input.company_id).await?;
    policy::create(&user.actor, is_member).check()?;
    let input = prepare(input)?;

    let opportunity = state
        .repos
        .opportunities
        .create(&input, user.actor.user_id)
        .await?;
    info!(
        opportunity_id = opportunity.id,
        company_id = ?opportunity.company_id,
        actor_id = user.actor.user_id,
        "Created opportunity"
    );
    Ok(created(
        format!("/api/opportunities/{}", opportunity.id),
        opportunity,
    ))
}

/// `PUT /api/opportunities/{id}`.
///
/// Employers need membership in the stored company and, when the body moves
/// the opportunity elsewhere, in the destination company too.
pub async fn update_opportunity(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<OpportunityInput>,
) -> ApiResult<StatusCode> {
    ensure_same_id(id, input.id)?;

    let existing = state
        .repos
        .opportunities
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Opportunity not found"))?;

    let stored = membership(&state, &user, existing.company_id).await?;
    policy::update(&user.actor, stored).check()?;
    if input.company_id != existing.company_id {
        let target = membership(&state, &user, input.company_id).await?;
        policy::update(&user.actor, target).check()?;
    }

    let input = prepare(input)?;
    state.repos.opportunities.update(id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_opportunity(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    policy::delete(&user.actor).check()?;
    state.repos.opportunities.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
