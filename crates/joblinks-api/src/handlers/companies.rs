//! Company handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use joblinks_models::policy::companies as policy;
use joblinks_models::{Company, CompanyInput};
use tracing::info;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ensure_same_id, ApiJson, ApiPath};
use crate::security::{sanitize_optional, sanitize_title, validate_website};
use crate::state::AppState;

/// Validate and normalize a company body before it reaches the repository.
fn prepare(mut input: CompanyInput) -> ApiResult<CompanyInput> {
    input.validate()?;
    input.name = sanitize_title(&input.name);
    input.description = sanitize_optional(input.description);
    input.location = sanitize_optional(input.location);
    input.website = match input.website.filter(|w| !w.trim().is_empty()) {
        Some(website) => Some(
            validate_website(&website)
                .into_result()
                .map_err(|msg| ApiError::Validation(format!("website: {msg}")))?,
        ),
        None => None,
    };
    Ok(input)
}

pub async fn list_companies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Json<Vec<Company>>> {
    Ok(Json(state.repos.companies.list().await?))
}

pub async fn get_company(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Company>> {
    let company = state
        .repos
        .companies
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;
    Ok(Json(company))
}

pub async fn create_company(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<CompanyInput>,
) -> ApiResult<Response> {
    policy::create(&user.actor).check()?;
    let input = prepare(input)?;

    let company = state.repos.companies.create(&input).await?;
    info!(
        company_id = company.company_id,
        actor_id = user.actor.user_id,
        "Created company"
    );
    Ok(created(
        format!("/api/companies/{}", company.company_id),
        company,
    ))
}

/// `PUT /api/companies/{id}`. Employers must already be members.
pub async fn update_company(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<CompanyInput>,
) -> ApiResult<StatusCode> {
    ensure_same_id(id, input.company_id)?;

    let is_member = user.actor.is_employer()
        && state
            .repos
            .company_members
            .is_company_member(id, user.actor.user_id)
            .await?;
    policy::update(&user.actor, is_member).check()?;

    let input = prepare(input)?;
    state.repos.companies.update(id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_company(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    policy::delete(&user.actor).check()?;
    state.repos.companies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
