//! Role-aware view models.

use joblinks_models::{Opportunity, Role, User, UserFilter};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ClientResult;

pub const USE_FILTERS_MESSAGE: &str = "Use filters to find candidates.";

/// Payload of `GET /users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersView {
    pub role: Role,
    pub filter: UserFilter,
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Admins browse everyone, employers must filter, applicants see themselves.
pub async fn users_view(
    client: &ApiClient,
    token: &str,
    filter: UserFilter,
) -> ClientResult<UsersView> {
    let me = client.me(token).await?;
    let (users, message) = match me.role {
        Role::Admin => (client.list_users(token, &filter).await?, None),
        Role::Employer if !filter.is_filtered() => {
            (Vec::new(), Some(USE_FILTERS_MESSAGE.to_string()))
        }
        Role::Employer => (client.list_users(token, &filter).await?, None),
        Role::User => (vec![client.get_user(token, me.user_id).await?], None),
    };

    Ok(UsersView {
        role: me.role,
        filter,
        users,
        message,
    })
}

/// Blank application for the caller, pre-filled when an opportunity was picked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub user_id: i32,
    pub opportunity_id: Option<i32>,
    pub cover_letter: Option<String>,
}

/// Payload of `GET /applications/new`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraftView {
    pub draft: ApplicationDraft,
    pub opportunities: Vec<Opportunity>,
}

pub async fn application_draft_view(
    client: &ApiClient,
    token: &str,
    opportunity_id: Option<i32>,
) -> ClientResult<ApplicationDraftView> {
    let me = client.me(token).await?;
    let opportunities = client.list_opportunities(token).await?;
    let opportunity_id = opportunity_id.filter(|id| opportunities.iter().any(|o| o.id == *id));

    Ok(ApplicationDraftView {
        draft: ApplicationDraft {
            user_id: me.user_id,
            opportunity_id,
            cover_letter: None,
        },
        opportunities,
    })
}
