//! Company and company membership models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Company record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub company_id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Body of company create/update. `companyId` is optional on create; on
/// update it must match the path when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    #[serde(default)]
    pub company_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Membership row linking a user to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMember {
    pub company_member_id: i32,
    pub company_id: i32,
    pub user_id: i32,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMemberInput {
    pub company_id: i32,
    pub user_id: i32,
}
