//! Job opportunity models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Opportunity published by a company (or directly by an Admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: i32,
    #[serde(default)]
    pub company_id: Option<i32>,
    #[serde(default)]
    pub created_by: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_preference: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityInput {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub company_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 8000))]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_preference: Option<i32>,
}
