//! Login and registration payloads.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Role;

/// Body of `POST /api/auth/login`. `username` matches either email or name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Signed bearer token plus its expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub nationality: Option<i32>,
    #[serde(default)]
    pub job_preference: Option<i32>,
    #[serde(default)]
    pub profile_bio: Option<String>,
    #[serde(default)]
    pub do_b: Option<NaiveDate>,
    /// Raw role code, honoured only when an Admin is registering someone
    /// else. Kept as an integer so an unknown code from anyone else is ignored
    /// rather than rejected.
    #[serde(default)]
    pub role: Option<i32>,
    #[serde(default)]
    pub password: String,
}

/// Response of a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

/// Identity of the caller, as carried by their token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: i32,
    pub name: String,
    pub role: Role,
}
