//! User profile models.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Role;

/// User record as returned by the API.
///
/// The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i32,
    pub name: String,
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
    #[serde(default)]
    pub role: Role,
}

/// Body of an Admin-only `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
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
    #[serde(default)]
    pub role: Role,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Which fields of a user record the caller may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserUpdateScope {
    /// Admin: every profile field plus email and role.
    Full,
    /// Owner: profile fields only; email, role and password stay put.
    SelfService,
}

/// Body of `PUT /api/users/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub user_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
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
    #[serde(default)]
    pub role: Option<Role>,
    /// Accepted for wire compatibility; never applied through this endpoint.
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
}

impl UserUpdate {
    /// Drop the fields the given scope is not allowed to touch.
    pub fn restrict_to(mut self, scope: UserUpdateScope) -> Self {
        if scope == UserUpdateScope::SelfService {
            self.email = None;
            self.role = None;
        }
        self.password_hash = None;
        self
    }
}

/// Query string of `GET /api/users`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(default)]
    pub job_preference: Option<i32>,
    #[serde(default)]
    pub nationality: Option<i32>,
}

impl UserFilter {
    pub fn is_filtered(&self) -> bool {
        self.job_preference.is_some() || self.nationality.is_some()
    }

    /// Render as a query string (without the leading `?`).
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(pref) = self.job_preference {
            parts.push(format!("jobPreference={pref}"));
        }
        if let Some(nat) = self.nationality {
            parts.push(format!("nationality={nat}"));
        }
        parts.join("&")
    }
}
