//! Job application models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("unknown application status: {other}")),
        }
    }
}

/// Application of a user to an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i32,
    pub user_id: i32,
    pub opportunity_id: i32,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub cover_letter: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// Body of application create/update.
///
/// `userId` is required when an Admin applies on someone's behalf; for
/// applicants it is overwritten with their own id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub user_id: Option<i32>,
    pub opportunity_id: i32,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    #[validate(length(max = 8000))]
    pub cover_letter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Accepted".parse::<ApplicationStatus>(), Ok(ApplicationStatus::Accepted));
        assert!("hired".parse::<ApplicationStatus>().is_err());
        assert_eq!(ApplicationStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_input_defaults() {
        let input: ApplicationInput =
            serde_json::from_str(r#"{"opportunityId": 3}"#).unwrap();
        assert_eq!(input.opportunity_id, 3);
        assert!(input.user_id.is_none());
        assert!(input.status.is_none());
    }
}
