//! User role enumeration.

use std::fmt;

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse capability tier attached to every user.
///
/// On the wire and in storage a role is its integer code:
/// `0` = Admin, `1` = User (applicant), `2` = Employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    /// Full access to every resource.
    Admin,
    /// Self-service applicant.
    #[default]
    User,
    /// Company-scoped management.
    Employer,
}

/// Raised when an integer does not name a known role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown role code: {0}")]
pub struct UnknownRole(pub i32);

impl Role {
    /// Integer code used on the wire, in storage and in token claims.
    pub fn code(self) -> i32 {
        match self {
            Role::Admin => 0,
            Role::User => 1,
            Role::Employer => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Employer => "employer",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn is_employer(self) -> bool {
        self == Role::Employer
    }
}

impl TryFrom<i32> for Role {
    type Error = UnknownRole;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Role::Admin),
            1 => Ok(Role::User),
            2 => Ok(Role::Employer),
            other => Err(UnknownRole(other)),
        }
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl JsonSchema for Role {
    fn schema_name() -> String {
        "Role".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <i32>::json_schema(gen)
    }
}
