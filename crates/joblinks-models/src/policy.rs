//! Authorization policy matrix.
//!
//! Every function here is pure: it takes the acting user plus the relation
//! facts the caller already looked up (company membership, chat membership,
//! row ownership) and returns a decision. Identity failures never reach this
//! module; a request without a valid token is rejected with 401 before any
//! policy is consulted.

use thiserror::Error;

use crate::{Role, UserFilter, UserUpdateScope};

const ADMIN_ONLY: &str = "Admin access required.";

/// Authenticated caller, as established from the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_employer(&self) -> bool {
        self.role.is_employer()
    }

    pub fn is(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Forbid(Option<&'static str>),
}

impl Decision {
    fn when(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Forbid(None)
        }
    }

    fn when_or(allowed: bool, reason: &'static str) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Forbid(Some(reason))
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert into a `Result` so handlers can use `?`.
    pub fn check(self) -> Result<(), Forbidden> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Forbid(reason) => Err(Forbidden { reason }),
        }
    }
}

/// Authorization denial, optionally carrying the violated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", self.reason())]
pub struct Forbidden {
    reason: Option<&'static str>,
}

impl Forbidden {
    pub fn reason(&self) -> &'static str {
        self.reason.unwrap_or("Access denied.")
    }
}

/// Which rows a list endpoint may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    /// Only rows belonging to (or, for chats, joined by) this user.
    Own(i32),
}

fn list_scope(actor: &Actor) -> ListScope {
    if actor.is_admin() {
        ListScope::All
    } else {
        ListScope::Own(actor.user_id)
    }
}

/// Membership-gated write shared by companies, company members and opportunities:
/// Admin always, Employer only with membership, anyone else never.
fn admin_or_member_employer(actor: &Actor, is_member: bool, reason: &'static str) -> Decision {
    match actor.role {
        Role::Admin => Decision::Allow,
        Role::Employer => Decision::when_or(is_member, reason),
        Role::User => Decision::Forbid(None),
    }
}

pub mod users {
    use super::*;

    pub fn list(actor: &Actor, filter: &UserFilter) -> Decision {
        if filter.is_filtered() {
            Decision::when(actor.is_admin() || actor.is_employer())
        } else if actor.is_employer() {
            Decision::Forbid(Some(
                "Employers must filter by jobPreference or nationality.",
            ))
        } else {
            Decision::when(actor.is_admin())
        }
    }

    pub fn read(actor: &Actor, user_id: i32) -> Decision {
        Decision::when(actor.is_admin() || actor.is(user_id))
    }

    pub fn create(actor: &Actor) -> Decision {
        Decision::when_or(actor.is_admin(), ADMIN_ONLY)
    }

    /// Admins may edit anyone; everyone else only themselves, and only profile fields.
    pub fn update(actor: &Actor, user_id: i32) -> Result<UserUpdateScope, Forbidden> {
        if actor.is_admin() {
            Ok(UserUpdateScope::Full)
        } else if actor.is(user_id) {
            Ok(UserUpdateScope::SelfService)
        } else {
            Err(Forbidden {
                reason: Some("You can only update your own profile."),
            })
        }
    }

    pub fn delete(actor: &Actor) -> Decision {
        Decision::when_or(actor.is_admin(), ADMIN_ONLY)
    }
}

pub mod companies {
    use super::*;

    pub fn create(actor: &Actor) -> Decision {
        Decision::when(actor.is_admin() || actor.is_employer())
    }

    pub fn update(actor: &Actor, is_member: bool) -> Decision {
        admin_or_member_employer(
            actor,
            is_member,
            "You can only update companies you're a member of.",
        )
    }

    pub fn delete(actor: &Actor) -> Decision {
        Decision::when_or(actor.is_admin(), ADMIN_ONLY)
    }
}

pub mod company_members {
    use super::*;

    pub fn create(actor: &Actor, is_member: bool) -> Decision {
        admin_or_member_employer(
            actor,
            is_member,
            "You can only add members to companies you're a member of.",
        )
    }

    pub fn delete(actor: &Actor, is_member: bool) -> Decision {
        admin_or_member_employer(
            actor,
            is_member,
            "You can only remove members from companies you're a member of.",
        )
    }
}

pub mod opportunities {
    use super::*;

    /// `membership` is `None` when the opportunity has no company.
    pub fn create(actor: &Actor, membership: Option<bool>) -> Decision {
        admin_or_member_employer(
            actor,
            membership.unwrap_or(true),
            "You can only create opportunities for companies you're a member of.",
        )
    }

    /// `membership` is `None` when the opportunity has no company.
    pub fn update(actor: &Actor, membership: Option<bool>) -> Decision {
        admin_or_member_employer(
            actor,
            membership.unwrap_or(true),
            "You can only update opportunities for companies you're a member of.",
        )
    }

    pub fn delete(actor: &Actor) -> Decision {
        Decision::when_or(actor.is_admin(), ADMIN_ONLY)
    }
}

pub mod applications {
    use super::*;

    pub fn list(actor: &Actor) -> ListScope {
        list_scope(actor)
    }

    pub fn read(actor: &Actor, owner_id: i32) -> Decision {
        Decision::when(actor.is_admin() || actor.is(owner_id))
    }

    /// Resolve the applicant of a new application.
    ///
    /// Admins apply for whoever they name (`None` if they named nobody);
    /// applicants always apply for themselves; employers cannot apply.
    pub fn create_for(actor: &Actor, requested: Option<i32>) -> Result<Option<i32>, Forbidden> {
        match actor.role {
            Role::Admin => Ok(requested),
            Role::User => Ok(Some(actor.user_id)),
            Role::Employer => Err(Forbidden {
                reason: Some("Employers cannot submit applications."),
            }),
        }
    }

    pub fn update(actor: &Actor) -> Decision {
        Decision::when_or(actor.is_admin(), ADMIN_ONLY)
    }

    pub fn delete(actor: &Actor) -> Decision {
        Decision::when_or(actor.is_admin(), ADMIN_ONLY)
    }
}

pub mod chats {
    use super::*;

    pub fn list(actor: &Actor) -> ListScope {
        list_scope(actor)
    }

    pub fn read(actor: &Actor, is_member: bool) -> Decision {
        Decision::when(actor.is_admin() || is_member)
    }

    pub fn delete(actor: &Actor) -> Decision {
        Decision::when_or(actor.is_admin(), ADMIN_ONLY)
    }
}

pub mod chat_users {
    use super::*;

    pub fn list(actor: &Actor) -> ListScope {
        list_scope(actor)
    }

    pub fn read(actor: &Actor, row_user_id: i32, is_chat_member: bool) -> Decision {
        Decision::when(actor.is_admin() || actor.is(row_user_id) || is_chat_member)
    }

    /// Self-join is always allowed; members may invite others; Admins add anyone.
    pub fn create(actor: &Actor, target_user_id: i32, is_chat_member: bool) -> Decision {
        Decision::when_or(
            actor.is_admin() || actor.is(target_user_id) || is_chat_member,
            "You can only add yourself to chats.",
        )
    }

    pub fn delete(actor: &Actor, row_user_id: i32) -> Decision {
        Decision::when_or(
            actor.is_admin() || actor.is(row_user_id),
            "You can only remove yourself from chats.",
        )
    }
}
