//! Shared data models for the JobLinks backend.
//!
//! This crate provides Serde-serializable types for:
//! - Users, companies, opportunities, applications and chats
//! - Login and registration payloads
//! - The closed `Role` enumeration
//! - The authorization policy matrix (`policy`)

pub mod application;
pub mod auth;
pub mod chat;
pub mod company;
pub mod opportunity;
pub mod policy;
pub mod role;
pub mod user;

// Re-export common types
pub use application::{Application, ApplicationInput, ApplicationStatus};
pub use auth::{CurrentUser, LoginRequest, RegisterRequest, RegisteredUser, TokenResponse};
pub use chat::{Chat, ChatUser, ChatUserInput};
pub use company::{Company, CompanyInput, CompanyMember, CompanyMemberInput};
pub use opportunity::{Opportunity, OpportunityInput};
pub use policy::{Actor, Decision, Forbidden, ListScope};
pub use role::{Role, UnknownRole};
pub use user::{NewUser, User, UserFilter, UserUpdate, UserUpdateScope};
