//! SeaORM entities for the JobLinks relational schema.
//!
//! Each module maps one table. Conversions into the wire types in
//! `joblinks-models` live next to the entity so the password hash never
//! escapes the persistence layer by accident.

pub mod application;
pub mod chat;
pub mod chat_user;
pub mod company;
pub mod company_member;
pub mod opportunity;
pub mod user;

pub use application::Entity as Application;
pub use chat::Entity as Chat;
pub use chat_user::Entity as ChatUser;
pub use company::Entity as Company;
pub use company_member::Entity as CompanyMember;
pub use opportunity::Entity as Opportunity;
pub use user::Entity as User;
