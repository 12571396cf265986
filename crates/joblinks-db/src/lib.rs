//! Relational persistence for JobLinks.
//!
//! This crate provides:
//! - Connection management and migrations over SeaORM
//! - Typed repositories for every resource
//! - Membership predicates consumed by the authorization policy
//! - Constraint-violation and optimistic-concurrency error mapping

pub mod application_repo;
pub mod chat_repo;
pub mod client;
pub mod company_repo;
pub mod error;
pub mod metrics;
pub mod opportunity_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepository;
pub use chat_repo::{ChatRepository, ChatUserRepository};
pub use client::{connect, connect_in_memory, migrate, ping, DbConfig};
pub use company_repo::{CompanyMemberRepository, CompanyRepository};
pub use error::{DbError, DbResult};
pub use opportunity_repo::OpportunityRepository;
pub use user_repo::{normalize_email, UserRecord, UserRepository};

pub use sea_orm::DatabaseConnection;

/// Every repository, sharing one connection pool.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub companies: CompanyRepository,
    pub company_members: CompanyMemberRepository,
    pub opportunities: OpportunityRepository,
    pub applications: ApplicationRepository,
    pub chats: ChatRepository,
    pub chat_users: ChatUserRepository,
}

impl Repositories {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            companies: CompanyRepository::new(db.clone()),
            company_members: CompanyMemberRepository::new(db.clone()),
            opportunities: OpportunityRepository::new(db.clone()),
            applications: ApplicationRepository::new(db.clone()),
            chats: ChatRepository::new(db.clone()),
            chat_users: ChatUserRepository::new(db),
        }
    }
}
