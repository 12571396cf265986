use joblinks_models::ApplicationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    pub opportunity_id: i32,

    /// One of `pending`, `reviewed`, `accepted`, `rejected`.
    pub status: String,
    pub cover_letter: Option<String>,
    pub applied_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for joblinks_models::Application {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            opportunity_id: m.opportunity_id,
            status: m.status.parse().unwrap_or(ApplicationStatus::Pending),
            cover_letter: m.cover_letter,
            applied_at: m.applied_at,
        }
    }
}
