use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership mapping between users and companies. `(company_id, user_id)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub company_member_id: i32,

    pub company_id: i32,
    pub user_id: i32,
    pub joined_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for joblinks_models::CompanyMember {
    fn from(m: Model) -> Self {
        Self {
            company_member_id: m.company_member_id,
            company_id: m.company_id,
            user_id: m.user_id,
            joined_at: m.joined_at,
        }
    }
}
