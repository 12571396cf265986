use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "opportunities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Nullable: Admins and unaffiliated employers may post without a company.
    pub company_id: Option<i32>,
    /// Nulled when the author is deleted.
    pub created_by: Option<i32>,

    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_preference: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for joblinks_models::Opportunity {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            company_id: m.company_id,
            created_by: m.created_by,
            title: m.title,
            description: m.description,
            location: m.location,
            job_preference: m.job_preference,
            created_at: m.created_at,
        }
    }
}
