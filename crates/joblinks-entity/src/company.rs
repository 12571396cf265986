use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub company_id: i32,

    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for joblinks_models::Company {
    fn from(m: Model) -> Self {
        Self {
            company_id: m.company_id,
            name: m.name,
            description: m.description,
            website: m.website,
            location: m.location,
        }
    }
}
