use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Chat membership. `(chat_id, user_id)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub chat_user_id: i32,

    pub chat_id: i32,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for joblinks_models::ChatUser {
    fn from(m: Model) -> Self {
        Self {
            chat_user_id: m.chat_user_id,
            chat_id: m.chat_id,
            user_id: m.user_id,
        }
    }
}
