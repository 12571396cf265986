use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub chat_id: i32,

    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Attach the member ids loaded from `chat_users`.
    pub fn into_chat(self, members: Vec<i32>) -> joblinks_models::Chat {
        joblinks_models::Chat {
            chat_id: self.chat_id,
            created_by: self.created_by,
            created_at: self.created_at,
            chat_users: members,
        }
    }
}
