//! Repositories for chats and chat membership.

use std::collections::HashMap;

use chrono::Utc;
use joblinks_entity::{chat, chat_user};
use joblinks_models::{Chat, ChatUser, ChatUserInput, ListScope};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::metrics::timed;

/// Repository for the `chats` table. Reads attach member ids.
#[derive(Clone)]
pub struct ChatRepository {
    db: DatabaseConnection,
}

impl ChatRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All chats, or only those `ListScope::Own` user belongs to.
    pub async fn list(&self, scope: ListScope) -> DbResult<Vec<Chat>> {
        timed("chats.list", async {
            let mut query = chat::Entity::find();
            if let ListScope::Own(user_id) = scope {
                let joined: Vec<i32> = chat_user::Entity::find()
                    .select_only()
                    .column(chat_user::Column::ChatId)
                    .filter(chat_user::Column::UserId.eq(user_id))
                    .into_tuple()
                    .all(&self.db)
                    .await?;
                query = query.filter(chat::Column::ChatId.is_in(joined));
            }
            let chats = query.order_by_asc(chat::Column::ChatId).all(&self.db).await?;

            let ids: Vec<i32> = chats.iter().map(|c| c.chat_id).collect();
            let mut members = members_by_chat(&self.db, ids).await?;
            Ok(chats
                .into_iter()
                .map(|c| {
                    let ids = members.remove(&c.chat_id).unwrap_or_default();
                    c.into_chat(ids)
                })
                .collect())
        })
        .await
    }

    pub async fn get(&self, chat_id: i32) -> DbResult<Option<Chat>> {
        timed("chats.get", async {
            let Some(row) = chat::Entity::find_by_id(chat_id).one(&self.db).await? else {
                return Ok(None);
            };
            let mut members = members_by_chat(&self.db, vec![chat_id]).await?;
            Ok(Some(row.into_chat(members.remove(&chat_id).unwrap_or_default())))
        })
        .await
    }

    /// Create a chat owned by `created_by` and enrol the creator as its first member.
    pub async fn create(&self, created_by: i32) -> DbResult<Chat> {
        timed("chats.create", async {
            let txn = self.db.begin().await?;
            let row = chat::ActiveModel {
                created_by: Set(Some(created_by)),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            chat_user::ActiveModel {
                chat_id: Set(row.chat_id),
                user_id: Set(created_by),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            txn.commit().await?;

            info!(chat_id = row.chat_id, created_by, "Created chat");
            Ok(row.into_chat(vec![created_by]))
        })
        .await
    }

    pub async fn delete(&self, chat_id: i32) -> DbResult<()> {
        timed("chats.delete", async {
            let result = chat::Entity::delete_by_id(chat_id).exec(&self.db).await?;
            if result.rows_affected == 0 {
                return Err(DbError::NotFound("Chat"));
            }
            info!(chat_id, "Deleted chat");
            Ok(())
        })
        .await
    }
}

async fn members_by_chat<C: ConnectionTrait>(
    db: &C,
    chat_ids: Vec<i32>,
) -> DbResult<HashMap<i32, Vec<i32>>> {
    if chat_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = chat_user::Entity::find()
        .filter(chat_user::Column::ChatId.is_in(chat_ids))
        .order_by_asc(chat_user::Column::ChatUserId)
        .all(db)
        .await?;

    let mut members: HashMap<i32, Vec<i32>> = HashMap::new();
    for row in rows {
        members.entry(row.chat_id).or_default().push(row.user_id);
    }
    Ok(members)
}

/// Repository for the `chat_users` table.
#[derive(Clone)]
pub struct ChatUserRepository {
    db: DatabaseConnection,
}

impl ChatUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, scope: ListScope) -> DbResult<Vec<ChatUser>> {
        timed("chat_users.list", async {
            let mut query = chat_user::Entity::find();
            if let ListScope::Own(user_id) = scope {
                query = query.filter(chat_user::Column::UserId.eq(user_id));
            }
            let rows = query
                .order_by_asc(chat_user::Column::ChatUserId)
                .all(&self.db)
                .await?;
            Ok(rows.into_iter().map(ChatUser::from).collect())
        })
        .await
    }

    pub async fn get(&self, id: i32) -> DbResult<Option<ChatUser>> {
        timed("chat_users.get", async {
            let row = chat_user::Entity::find_by_id(id).one(&self.db).await?;
            Ok(row.map(ChatUser::from))
        })
        .await
    }

    /// Whether `user_id` belongs to `chat_id`.
    pub async fn is_chat_member(&self, chat_id: i32, user_id: i32) -> DbResult<bool> {
        timed("chat_users.is_member", async {
            let count = chat_user::Entity::find()
                .filter(chat_user::Column::ChatId.eq(chat_id))
                .filter(chat_user::Column::UserId.eq(user_id))
                .count(&self.db)
                .await?;
            Ok(count > 0)
        })
        .await
    }

    pub async fn create(&self, input: ChatUserInput) -> DbResult<ChatUser> {
        timed("chat_users.create", async {
            let model = chat_user::ActiveModel {
                chat_id: Set(input.chat_id),
                user_id: Set(input.user_id),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            info!(chat_id = model.chat_id, user_id = model.user_id, "Added chat user");
            Ok(ChatUser::from(model))
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> DbResult<()> {
        timed("chat_users.delete", async {
            let result = chat_user::Entity::delete_by_id(id).exec(&self.db).await?;
            if result.rows_affected == 0 {
                return Err(DbError::NotFound("Chat user"));
            }
            Ok(())
        })
        .await
    }
}
