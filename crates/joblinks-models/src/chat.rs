//! Chat and chat membership models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Chat room. `chatUsers` lists the ids of its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_id: i32,
    #[serde(default)]
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub chat_users: Vec<i32>,
}

/// Membership row linking a user to a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatUser {
    pub chat_user_id: i32,
    pub chat_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatUserInput {
    pub chat_id: i32,
    pub user_id: i32,
}
