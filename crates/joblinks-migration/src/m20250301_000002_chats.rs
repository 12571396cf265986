use sea_orm_migration::prelude::*;

use crate::m20250301_000001_core_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chats::ChatId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chats::CreatedBy).integer())
                    .col(
                        ColumnDef::new(Chats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chats_created_by")
                            .from(Chats::Table, Chats::CreatedBy)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChatUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatUsers::ChatUserId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChatUsers::ChatId).integer().not_null())
                    .col(ColumnDef::new(ChatUsers::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_users_chat_id")
                            .from(ChatUsers::Table, ChatUsers::ChatId)
                            .to(Chats::Table, Chats::ChatId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_users_user_id")
                            .from(ChatUsers::Table, ChatUsers::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_chat_users_chat_user")
                    .table(ChatUsers::Table)
                    .col(ChatUsers::ChatId)
                    .col(ChatUsers::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatUsers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Chats {
    Table,
    ChatId,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ChatUsers {
    Table,
    ChatUserId,
    ChatId,
    UserId,
}
