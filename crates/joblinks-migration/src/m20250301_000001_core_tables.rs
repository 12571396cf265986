use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(320)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).text().not_null())
                    .col(ColumnDef::new(Users::PhoneNumber).string_len(50))
                    .col(ColumnDef::new(Users::Nationality).integer())
                    .col(ColumnDef::new(Users::JobPreference).integer())
                    .col(ColumnDef::new(Users::ProfileBio).text())
                    .col(ColumnDef::new(Users::DoB).date())
                    .col(ColumnDef::new(Users::Role).integer().not_null().default(1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::CompanyId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Companies::Description).text())
                    .col(ColumnDef::new(Companies::Website).string_len(500))
                    .col(ColumnDef::new(Companies::Location).string_len(200))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanyMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyMembers::CompanyMemberId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyMembers::CompanyId).integer().not_null())
                    .col(ColumnDef::new(CompanyMembers::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(CompanyMembers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_members_company_id")
                            .from(CompanyMembers::Table, CompanyMembers::CompanyId)
                            .to(Companies::Table, Companies::CompanyId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_members_user_id")
                            .from(CompanyMembers::Table, CompanyMembers::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_company_members_company_user")
                    .table(CompanyMembers::Table)
                    .col(CompanyMembers::CompanyId)
                    .col(CompanyMembers::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Opportunities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Opportunities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Opportunities::CompanyId).integer())
                    .col(ColumnDef::new(Opportunities::CreatedBy).integer())
                    .col(ColumnDef::new(Opportunities::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Opportunities::Description).text())
                    .col(ColumnDef::new(Opportunities::Location).string_len(200))
                    .col(ColumnDef::new(Opportunities::JobPreference).integer())
                    .col(
                        ColumnDef::new(Opportunities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunities_company_id")
                            .from(Opportunities::Table, Opportunities::CompanyId)
                            .to(Companies::Table, Companies::CompanyId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunities_created_by")
                            .from(Opportunities::Table, Opportunities::CreatedBy)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_opportunities_company_id")
                    .table(Opportunities::Table)
                    .col(Opportunities::CompanyId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::UserId).integer().not_null())
                    .col(ColumnDef::new(Applications::OpportunityId).integer().not_null())
                    .col(
                        ColumnDef::new(Applications::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Applications::CoverLetter).text())
                    .col(
                        ColumnDef::new(Applications::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_user_id")
                            .from(Applications::Table, Applications::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_opportunity_id")
                            .from(Applications::Table, Applications::OpportunityId)
                            .to(Opportunities::Table, Opportunities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_user_id")
                    .table(Applications::Table)
                    .col(Applications::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse dependency order.
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Opportunities::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CompanyMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    UserId,
    Name,
    Email,
    PasswordHash,
    PhoneNumber,
    Nationality,
    JobPreference,
    ProfileBio,
    DoB,
    Role,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    CompanyId,
    Name,
    Description,
    Website,
    Location,
}

#[derive(DeriveIden)]
enum CompanyMembers {
    Table,
    CompanyMemberId,
    CompanyId,
    UserId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Opportunities {
    Table,
    Id,
    CompanyId,
    CreatedBy,
    Title,
    Description,
    Location,
    JobPreference,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    UserId,
    OpportunityId,
    Status,
    CoverLetter,
    AppliedAt,
}
