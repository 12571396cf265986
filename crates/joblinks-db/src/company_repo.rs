//! Repositories for companies and their members.

use chrono::Utc;
use joblinks_entity::{company, company_member};
use joblinks_models::{Company, CompanyInput, CompanyMember, CompanyMemberInput};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::metrics::timed;

/// Repository for the `companies` table.
#[derive(Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> DbResult<Vec<Company>> {
        timed("companies.list", async {
            let rows = company::Entity::find()
                .order_by_asc(company::Column::CompanyId)
                .all(&self.db)
                .await?;
            Ok(rows.into_iter().map(Company::from).collect())
        })
        .await
    }

    pub async fn get(&self, company_id: i32) -> DbResult<Option<Company>> {
        timed("companies.get", async {
            let row = company::Entity::find_by_id(company_id).one(&self.db).await?;
            Ok(row.map(Company::from))
        })
        .await
    }

    pub async fn create(&self, input: &CompanyInput) -> DbResult<Company> {
        timed("companies.create", async {
            let model = company::ActiveModel {
                name: Set(input.name.trim().to_string()),
                description: Set(input.description.clone()),
                website: Set(input.website.clone()),
                location: Set(input.location.clone()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            info!(company_id = model.company_id, "Created company");
            Ok(Company::from(model))
        })
        .await
    }

    pub async fn update(&self, company_id: i32, input: &CompanyInput) -> DbResult<()> {
        timed("companies.update", async {
            let active = company::ActiveModel {
                company_id: Set(company_id),
                name: Set(input.name.trim().to_string()),
                description: Set(input.description.clone()),
                website: Set(input.website.clone()),
                location: Set(input.location.clone()),
            };

            match active.update(&self.db).await {
                Ok(_) => Ok(()),
                Err(DbErr::RecordNotUpdated) => {
                    let still_exists = self.get(company_id).await?.is_some();
                    Err(DbError::missed_update("Company", still_exists))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    pub async fn delete(&self, company_id: i32) -> DbResult<()> {
        timed("companies.delete", async {
            let result = company::Entity::delete_by_id(company_id)
                .exec(&self.db)
                .await?;
            if result.rows_affected == 0 {
                return Err(DbError::NotFound("Company"));
            }
            info!(company_id, "Deleted company");
            Ok(())
        })
        .await
    }
}

/// Repository for the `company_members` table.
#[derive(Clone)]
pub struct CompanyMemberRepository {
    db: DatabaseConnection,
}

impl CompanyMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> DbResult<Vec<CompanyMember>> {
        timed("company_members.list", async {
            let rows = company_member::Entity::find()
                .order_by_asc(company_member::Column::CompanyMemberId)
                .all(&self.db)
                .await?;
            Ok(rows.into_iter().map(CompanyMember::from).collect())
        })
        .await
    }

    pub async fn get(&self, id: i32) -> DbResult<Option<CompanyMember>> {
        timed("company_members.get", async {
            let row = company_member::Entity::find_by_id(id).one(&self.db).await?;
            Ok(row.map(CompanyMember::from))
        })
        .await
    }

    /// Whether `user_id` holds a membership row for `company_id`.
    pub async fn is_company_member(&self, company_id: i32, user_id: i32) -> DbResult<bool> {
        timed("company_members.is_member", async {
            let count = company_member::Entity::find()
                .filter(company_member::Column::CompanyId.eq(company_id))
                .filter(company_member::Column::UserId.eq(user_id))
                .count(&self.db)
                .await?;
            Ok(count > 0)
        })
        .await
    }

    pub async fn create(&self, input: CompanyMemberInput) -> DbResult<CompanyMember> {
        timed("company_members.create", async {
            let model = company_member::ActiveModel {
                company_id: Set(input.company_id),
                user_id: Set(input.user_id),
                joined_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            info!(
                company_id = model.company_id,
                user_id = model.user_id,
                "Added company member"
            );
            Ok(CompanyMember::from(model))
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> DbResult<()> {
        timed("company_members.delete", async {
            let result = company_member::Entity::delete_by_id(id).exec(&self.db).await?;
            if result.rows_affected == 0 {
                return Err(DbError::NotFound("Company member"));
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::connect_in_memory;
    use crate::user_repo::{UserRecord, UserRepository};
    use joblinks_models::Role;

    async fn seed_user(db: &DatabaseConnection, email: &str) -> i32 {
        UserRepository::new(db.clone())
            .create(UserRecord {
                name: email.to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                phone_number: None,
                nationality: None,
                job_preference: None,
                profile_bio: None,
                do_b: None,
                role: Role::Employer,
            })
            .await
            .unwrap()
            .user_id
    }

    fn acme() -> CompanyInput {
        CompanyInput {
            name: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_membership_predicate_and_uniqueness() {
        let db = connect_in_memory().await.unwrap();
        let companies = CompanyRepository::new(db.clone());
        let members = CompanyMemberRepository::new(db.clone());
        let company = companies.create(&acme()).await.unwrap();
        let user_id = seed_user(&db, "boss@acme.test").await;

        assert!(!members.is_company_member(company.company_id, user_id).await.unwrap());
        let input = CompanyMemberInput {
            company_id: company.company_id,
            user_id,
        };
        members.create(input).await.unwrap();
        assert!(members.is_company_member(company.company_id, user_id).await.unwrap());

        let err = members.create(input).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_member_of_missing_company_is_invalid_reference() {
        let db = connect_in_memory().await.unwrap();
        let user_id = seed_user(&db, "x@acme.test").await;
        let err = CompanyMemberRepository::new(db)
            .create(CompanyMemberInput {
                company_id: 999,
                user_id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidReference(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_deleting_company_cascades_to_members() {
        let db = connect_in_memory().await.unwrap();
        let companies = CompanyRepository::new(db.clone());
        let members = CompanyMemberRepository::new(db.clone());
        let company = companies.create(&acme()).await.unwrap();
        let user_id = seed_user(&db, "y@acme.test").await;
        members
            .create(CompanyMemberInput {
                company_id: company.company_id,
                user_id,
            })
            .await
            .unwrap();

        companies.delete(company.company_id).await.unwrap();
        assert!(members.list().await.unwrap().is_empty());
        assert!(companies.delete(company.company_id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_company_is_not_found() {
        let db = connect_in_memory().await.unwrap();
        let err = CompanyRepository::new(db).update(7, &acme()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
