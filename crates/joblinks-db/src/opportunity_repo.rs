//! Repository for job opportunities.

use chrono::Utc;
use joblinks_entity::opportunity;
use joblinks_models::{Opportunity, OpportunityInput};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::metrics::timed;

const ENTITY: &str = "Opportunity";

#[derive(Clone)]
pub struct OpportunityRepository {
    db: DatabaseConnection,
}

impl OpportunityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> DbResult<Vec<Opportunity>> {
        timed("opportunities.list", async {
            let rows = opportunity::Entity::find()
                .order_by_desc(opportunity::Column::CreatedAt)
                .order_by_desc(opportunity::Column::Id)
                .all(&self.db)
                .await?;
            Ok(rows.into_iter().map(Opportunity::from).collect())
        })
        .await
    }

    pub async fn get(&self, id: i32) -> DbResult<Option<Opportunity>> {
        timed("opportunities.get", async {
            let row = opportunity::Entity::find_by_id(id).one(&self.db).await?;
            Ok(row.map(Opportunity::from))
        })
        .await
    }

    /// Insert an opportunity authored by `created_by`.
    pub async fn create(&self, input: &OpportunityInput, created_by: i32) -> DbResult<Opportunity> {
        timed("opportunities.create", async {
            let model = opportunity::ActiveModel {
                company_id: Set(input.company_id),
                created_by: Set(Some(created_by)),
                title: Set(input.title.trim().to_string()),
                description: Set(input.description.clone()),
                location: Set(input.location.clone()),
                job_preference: Set(input.job_preference),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            info!(opportunity_id = model.id, created_by, "Created opportunity");
            Ok(Opportunity::from(model))
        })
        .await
    }

    /// Replace the editable fields. Author and creation time are preserved.
    pub async fn update(&self, id: i32, input: &OpportunityInput) -> DbResult<()> {
        timed("opportunities.update", async {
            let existing = opportunity::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .ok_or(DbError::NotFound(ENTITY))?;

            let mut active: opportunity::ActiveModel = existing.into();
            active.company_id = Set(input.company_id);
            active.title = Set(input.title.trim().to_string());
            active.description = Set(input.description.clone());
            active.location = Set(input.location.clone());
            active.job_preference = Set(input.job_preference);

            match active.update(&self.db).await {
                Ok(_) => Ok(()),
                Err(sea_orm::DbErr::RecordNotUpdated) => {
                    let still_exists = self.get(id).await?.is_some();
                    Err(DbError::missed_update(ENTITY, still_exists))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> DbResult<()> {
        timed("opportunities.delete", async {
            let result = opportunity::Entity::delete_by_id(id).exec(&self.db).await?;
            if result.rows_affected == 0 {
                return Err(DbError::NotFound(ENTITY));
            }
            info!(opportunity_id = id, "Deleted opportunity");
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

    #[tokio::test]
    async fn test_update_preserves_author() {
        let db = connect_in_memory().await.unwrap();
        let author = UserRepository::new(db.clone())
            .create(UserRecord {
                name: "Admin".to_string(),
                email: "admin@joblinks.test".to_string(),
                password_hash: "hash".to_string(),
                phone_number: None,
                nationality: None,
                job_preference: None,
                profile_bio: None,
                do_b: None,
                role: Role::Admin,
            })
            .await
            .unwrap();
        let repo = OpportunityRepository::new(db);

        let created = repo
            .create(
                &OpportunityInput {
                    title: "Rust developer".to_string(),
                    ..Default::default()
                },
                author.user_id,
            )
            .await
            .unwrap();
        assert_eq!(created.created_by, Some(author.user_id));
        assert_eq!(created.company_id, None);

        repo.update(
            created.id,
            &OpportunityInput {
                title: "Senior Rust developer".to_string(),
                location: Some("Lisbon".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stored = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Senior Rust developer");
        assert_eq!(stored.created_by, Some(author.user_id));
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_opportunity_with_unknown_company_is_rejected() {
        let db = connect_in_memory().await.unwrap();
        let author = UserRepository::new(db.clone())
            .create(UserRecord {
                name: "E".to_string(),
                email: "e@joblinks.test".to_string(),
                password_hash: "hash".to_string(),
                phone_number: None,
                nationality: None,
                job_preference: None,
                profile_bio: None,
                do_b: None,
                role: Role::Employer,
            })
            .await
            .unwrap();
        let err = OpportunityRepository::new(db)
            .create(
                &OpportunityInput {
                    company_id: Some(31),
                    title: "Ghost job".to_string(),
                    ..Default::default()
                },
                author.user_id,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidReference(_)), "{err:?}");
    }
}
