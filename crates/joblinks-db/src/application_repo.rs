//! Repository for job applications.

use chrono::Utc;
use joblinks_entity::application;
use joblinks_models::{Application, ApplicationInput, ApplicationStatus, ListScope};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::metrics::timed;

const ENTITY: &str = "Application";

#[derive(Clone)]
pub struct ApplicationRepository {
    db: DatabaseConnection,
}

impl ApplicationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, scope: ListScope) -> DbResult<Vec<Application>> {
        timed("applications.list", async {
            let mut query = application::Entity::find();
            if let ListScope::Own(user_id) = scope {
                query = query.filter(application::Column::UserId.eq(user_id));
            }
            let rows = query
                .order_by_desc(application::Column::AppliedAt)
                .order_by_desc(application::Column::Id)
                .all(&self.db)
                .await?;
            Ok(rows.into_iter().map(Application::from).collect())
        })
        .await
    }

    pub async fn get(&self, id: i32) -> DbResult<Option<Application>> {
        timed("applications.get", async {
            let row = application::Entity::find_by_id(id).one(&self.db).await?;
            Ok(row.map(Application::from))
        })
        .await
    }

    /// Insert an application for `user_id`; status defaults to pending.
    pub async fn create(&self, user_id: i32, input: &ApplicationInput) -> DbResult<Application> {
        timed("applications.create", async {
            let status = input.status.unwrap_or_default();
            let model = application::ActiveModel {
                user_id: Set(user_id),
                opportunity_id: Set(input.opportunity_id),
                status: Set(status.as_str().to_string()),
                cover_letter: Set(input.cover_letter.clone()),
                applied_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            info!(
                application_id = model.id,
                user_id,
                opportunity_id = model.opportunity_id,
                "Created application"
            );
            Ok(Application::from(model))
        })
        .await
    }

    /// Replace the editable fields. Fields omitted from the body keep their value.
    pub async fn update(&self, id: i32, input: &ApplicationInput) -> DbResult<()> {
        timed("applications.update", async {
            let existing = application::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .ok_or(DbError::NotFound(ENTITY))?;

            let status = match input.status {
                Some(status) => status,
                None => existing.status.parse().unwrap_or(ApplicationStatus::Pending),
            };
            let user_id = input.user_id.unwrap_or(existing.user_id);

            let mut active: application::ActiveModel = existing.into();
            active.user_id = Set(user_id);
            active.opportunity_id = Set(input.opportunity_id);
            active.status = Set(status.as_str().to_string());
            active.cover_letter = Set(input.cover_letter.clone());

            match active.update(&self.db).await {
                Ok(_) => Ok(()),
                Err(DbErr::RecordNotUpdated) => {
                    let still_exists = self.get(id).await?.is_some();
                    Err(DbError::missed_update(ENTITY, still_exists))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> DbResult<()> {
        timed("applications.delete", async {
            let result = application::Entity::delete_by_id(id).exec(&self.db).await?;
            if result.rows_affected == 0 {
                return Err(DbError::NotFound(ENTITY));
            }
            Ok(())
        })
        .await
    }
}
