//! Repository for user records.

use chrono::NaiveDate;
use joblinks_entity::user;
use joblinks_models::{Role, User, UserFilter, UserUpdate};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::metrics::timed;

const ENTITY: &str = "User";

/// Fields of a user row about to be inserted.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub nationality: Option<i32>,
    pub job_preference: Option<i32>,
    pub profile_bio: Option<String>,
    pub do_b: Option<NaiveDate>,
    pub role: Role,
}

/// Emails are compared trimmed and lowercased everywhere.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Repository for the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List users, narrowed by whichever filter fields are set.
    pub async fn list(&self, filter: &UserFilter) -> DbResult<Vec<User>> {
        timed("users.list", async {
            let mut query = user::Entity::find();
            if let Some(pref) = filter.job_preference {
                query = query.filter(user::Column::JobPreference.eq(pref));
            }
            if let Some(nat) = filter.nationality {
                query = query.filter(user::Column::Nationality.eq(nat));
            }
            let rows = query.order_by_asc(user::Column::UserId).all(&self.db).await?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    pub async fn get(&self, user_id: i32) -> DbResult<Option<User>> {
        timed("users.get", async {
            Ok(self.find_model(user_id).await?.map(User::from))
        })
        .await
    }

    /// Full row including the password hash. Never hand this to a response.
    pub async fn find_model(&self, user_id: i32) -> DbResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(user_id).one(&self.db).await?)
    }

    /// Look up a user by trimmed, case-insensitive email or name.
    pub async fn find_by_login(&self, login: &str) -> DbResult<Option<user::Model>> {
        let email = normalize_email(login);
        // SQL `lower()` only folds ASCII, so the name side must match it.
        let name = login.trim().to_ascii_lowercase();
        timed("users.find_by_login", async {
            let name_matches =
                Expr::expr(Func::lower(Expr::col((user::Entity, user::Column::Name)))).eq(name);
            let row = user::Entity::find()
                .filter(
                    Condition::any()
                        .add(user::Column::Email.eq(email))
                        .add(name_matches),
                )
                .order_by_asc(user::Column::UserId)
                .one(&self.db)
                .await?;
            Ok(row)
        })
        .await
    }

    pub async fn email_exists(&self, email: &str) -> DbResult<bool> {
        let email = normalize_email(email);
        timed("users.email_exists", async {
            let count = user::Entity::find()
                .filter(user::Column::Email.eq(email.clone()))
                .count(&self.db)
                .await?;
            Ok(count > 0)
        })
        .await
    }

    pub async fn create(&self, record: UserRecord) -> DbResult<User> {
        timed("users.create", async move {
            let model = user::ActiveModel {
                name: Set(record.name.trim().to_string()),
                email: Set(normalize_email(&record.email)),
                password_hash: Set(record.password_hash),
                phone_number: Set(record.phone_number),
                nationality: Set(record.nationality),
                job_preference: Set(record.job_preference),
                profile_bio: Set(record.profile_bio),
                do_b: Set(record.do_b),
                role: Set(record.role.code()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            info!(user_id = model.user_id, role = %model.role(), "Created user");
            Ok(User::from(model))
        })
        .await
    }

    /// Replace the profile fields of a user. `email` and `role` are applied
    /// only when present; callers strip them for self-service edits.
    pub async fn update(&self, user_id: i32, update: &UserUpdate) -> DbResult<()> {
        timed("users.update", async {
            let existing = self
                .find_model(user_id)
                .await?
                .ok_or(DbError::NotFound(ENTITY))?;

            let mut active: user::ActiveModel = existing.into();
            active.name = Set(update.name.trim().to_string());
            active.phone_number = Set(update.phone_number.clone());
            active.nationality = Set(update.nationality);
            active.job_preference = Set(update.job_preference);
            active.profile_bio = Set(update.profile_bio.clone());
            active.do_b = Set(update.do_b);
            if let Some(email) = &update.email {
                active.email = Set(normalize_email(email));
            }
            if let Some(role) = update.role {
                active.role = Set(role.code());
            }

            self.save(user_id, active).await
        })
        .await
    }

    pub async fn update_password_hash(&self, user_id: i32, password_hash: String) -> DbResult<()> {
        timed("users.update_password_hash", async move {
            let active = user::ActiveModel {
                user_id: Set(user_id),
                password_hash: Set(password_hash),
                ..Default::default()
            };
            self.save(user_id, active).await
        })
        .await
    }

    pub async fn delete(&self, user_id: i32) -> DbResult<()> {
        timed("users.delete", async {
            let result = user::Entity::delete_by_id(user_id).exec(&self.db).await?;
            if result.rows_affected == 0 {
                return Err(DbError::NotFound(ENTITY));
            }
            info!(user_id, "Deleted user");
            Ok(())
        })
        .await
    }

    async fn save(&self, user_id: i32, active: user::ActiveModel) -> DbResult<()> {
        match active.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => {
                let still_exists = self.find_model(user_id).await?.is_some();
                Err(DbError::missed_update(ENTITY, still_exists))
            }
            Err(e) => Err(e.into()),
        }
    }
}
