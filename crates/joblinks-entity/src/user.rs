use joblinks_models::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,

    pub name: String,

    /// Stored lowercased; unique.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub phone_number: Option<String>,
    pub nationality: Option<i32>,
    pub job_preference: Option<i32>,
    pub profile_bio: Option<String>,
    pub do_b: Option<Date>,

    /// 0 = Admin, 1 = User, 2 = Employer.
    pub role: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Unknown codes degrade to the least privileged role.
    pub fn role(&self) -> Role {
        Role::try_from(self.role).unwrap_or(Role::User)
    }
}

impl From<Model> for joblinks_models::User {
    fn from(m: Model) -> Self {
        let role = m.role();
        Self {
            user_id: m.user_id,
            name: m.name,
            email: m.email,
            phone_number: m.phone_number,
            nationality: m.nationality,
            job_preference: m.job_preference,
            profile_bio: m.profile_bio,
            do_b: m.do_b,
            role,
        }
    }
}
