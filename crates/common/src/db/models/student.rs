//! Student account entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text", unique)]
    pub email: String,

    /// Argon2 hash, never the plaintext password
    #[sea_orm(column_type = "Text")]
    pub password_hash: String,

    #[sea_orm(column_type = "Text")]
    pub department: String,

    pub year: i32,

    /// Research interests as a JSONB string array
    #[sea_orm(column_type = "JsonBinary")]
    pub interests: serde_json::Value,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Interests as a plain string list
    pub fn interest_list(&self) -> Vec<String> {
        serde_json::from_value(self.interests.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::collaboration_request::Entity")]
    Requests,

    #[sea_orm(has_many = "super::abstract_submission::Entity")]
    Abstracts,
}

impl Related<super::collaboration_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl Related<super::abstract_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Abstracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
