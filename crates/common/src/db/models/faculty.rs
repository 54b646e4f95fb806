//! Faculty account entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faculty")]
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

    #[sea_orm(column_type = "Text")]
    pub position: String,

    /// Specialization areas as a JSONB string array
    #[sea_orm(column_type = "JsonBinary")]
    pub specialization: serde_json::Value,

    /// Years of experience
    pub experience: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Research areas as a JSONB string array
    #[sea_orm(column_type = "JsonBinary")]
    pub research_areas: serde_json::Value,

    pub publications: i32,

    pub active_projects: i32,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn specialization_list(&self) -> Vec<String> {
        serde_json::from_value(self.specialization.clone()).unwrap_or_default()
    }

    pub fn research_area_list(&self) -> Vec<String> {
        serde_json::from_value(self.research_areas.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::collaboration_request::Entity")]
    Requests,

    #[sea_orm(has_many = "super::project_idea::Entity")]
    Projects,
}

impl Related<super::collaboration_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl Related<super::project_idea::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
