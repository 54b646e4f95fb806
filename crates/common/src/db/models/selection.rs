//! Student project-selection entity
//!
//! One row per student (student_id is the primary key), holding the
//! chosen project types and collaboration approach from the selection
//! wizard. Updated in place, never duplicated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project type chosen in wizard step 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    Project,
    Patent,
    ResearchPaper,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Project => "PROJECT",
            ProjectType::Patent => "PATENT",
            ProjectType::ResearchPaper => "RESEARCH_PAPER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PROJECT" => Some(ProjectType::Project),
            "PATENT" => Some(ProjectType::Patent),
            "RESEARCH_PAPER" => Some(ProjectType::ResearchPaper),
            _ => None,
        }
    }
}

/// Collaboration approach chosen in wizard step 2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdeaType {
    OwnIdea,
    Collaborate,
}

impl IdeaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaType::OwnIdea => "OWN_IDEA",
            IdeaType::Collaborate => "COLLABORATE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OWN_IDEA" => Some(IdeaType::OwnIdea),
            "COLLABORATE" => Some(IdeaType::Collaborate),
            _ => None,
        }
    }
}

/// Deduplicate project types, preserving first-seen order.
/// Duplicates from the client are tolerated, not rejected.
pub fn dedup_project_types(types: &[ProjectType]) -> Vec<ProjectType> {
    let mut seen = Vec::with_capacity(types.len());
    for t in types {
        if !seen.contains(t) {
            seen.push(*t);
        }
    }
    seen
}

/// In-memory view of a student's selection, independent of storage.
///
/// The default value (empty types, unset idea type) is what callers get
/// for a student with no stored row: a fresh wizard session, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub project_types: Vec<ProjectType>,
    pub idea_type: Option<IdeaType>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_selections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: Uuid,

    /// Chosen project types as a JSONB array of enum strings
    #[sea_orm(column_type = "JsonBinary")]
    pub project_types: serde_json::Value,

    /// Chosen approach; NULL while step 2 is pending
    #[sea_orm(column_type = "Text", nullable)]
    pub idea_type: Option<String>,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Decode the stored row into a typed snapshot.
    /// Unknown stored strings are skipped rather than failing the read.
    pub fn to_snapshot(&self) -> SelectionSnapshot {
        let raw: Vec<String> =
            serde_json::from_value(self.project_types.clone()).unwrap_or_default();

        SelectionSnapshot {
            project_types: raw.iter().filter_map(|s| ProjectType::parse(s)).collect(),
            idea_type: self.idea_type.as_deref().and_then(IdeaType::parse),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_roundtrip() {
        for t in [ProjectType::Project, ProjectType::Patent, ProjectType::ResearchPaper] {
            assert_eq!(ProjectType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ProjectType::parse("THESIS"), None);
    }

    #[test]
    fn test_idea_type_roundtrip() {
        assert_eq!(IdeaType::parse("OWN_IDEA"), Some(IdeaType::OwnIdea));
        assert_eq!(IdeaType::parse("COLLABORATE"), Some(IdeaType::Collaborate));
        assert_eq!(IdeaType::parse("own_idea"), None);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let types = vec![
            ProjectType::ResearchPaper,
            ProjectType::Project,
            ProjectType::ResearchPaper,
            ProjectType::Project,
        ];
        assert_eq!(
            dedup_project_types(&types),
            vec![ProjectType::ResearchPaper, ProjectType::Project]
        );
    }

    #[test]
    fn test_snapshot_default_is_fresh_session() {
        let snapshot = SelectionSnapshot::default();
        assert!(snapshot.project_types.is_empty());
        assert!(snapshot.idea_type.is_none());
    }

    #[test]
    fn test_snapshot_skips_unknown_stored_values() {
        let model = Model {
            student_id: Uuid::new_v4(),
            project_types: serde_json::json!(["PROJECT", "LEGACY_TYPE"]),
            idea_type: Some("OWN_IDEA".to_string()),
            updated_at: chrono::Utc::now().into(),
        };

        let snapshot = model.to_snapshot();
        assert_eq!(snapshot.project_types, vec![ProjectType::Project]);
        assert_eq!(snapshot.idea_type, Some(IdeaType::OwnIdea));
    }
}
