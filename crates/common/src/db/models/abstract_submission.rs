//! Student abstract submission entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Abstract review status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbstractStatus {
    Submitted,
    Approved,
    NeedsRevision,
}

impl From<String> for AbstractStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "submitted" => AbstractStatus::Submitted,
            "approved" => AbstractStatus::Approved,
            "needs_revision" => AbstractStatus::NeedsRevision,
            _ => AbstractStatus::Submitted,
        }
    }
}

impl From<AbstractStatus> for String {
    fn from(status: AbstractStatus) -> Self {
        match status {
            AbstractStatus::Submitted => "submitted".to_string(),
            AbstractStatus::Approved => "approved".to_string(),
            AbstractStatus::NeedsRevision => "needs_revision".to_string(),
        }
    }
}

/// Faculty review verdict on a submitted abstract.
/// Feedback lives here, not on collaboration requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbstractReview {
    Approve,
    NeedsRevision,
}

impl AbstractReview {
    pub fn target_status(&self) -> AbstractStatus {
        match self {
            AbstractReview::Approve => AbstractStatus::Approved,
            AbstractReview::NeedsRevision => AbstractStatus::NeedsRevision,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(AbstractReview::Approve),
            "needs_revision" => Some(AbstractReview::NeedsRevision),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_abstracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub student_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    /// Immutable once submitted; there is no revise-and-resubmit path
    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub keywords: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub methodology: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub expected_outcomes: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    /// Optional faculty feedback attached on review
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,

    pub submitted_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn abstract_status(&self) -> AbstractStatus {
        AbstractStatus::from(self.status.clone())
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
    fn test_status_string_roundtrip() {
        for status in [
            AbstractStatus::Submitted,
            AbstractStatus::Approved,
            AbstractStatus::NeedsRevision,
        ] {
            let s: String = status.into();
            assert_eq!(AbstractStatus::from(s), status);
        }
    }

    #[test]
    fn test_review_parsing() {
        assert_eq!(AbstractReview::parse("approved"), Some(AbstractReview::Approve));
        assert_eq!(
            AbstractReview::parse("needs_revision"),
            Some(AbstractReview::NeedsRevision)
        );
        assert_eq!(AbstractReview::parse("rejected"), None);
    }
}
