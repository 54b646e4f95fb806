//! Collaboration request entity and its status lifecycle

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Request status enum
///
/// `Completed` exists in the data model but no transition into it is
/// implemented; it is reserved for future use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl From<String> for RequestStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => RequestStatus::Pending,
            "accepted" => RequestStatus::Accepted,
            "rejected" => RequestStatus::Rejected,
            "completed" => RequestStatus::Completed,
            _ => RequestStatus::Pending,
        }
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => "pending".to_string(),
            RequestStatus::Accepted => "accepted".to_string(),
            RequestStatus::Rejected => "rejected".to_string(),
            RequestStatus::Completed => "completed".to_string(),
        }
    }
}

/// Faculty decision on a pending request.
/// Each request is decided at most once; there is no revert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestDecision {
    Accept,
    Reject,
}

impl RequestDecision {
    /// Status the request transitions into
    pub fn target_status(&self) -> RequestStatus {
        match self {
            RequestDecision::Accept => RequestStatus::Accepted,
            RequestDecision::Reject => RequestStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestDecision::Accept => "accept",
            RequestDecision::Reject => "reject",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collaboration_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub student_id: Uuid,

    pub faculty_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub project_type: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub idea_type: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub objectives: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub methodology: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub timeline: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub expected_outcomes: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub personal_motivation: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub relevant_experience: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub questions: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    pub created_at: DateTimeWithTimeZone,

    /// Set exactly once, on the accept/reject transition.
    /// Unset iff status == pending.
    pub responded_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Get the request status as an enum
    pub fn request_status(&self) -> RequestStatus {
        RequestStatus::from(self.status.clone())
    }

    /// Check if the request is still awaiting a decision
    pub fn is_pending(&self) -> bool {
        self.request_status() == RequestStatus::Pending
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

    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::FacultyId",
        to = "super::faculty::Column::Id"
    )]
    Faculty,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Accepted,
            RequestStatus::Rejected,
            RequestStatus::Completed,
        ] {
            let s: String = status.into();
            assert_eq!(RequestStatus::from(s), status);
        }
    }

    #[test]
    fn test_decision_targets() {
        assert_eq!(RequestDecision::Accept.target_status(), RequestStatus::Accepted);
        assert_eq!(RequestDecision::Reject.target_status(), RequestStatus::Rejected);
    }
}
