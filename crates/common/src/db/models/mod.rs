//! SeaORM entity models
//!
//! Database entities for LabLink

mod abstract_submission;
mod collaboration_request;
mod faculty;
mod project_idea;
mod selection;
mod student;

pub use student::{
    Entity as StudentEntity,
    Model as Student,
    ActiveModel as StudentActiveModel,
    Column as StudentColumn,
};

pub use faculty::{
    Entity as FacultyEntity,
    Model as Faculty,
    ActiveModel as FacultyActiveModel,
    Column as FacultyColumn,
};

pub use selection::{
    dedup_project_types,
    Entity as SelectionEntity,
    IdeaType,
    Model as Selection,
    ActiveModel as SelectionActiveModel,
    Column as SelectionColumn,
    ProjectType,
    SelectionSnapshot,
};

pub use collaboration_request::{
    Entity as CollaborationRequestEntity,
    Model as CollaborationRequest,
    ActiveModel as CollaborationRequestActiveModel,
    Column as CollaborationRequestColumn,
    RequestDecision,
    RequestStatus,
};

pub use project_idea::{
    Entity as ProjectIdeaEntity,
    Model as ProjectIdea,
    ActiveModel as ProjectIdeaActiveModel,
    Column as ProjectIdeaColumn,
};

pub use abstract_submission::{
    AbstractReview,
    AbstractStatus,
    Entity as AbstractEntity,
    Model as AbstractSubmission,
    ActiveModel as AbstractActiveModel,
    Column as AbstractColumn,
};
