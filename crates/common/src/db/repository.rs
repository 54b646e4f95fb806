//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

/// Fields for registering a new student account
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
    pub year: i32,
    pub interests: Vec<String>,
}

/// Fields for registering a new faculty account
#[derive(Debug, Clone)]
pub struct NewFaculty {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
    pub position: String,
    pub specialization: Vec<String>,
    pub experience: i32,
    pub bio: Option<String>,
    pub research_areas: Vec<String>,
    pub publications: i32,
    pub active_projects: i32,
}

/// Fields for a validated collaboration request
#[derive(Debug, Clone)]
pub struct NewCollaborationRequest {
    pub student_id: Uuid,
    pub faculty_id: Uuid,
    pub project_type: ProjectType,
    pub idea_type: Option<IdeaType>,
    pub title: String,
    pub description: String,
    pub objectives: Option<String>,
    pub methodology: Option<String>,
    pub timeline: Option<String>,
    pub expected_outcomes: Option<String>,
    pub personal_motivation: String,
    pub relevant_experience: Option<String>,
    pub questions: Option<String>,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Account Operations
    // ========================================================================

    /// Find a student by email
    pub async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        StudentEntity::find()
            .filter(StudentColumn::Email.eq(email))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a student by ID
    pub async fn find_student_by_id(&self, id: Uuid) -> Result<Option<Student>> {
        StudentEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Register a new student account
    pub async fn create_student(&self, new: NewStudent) -> Result<Student> {
        // Check against the primary so a just-registered email is visible
        if StudentEntity::find()
            .filter(StudentColumn::Email.eq(new.email.as_str()))
            .one(self.write_conn())
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEmail { email: new.email });
        }

        let now = chrono::Utc::now();
        let student = StudentActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            department: Set(new.department),
            year: Set(new.year),
            interests: Set(serde_json::to_value(new.interests)?),
            created_at: Set(now.into()),
        };

        student.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find a faculty member by email
    pub async fn find_faculty_by_email(&self, email: &str) -> Result<Option<Faculty>> {
        FacultyEntity::find()
            .filter(FacultyColumn::Email.eq(email))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a faculty member by ID
    pub async fn find_faculty_by_id(&self, id: Uuid) -> Result<Option<Faculty>> {
        FacultyEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List the faculty directory
    pub async fn list_faculty(&self) -> Result<Vec<Faculty>> {
        FacultyEntity::find()
            .order_by_desc(FacultyColumn::Experience)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Register a new faculty account
    pub async fn create_faculty(&self, new: NewFaculty) -> Result<Faculty> {
        if FacultyEntity::find()
            .filter(FacultyColumn::Email.eq(new.email.as_str()))
            .one(self.write_conn())
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEmail { email: new.email });
        }

        let now = chrono::Utc::now();
        let faculty = FacultyActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            department: Set(new.department),
            position: Set(new.position),
            specialization: Set(serde_json::to_value(new.specialization)?),
            experience: Set(new.experience),
            bio: Set(new.bio),
            research_areas: Set(serde_json::to_value(new.research_areas)?),
            publications: Set(new.publications),
            active_projects: Set(new.active_projects),
            created_at: Set(now.into()),
        };

        faculty.insert(self.write_conn()).await.map_err(Into::into)
    }

    // ========================================================================
    // Selection Store
    // ========================================================================

    /// Get a student's wizard selection.
    ///
    /// A student with no stored row gets the empty default snapshot:
    /// a missing selection is a fresh wizard session, never an error.
    pub async fn get_selection(&self, student_id: Uuid) -> Result<SelectionSnapshot> {
        let row = SelectionEntity::find_by_id(student_id)
            .one(self.read_conn())
            .await?;

        Ok(row.map(|r| r.to_snapshot()).unwrap_or_default())
    }

    /// Save a student's wizard selection, keeping exactly one row per student.
    ///
    /// Read-check-then-write: an existing row is updated in place, otherwise
    /// one row is inserted. Two racing saves for the same student can
    /// interleave with the last write winning; callers accept that.
    pub async fn save_selection(
        &self,
        student_id: Uuid,
        project_types: Vec<ProjectType>,
        idea_type: Option<IdeaType>,
    ) -> Result<SelectionSnapshot> {
        let types_json = serde_json::to_value(&project_types)?;
        let idea_str = idea_type.map(|i| i.as_str().to_string());
        let now = chrono::Utc::now();

        let existing = SelectionEntity::find_by_id(student_id)
            .one(self.write_conn())
            .await?;

        match existing {
            Some(row) => {
                let mut active: SelectionActiveModel = row.into();
                active.project_types = Set(types_json);
                active.idea_type = Set(idea_str);
                active.updated_at = Set(now.into());
                active.update(self.write_conn()).await?;
            }
            None => {
                let row = SelectionActiveModel {
                    student_id: Set(student_id),
                    project_types: Set(types_json),
                    idea_type: Set(idea_str),
                    updated_at: Set(now.into()),
                };
                row.insert(self.write_conn()).await?;
            }
        }

        Ok(SelectionSnapshot {
            project_types,
            idea_type,
        })
    }

    // ========================================================================
    // Collaboration Requests
    // ========================================================================

    /// Create a collaboration request in the `pending` state
    pub async fn create_request(&self, new: NewCollaborationRequest) -> Result<CollaborationRequest> {
        let request_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let request = CollaborationRequestActiveModel {
            id: Set(request_id),
            student_id: Set(new.student_id),
            faculty_id: Set(new.faculty_id),
            project_type: Set(new.project_type.as_str().to_string()),
            idea_type: Set(new.idea_type.map(|i| i.as_str().to_string())),
            title: Set(new.title),
            description: Set(new.description),
            objectives: Set(new.objectives),
            methodology: Set(new.methodology),
            timeline: Set(new.timeline),
            expected_outcomes: Set(new.expected_outcomes),
            personal_motivation: Set(new.personal_motivation),
            relevant_experience: Set(new.relevant_experience),
            questions: Set(new.questions),
            status: Set(String::from(RequestStatus::Pending)),
            created_at: Set(now.into()),
            responded_at: Set(None),
        };

        request.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find a request by ID
    pub async fn find_request_by_id(&self, id: Uuid) -> Result<Option<CollaborationRequest>> {
        CollaborationRequestEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Pending requests awaiting a faculty member's decision
    pub async fn list_pending_requests_for_faculty(
        &self,
        faculty_id: Uuid,
    ) -> Result<Vec<CollaborationRequest>> {
        CollaborationRequestEntity::find()
            .filter(CollaborationRequestColumn::FacultyId.eq(faculty_id))
            .filter(CollaborationRequestColumn::Status.eq(String::from(RequestStatus::Pending)))
            .order_by_desc(CollaborationRequestColumn::CreatedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// All of a student's own requests, newest first
    pub async fn list_requests_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<CollaborationRequest>> {
        CollaborationRequestEntity::find()
            .filter(CollaborationRequestColumn::StudentId.eq(student_id))
            .order_by_desc(CollaborationRequestColumn::CreatedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Apply a faculty accept/reject decision to a pending request.
    ///
    /// A single conditional UPDATE guards the transition: the status and
    /// responded_at change only while the row is still `pending`, so two
    /// racing decisions cannot both succeed. The losing call (and any call
    /// on an already-decided request) gets `InvalidTransition`.
    pub async fn decide_request(
        &self,
        request_id: Uuid,
        faculty_id: Uuid,
        decision: RequestDecision,
    ) -> Result<CollaborationRequest> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            UPDATE collaboration_requests
               SET status = $1, responded_at = NOW()
             WHERE id = $2 AND faculty_id = $3 AND status = 'pending'
            "#,
            vec![
                String::from(decision.target_status()).into(),
                request_id.into(),
                faculty_id.into(),
            ],
        );

        let result = self.write_conn().execute(stmt).await?;

        if result.rows_affected() == 0 {
            // Distinguish a missing row, a foreign request, and a decided one
            let existing = CollaborationRequestEntity::find_by_id(request_id)
                .one(self.write_conn())
                .await?
                .ok_or_else(|| AppError::RequestNotFound {
                    id: request_id.to_string(),
                })?;

            if existing.faculty_id != faculty_id {
                return Err(AppError::Forbidden {
                    message: "Request is addressed to a different faculty member".to_string(),
                });
            }

            return Err(AppError::InvalidTransition {
                id: request_id.to_string(),
                status: existing.status,
            });
        }

        // Read back from the primary to avoid replica lag
        CollaborationRequestEntity::find_by_id(request_id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::RequestNotFound {
                id: request_id.to_string(),
            })
    }

    // ========================================================================
    // Project Ideas
    // ========================================================================

    /// Post a new project opportunity
    pub async fn create_project(
        &self,
        faculty_id: Uuid,
        title: String,
        description: String,
        project_type: ProjectType,
        required_skills: Vec<String>,
    ) -> Result<ProjectIdea> {
        let now = chrono::Utc::now();

        let project = ProjectIdeaActiveModel {
            id: Set(Uuid::new_v4()),
            faculty_id: Set(faculty_id),
            title: Set(title),
            description: Set(description),
            project_type: Set(project_type.as_str().to_string()),
            required_skills: Set(serde_json::to_value(required_skills)?),
            created_at: Set(now.into()),
        };

        project.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find a project by ID
    pub async fn find_project_by_id(&self, id: Uuid) -> Result<Option<ProjectIdea>> {
        ProjectIdeaEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Browse project opportunities, optionally filtered by type
    pub async fn list_projects(
        &self,
        project_type: Option<ProjectType>,
    ) -> Result<Vec<ProjectIdea>> {
        let mut query = ProjectIdeaEntity::find();

        if let Some(pt) = project_type {
            query = query.filter(ProjectIdeaColumn::ProjectType.eq(pt.as_str()));
        }

        query
            .order_by_desc(ProjectIdeaColumn::CreatedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Delete a project by ID
    pub async fn delete_project(&self, id: Uuid) -> Result<bool> {
        let result = ProjectIdeaEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Abstract Submissions
    // ========================================================================

    /// Submit a new abstract in the `submitted` state
    #[allow(clippy::too_many_arguments)]
    pub async fn create_abstract(
        &self,
        student_id: Uuid,
        title: String,
        content: String,
        keywords: Option<String>,
        methodology: Option<String>,
        expected_outcomes: Option<String>,
    ) -> Result<AbstractSubmission> {
        let now = chrono::Utc::now();

        let submission = AbstractActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            title: Set(title),
            content: Set(content),
            keywords: Set(keywords),
            methodology: Set(methodology),
            expected_outcomes: Set(expected_outcomes),
            status: Set(String::from(AbstractStatus::Submitted)),
            feedback: Set(None),
            submitted_at: Set(now.into()),
        };

        submission.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// A student's own abstracts, newest first
    pub async fn list_abstracts_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<AbstractSubmission>> {
        AbstractEntity::find()
            .filter(AbstractColumn::StudentId.eq(student_id))
            .order_by_desc(AbstractColumn::SubmittedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Apply a faculty review verdict to a submitted abstract.
    ///
    /// Same conditional-update guard as request decisions: the verdict
    /// lands only while the abstract is still `submitted`.
    pub async fn review_abstract(
        &self,
        abstract_id: Uuid,
        review: AbstractReview,
        feedback: Option<String>,
    ) -> Result<AbstractSubmission> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            UPDATE student_abstracts
               SET status = $1, feedback = $2
             WHERE id = $3 AND status = 'submitted'
            "#,
            vec![
                String::from(review.target_status()).into(),
                feedback.into(),
                abstract_id.into(),
            ],
        );

        let result = self.write_conn().execute(stmt).await?;

        if result.rows_affected() == 0 {
            let existing = AbstractEntity::find_by_id(abstract_id)
                .one(self.write_conn())
                .await?
                .ok_or_else(|| AppError::AbstractNotFound {
                    id: abstract_id.to_string(),
                })?;

            return Err(AppError::InvalidTransition {
                id: abstract_id.to_string(),
                status: existing.status,
            });
        }

        AbstractEntity::find_by_id(abstract_id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::AbstractNotFound {
                id: abstract_id.to_string(),
            })
    }
}
