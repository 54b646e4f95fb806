//! Project opportunity handlers
//!
//! Faculty post opportunities; students browse them on the
//! collaborate path of the wizard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use lablink_common::{
    auth::AuthContext,
    db::{
        models::{ProjectIdea, ProjectType},
        Repository,
    },
    errors::{AppError, Result},
};

/// Request to post a project opportunity
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(length(min = 1, max = 10000))]
    pub description: String,

    pub project_type: String,

    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Browse filters
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub project_type: Option<String>,
}

#[derive(Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub title: String,
    pub description: String,
    pub project_type: String,
    pub required_skills: Vec<String>,
    pub created_at: String,
}

impl From<ProjectIdea> for ProjectResponse {
    fn from(p: ProjectIdea) -> Self {
        let required_skills = p.skill_list();

        Self {
            id: p.id,
            faculty_id: p.faculty_id,
            title: p.title,
            description: p.description,
            project_type: p.project_type,
            required_skills,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Post a new project opportunity (faculty only)
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let faculty_id = auth.require_faculty()?;

    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let project_type =
        ProjectType::parse(&request.project_type).ok_or_else(|| AppError::Validation {
            message: format!("Unrecognized project type: {}", request.project_type),
            field: Some("project_type".to_string()),
        })?;

    let repo = Repository::new(state.db.clone());
    let project = repo
        .create_project(
            faculty_id,
            request.title,
            request.description,
            project_type,
            request.required_skills,
        )
        .await?;

    tracing::info!(
        project_id = %project.id,
        faculty_id = %faculty_id,
        "Project posted"
    );

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

/// Browse posted project opportunities
pub async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthContext,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let project_type = match query.project_type.as_deref() {
        None => None,
        Some(s) => Some(ProjectType::parse(s).ok_or_else(|| AppError::Validation {
            message: format!("Unrecognized project type: {}", s),
            field: Some("project_type".to_string()),
        })?),
    };

    let repo = Repository::new(state.db.clone());
    let projects = repo
        .list_projects(project_type)
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(Json(projects))
}

/// Delete a posted project (owning faculty only)
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(project_id): Path<Uuid>,
) -> Result<StatusCode> {
    let faculty_id = auth.require_faculty()?;

    let repo = Repository::new(state.db.clone());

    let project = repo
        .find_project_by_id(project_id)
        .await?
        .ok_or_else(|| AppError::ProjectNotFound {
            id: project_id.to_string(),
        })?;

    if project.faculty_id != faculty_id {
        return Err(AppError::Forbidden {
            message: "Project belongs to a different faculty member".to_string(),
        });
    }

    repo.delete_project(project_id).await?;

    tracing::info!(
        project_id = %project_id,
        faculty_id = %faculty_id,
        "Project deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
