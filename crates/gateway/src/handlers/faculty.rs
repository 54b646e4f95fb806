//! Faculty directory handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;
use lablink_common::{
    auth::AuthContext,
    db::{models::Faculty, Repository},
    errors::{AppError, Result},
};

/// Public faculty profile (never includes credentials)
#[derive(Serialize)]
pub struct FacultyResponse {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub position: String,
    pub specialization: Vec<String>,
    pub experience: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub research_areas: Vec<String>,
    pub publications: i32,
    pub active_projects: i32,
}

impl From<Faculty> for FacultyResponse {
    fn from(f: Faculty) -> Self {
        let specialization = f.specialization_list();
        let research_areas = f.research_area_list();

        Self {
            id: f.id,
            name: f.name,
            department: f.department,
            position: f.position,
            specialization,
            experience: f.experience,
            bio: f.bio,
            research_areas,
            publications: f.publications,
            active_projects: f.active_projects,
        }
    }
}

/// Browse the faculty directory (wizard step 3, own-idea path)
pub async fn list_faculty(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<Vec<FacultyResponse>>> {
    let repo = Repository::new(state.db.clone());

    let faculty = repo
        .list_faculty()
        .await?
        .into_iter()
        .map(FacultyResponse::from)
        .collect();

    Ok(Json(faculty))
}

/// Get a single faculty profile
pub async fn get_faculty(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(faculty_id): Path<Uuid>,
) -> Result<Json<FacultyResponse>> {
    let repo = Repository::new(state.db.clone());

    let faculty = repo
        .find_faculty_by_id(faculty_id)
        .await?
        .ok_or_else(|| AppError::FacultyNotFound {
            id: faculty_id.to_string(),
        })?;

    Ok(Json(FacultyResponse::from(faculty)))
}
