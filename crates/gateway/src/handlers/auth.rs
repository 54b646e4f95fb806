//! Account registration and login handlers
//!
//! One authoritative implementation: passwords are stored as Argon2
//! hashes and sessions are JWT bearer tokens with a role claim.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use lablink_common::{
    auth::{self, Role},
    db::{NewFaculty, NewStudent, Repository},
    errors::{AppError, Result},
    metrics,
};

/// Request to register a student account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 200))]
    pub department: String,

    #[validate(range(min = 1, max = 8))]
    pub year: i32,

    #[serde(default)]
    pub interests: Vec<String>,
}

/// Request to register a faculty account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFacultyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 200))]
    pub department: String,

    #[validate(length(min = 1, max = 200))]
    pub position: String,

    #[serde(default)]
    pub specialization: Vec<String>,

    #[validate(range(min = 0, max = 60))]
    #[serde(default)]
    pub experience: i32,

    pub bio: Option<String>,

    #[serde(default)]
    pub research_areas: Vec<String>,

    #[serde(default)]
    pub publications: i32,

    #[serde(default)]
    pub active_projects: i32,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub role: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub role: String,
    pub expires_in_secs: i64,
}

/// Register a new student account
pub async fn register_student(
    State(state): State<AppState>,
    Json(request): Json<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let password_hash = auth::hash_password(&request.password)?;

    let student = repo
        .create_student(NewStudent {
            name: request.name,
            email: request.email,
            password_hash,
            department: request.department,
            year: request.year,
            interests: request.interests,
        })
        .await?;

    tracing::info!(student_id = %student.id, "Student registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: student.id,
            role: Role::Student.as_str().to_string(),
        }),
    ))
}

/// Register a new faculty account
pub async fn register_faculty(
    State(state): State<AppState>,
    Json(request): Json<RegisterFacultyRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let password_hash = auth::hash_password(&request.password)?;

    let faculty = repo
        .create_faculty(NewFaculty {
            name: request.name,
            email: request.email,
            password_hash,
            department: request.department,
            position: request.position,
            specialization: request.specialization,
            experience: request.experience,
            bio: request.bio,
            research_areas: request.research_areas,
            publications: request.publications,
            active_projects: request.active_projects,
        })
        .await?;

    tracing::info!(faculty_id = %faculty.id, "Faculty registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: faculty.id,
            role: Role::Faculty.as_str().to_string(),
        }),
    ))
}

/// Authenticate a student or faculty member.
///
/// Unknown email and wrong password produce the same error, so the
/// endpoint cannot be used to probe which addresses have accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let role = request
        .role
        .parse::<Role>()
        .map_err(|_| AppError::Validation {
            message: "Role must be 'student' or 'faculty'".to_string(),
            field: Some("role".to_string()),
        })?;

    let repo = Repository::new(state.db.clone());

    let (user_id, password_hash) = match role {
        Role::Student => repo
            .find_student_by_email(&request.email)
            .await?
            .map(|s| (s.id, s.password_hash))
            .ok_or(AppError::InvalidCredentials)?,
        Role::Faculty => repo
            .find_faculty_by_email(&request.email)
            .await?
            .map(|f| (f.id, f.password_hash))
            .ok_or(AppError::InvalidCredentials)?,
    };

    if !auth::verify_password(&request.password, &password_hash)? {
        metrics::record_login(role.as_str(), false);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.jwt.generate_token(user_id, role)?;
    metrics::record_login(role.as_str(), true);

    tracing::info!(user_id = %user_id, role = role.as_str(), "Login succeeded");

    Ok(Json(LoginResponse {
        token,
        user_id,
        role: role.as_str().to_string(),
        expires_in_secs: state.jwt.expiration_secs(),
    }))
}
