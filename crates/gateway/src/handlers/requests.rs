//! Collaboration request handlers
//!
//! Students submit requests (after the ordered domain validator passes);
//! faculty list and decide them. A request is decided at most once.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use lablink_common::{
    auth::{AuthContext, Role},
    db::{
        models::{CollaborationRequest, IdeaType, RequestDecision},
        NewCollaborationRequest, Repository,
    },
    errors::{AppError, Result},
    metrics,
    validation::{validate_request, RequestForm},
};

/// Request submission payload
#[derive(Debug, Deserialize)]
pub struct SubmitRequestRequest {
    pub faculty_id: Uuid,

    pub project_type: Option<String>,

    #[serde(default)]
    pub idea_type: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub objectives: Option<String>,

    #[serde(default)]
    pub methodology: Option<String>,

    #[serde(default)]
    pub timeline: Option<String>,

    #[serde(default)]
    pub expected_outcomes: Option<String>,

    #[serde(default)]
    pub personal_motivation: String,

    #[serde(default)]
    pub relevant_experience: Option<String>,

    #[serde(default)]
    pub questions: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitRequestResponse {
    pub request_id: Uuid,
    pub status: String,
}

#[derive(Serialize)]
pub struct RequestResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub faculty_id: Uuid,
    pub project_type: String,
    pub idea_type: Option<String>,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub responded_at: Option<String>,
}

impl From<CollaborationRequest> for RequestResponse {
    fn from(r: CollaborationRequest) -> Self {
        Self {
            id: r.id,
            student_id: r.student_id,
            faculty_id: r.faculty_id,
            project_type: r.project_type,
            idea_type: r.idea_type,
            title: r.title,
            description: r.description,
            status: r.status,
            created_at: r.created_at.to_rfc3339(),
            responded_at: r.responded_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Serialize)]
pub struct DecisionResponse {
    pub id: Uuid,
    pub status: String,
    pub responded_at: Option<String>,
}

/// Submit a collaboration request (student only)
pub async fn submit_request(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<SubmitRequestRequest>,
) -> Result<(StatusCode, Json<SubmitRequestResponse>)> {
    let student_id = auth.require_student()?;

    // Ordered domain validation before any persistence call
    let form = RequestForm {
        project_type: request.project_type.clone(),
        title: request.title.clone(),
        description: request.description.clone(),
        objectives: request.objectives.clone(),
        methodology: request.methodology.clone(),
        timeline: request.timeline.clone(),
        expected_outcomes: request.expected_outcomes.clone(),
        personal_motivation: request.personal_motivation.clone(),
        relevant_experience: request.relevant_experience.clone(),
        questions: request.questions.clone(),
    };

    let project_type = validate_request(&form).map_err(|e| {
        metrics::record_validation_failure(e.field());
        AppError::Validation {
            message: e.to_string(),
            field: Some(e.field().to_string()),
        }
    })?;

    let idea_type = match request.idea_type.as_deref() {
        None => None,
        Some(s) => Some(IdeaType::parse(s).ok_or_else(|| AppError::Validation {
            message: format!("Unrecognized idea type: {}", s),
            field: Some("idea_type".to_string()),
        })?),
    };

    let repo = Repository::new(state.db.clone());

    // The addressed faculty member must exist
    repo.find_faculty_by_id(request.faculty_id)
        .await?
        .ok_or_else(|| AppError::FacultyNotFound {
            id: request.faculty_id.to_string(),
        })?;

    let created = repo
        .create_request(NewCollaborationRequest {
            student_id,
            faculty_id: request.faculty_id,
            project_type,
            idea_type,
            title: request.title,
            description: request.description,
            objectives: request.objectives,
            methodology: request.methodology,
            timeline: request.timeline,
            expected_outcomes: request.expected_outcomes,
            personal_motivation: request.personal_motivation,
            relevant_experience: request.relevant_experience,
            questions: request.questions,
        })
        .await?;

    metrics::record_request_submitted(project_type.as_str());

    tracing::info!(
        request_id = %created.id,
        student_id = %student_id,
        faculty_id = %created.faculty_id,
        "Collaboration request submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitRequestResponse {
            request_id: created.id,
            status: created.status,
        }),
    ))
}

/// List requests for the caller.
/// Faculty see their pending inbox; students see all of their own.
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<RequestResponse>>> {
    let repo = Repository::new(state.db.clone());

    let requests = match auth.role {
        Role::Faculty => repo.list_pending_requests_for_faculty(auth.user_id).await?,
        Role::Student => repo.list_requests_for_student(auth.user_id).await?,
    };

    Ok(Json(requests.into_iter().map(RequestResponse::from).collect()))
}

async fn decide(
    state: AppState,
    auth: AuthContext,
    request_id: Uuid,
    decision: RequestDecision,
) -> Result<Json<DecisionResponse>> {
    let faculty_id = auth.require_faculty()?;

    let repo = Repository::new(state.db.clone());
    let updated = repo.decide_request(request_id, faculty_id, decision).await?;

    metrics::record_request_decision(decision.as_str());

    tracing::info!(
        request_id = %request_id,
        faculty_id = %faculty_id,
        decision = decision.as_str(),
        "Request decided"
    );

    Ok(Json(DecisionResponse {
        id: updated.id,
        status: updated.status,
        responded_at: updated.responded_at.map(|t| t.to_rfc3339()),
    }))
}

/// Accept a pending request (faculty only, at most once)
pub async fn accept_request(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(request_id): Path<Uuid>,
) -> Result<Json<DecisionResponse>> {
    decide(state, auth, request_id, RequestDecision::Accept).await
}

/// Reject a pending request (faculty only, at most once)
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(request_id): Path<Uuid>,
) -> Result<Json<DecisionResponse>> {
    decide(state, auth, request_id, RequestDecision::Reject).await
}
