//! Abstract submission handlers
//!
//! Students submit abstracts; faculty review them. Content is immutable
//! once submitted and review feedback lives on the abstract itself.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use lablink_common::{
    auth::AuthContext,
    db::{
        models::{AbstractReview, AbstractSubmission},
        Repository,
    },
    errors::{AppError, Result},
    metrics,
    validation::validate_abstract,
};

/// Abstract submission payload
#[derive(Debug, Deserialize)]
pub struct SubmitAbstractRequest {
    pub title: String,
    pub content: String,

    #[serde(default)]
    pub keywords: Option<String>,

    #[serde(default)]
    pub methodology: Option<String>,

    #[serde(default)]
    pub expected_outcomes: Option<String>,
}

/// Faculty review payload
#[derive(Debug, Deserialize)]
pub struct ReviewAbstractRequest {
    /// "approved" or "needs_revision"
    pub verdict: String,

    #[serde(default)]
    pub feedback: Option<String>,
}

#[derive(Serialize)]
pub struct AbstractResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub content: String,
    pub keywords: Option<String>,
    pub methodology: Option<String>,
    pub expected_outcomes: Option<String>,
    pub status: String,
    pub feedback: Option<String>,
    pub submitted_at: String,
}

impl From<AbstractSubmission> for AbstractResponse {
    fn from(a: AbstractSubmission) -> Self {
        Self {
            id: a.id,
            student_id: a.student_id,
            title: a.title,
            content: a.content,
            keywords: a.keywords,
            methodology: a.methodology,
            expected_outcomes: a.expected_outcomes,
            status: a.status,
            feedback: a.feedback,
            submitted_at: a.submitted_at.to_rfc3339(),
        }
    }
}

/// Submit a new abstract (student only)
pub async fn submit_abstract(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<SubmitAbstractRequest>,
) -> Result<(StatusCode, Json<AbstractResponse>)> {
    let student_id = auth.require_student()?;

    validate_abstract(&request.title, &request.content).map_err(|e| {
        metrics::record_validation_failure(e.field());
        AppError::Validation {
            message: e.to_string(),
            field: Some(e.field().to_string()),
        }
    })?;

    let repo = Repository::new(state.db.clone());
    let submission = repo
        .create_abstract(
            student_id,
            request.title,
            request.content,
            request.keywords,
            request.methodology,
            request.expected_outcomes,
        )
        .await?;

    metrics::record_abstract_submitted();

    tracing::info!(
        abstract_id = %submission.id,
        student_id = %student_id,
        "Abstract submitted"
    );

    Ok((StatusCode::CREATED, Json(AbstractResponse::from(submission))))
}

/// List the caller's own abstracts (student only)
pub async fn list_abstracts(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<AbstractResponse>>> {
    let student_id = auth.require_student()?;

    let repo = Repository::new(state.db.clone());
    let abstracts = repo
        .list_abstracts_for_student(student_id)
        .await?
        .into_iter()
        .map(AbstractResponse::from)
        .collect();

    Ok(Json(abstracts))
}

/// Review a submitted abstract (faculty only, at most once)
pub async fn review_abstract(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(abstract_id): Path<Uuid>,
    Json(request): Json<ReviewAbstractRequest>,
) -> Result<Json<AbstractResponse>> {
    let faculty_id = auth.require_faculty()?;

    let review = AbstractReview::parse(&request.verdict).ok_or_else(|| AppError::Validation {
        message: "Verdict must be 'approved' or 'needs_revision'".to_string(),
        field: Some("verdict".to_string()),
    })?;

    let repo = Repository::new(state.db.clone());
    let updated = repo
        .review_abstract(abstract_id, review, request.feedback)
        .await?;

    tracing::info!(
        abstract_id = %abstract_id,
        faculty_id = %faculty_id,
        verdict = %request.verdict,
        "Abstract reviewed"
    );

    Ok(Json(AbstractResponse::from(updated)))
}
