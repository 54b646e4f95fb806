//! Selection wizard handlers
//!
//! The server-persisted selection row is the single source of truth for
//! wizard state; any client-side copy is a read-through cache that must
//! be refreshed on every step transition.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use lablink_common::{
    auth::AuthContext,
    db::{
        models::{dedup_project_types, IdeaType, ProjectType, SelectionSnapshot},
        Repository,
    },
    errors::{AppError, Result},
    metrics,
    wizard::{self, StepDecision, WizardStep},
};

/// Request to save a wizard selection
#[derive(Debug, Deserialize)]
pub struct SaveSelectionRequest {
    pub project_types: Vec<String>,

    #[serde(default)]
    pub idea_type: Option<String>,
}

/// A student's current selection plus the derived wizard state
#[derive(Serialize)]
pub struct SelectionResponse {
    pub project_types: Vec<String>,
    pub idea_type: Option<String>,
    pub state: wizard::SelectionState,
}

impl SelectionResponse {
    fn from_snapshot(snapshot: &SelectionSnapshot) -> Self {
        Self {
            project_types: snapshot
                .project_types
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            idea_type: snapshot.idea_type.map(|i| i.as_str().to_string()),
            state: wizard::progress(snapshot),
        }
    }
}

/// Entry-guard decision for a wizard step
#[derive(Serialize)]
pub struct WizardStepResponse {
    pub step: String,
    pub decision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<wizard::BrowseDestination>,
}

fn parse_project_types(raw: &[String]) -> Result<Vec<ProjectType>> {
    let mut parsed = Vec::with_capacity(raw.len());
    for s in raw {
        let t = ProjectType::parse(s).ok_or_else(|| AppError::Validation {
            message: format!("Unrecognized project type: {}", s),
            field: Some("project_types".to_string()),
        })?;
        parsed.push(t);
    }
    Ok(dedup_project_types(&parsed))
}

fn parse_idea_type(raw: Option<&str>) -> Result<Option<IdeaType>> {
    match raw {
        None => Ok(None),
        Some(s) => IdeaType::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation {
                message: format!("Unrecognized idea type: {}", s),
                field: Some("idea_type".to_string()),
            }),
    }
}

/// Students may only touch their own selection
fn require_own_selection(auth: &AuthContext, student_id: Uuid) -> Result<()> {
    auth.require_student()?;
    if auth.user_id != student_id {
        return Err(AppError::Forbidden {
            message: "Selection belongs to a different student".to_string(),
        });
    }
    Ok(())
}

/// Get a student's wizard selection.
/// A never-seen student gets the empty default, not an error.
pub async fn get_selection(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(student_id): Path<Uuid>,
) -> Result<Json<SelectionResponse>> {
    require_own_selection(&auth, student_id)?;

    let repo = Repository::new(state.db.clone());
    let snapshot = repo.get_selection(student_id).await?;

    Ok(Json(SelectionResponse::from_snapshot(&snapshot)))
}

/// Save a student's wizard selection (idempotent per student)
pub async fn save_selection(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(student_id): Path<Uuid>,
    Json(request): Json<SaveSelectionRequest>,
) -> Result<Json<SelectionResponse>> {
    require_own_selection(&auth, student_id)?;

    let project_types = parse_project_types(&request.project_types)?;
    let idea_type = parse_idea_type(request.idea_type.as_deref())?;

    // An approach without any chosen types skips step 1 of the wizard
    if idea_type.is_some() && project_types.is_empty() {
        return Err(AppError::Validation {
            message: "Project types must be chosen before an idea type".to_string(),
            field: Some("project_types".to_string()),
        });
    }

    let repo = Repository::new(state.db.clone());
    let snapshot = repo
        .save_selection(student_id, project_types, idea_type)
        .await?;

    let response = SelectionResponse::from_snapshot(&snapshot);
    metrics::record_selection_save(match response.state {
        wizard::SelectionState::NoSelection => "no_selection",
        wizard::SelectionState::TypesChosen => "types_chosen",
        wizard::SelectionState::ApproachChosen => "approach_chosen",
    });

    tracing::info!(
        student_id = %student_id,
        state = ?response.state,
        "Selection saved"
    );

    Ok(Json(response))
}

/// Run the entry guard for a wizard step against the persisted selection
pub async fn wizard_step(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((student_id, step)): Path<(Uuid, String)>,
) -> Result<Json<WizardStepResponse>> {
    require_own_selection(&auth, student_id)?;

    let step = WizardStep::parse(&step).ok_or_else(|| AppError::Validation {
        message: format!("Unknown wizard step: {}", step),
        field: Some("step".to_string()),
    })?;

    let repo = Repository::new(state.db.clone());
    let snapshot = repo.get_selection(student_id).await?;

    let response = match wizard::entry_guard(step, &snapshot) {
        StepDecision::Render => {
            // Browsing is contextualized by the chosen approach
            let destination = match (step, snapshot.idea_type) {
                (WizardStep::Browse, Some(idea)) => Some(wizard::browse_destination(idea)),
                _ => None,
            };

            WizardStepResponse {
                step: step.as_str().to_string(),
                decision: "render".to_string(),
                redirect_to: None,
                destination,
            }
        }
        StepDecision::RedirectTo(target) => {
            metrics::record_wizard_redirect(step.as_str(), target.as_str());

            tracing::debug!(
                student_id = %student_id,
                from = step.as_str(),
                to = target.as_str(),
                "Wizard step guard redirected"
            );

            WizardStepResponse {
                step: step.as_str().to_string(),
                decision: "redirect".to_string(),
                redirect_to: Some(target.as_str().to_string()),
                destination: None,
            }
        }
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_types_dedups() {
        let raw = vec![
            "PROJECT".to_string(),
            "RESEARCH_PAPER".to_string(),
            "PROJECT".to_string(),
        ];
        let parsed = parse_project_types(&raw).unwrap();
        assert_eq!(parsed, vec![ProjectType::Project, ProjectType::ResearchPaper]);
    }

    #[test]
    fn test_parse_project_types_rejects_unknown() {
        let raw = vec!["PROJECT".to_string(), "THESIS".to_string()];
        let err = parse_project_types(&raw).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_parse_idea_type() {
        assert_eq!(parse_idea_type(None).unwrap(), None);
        assert_eq!(
            parse_idea_type(Some("OWN_IDEA")).unwrap(),
            Some(IdeaType::OwnIdea)
        );
        assert!(parse_idea_type(Some("SOLO")).is_err());
    }
}
