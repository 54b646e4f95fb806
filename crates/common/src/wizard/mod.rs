//! Selection wizard state machine
//!
//! The wizard is a linear flow over the persisted selection:
//! project types first, then the collaboration approach, then browsing.
//! Every step except the first has an entry guard that redirects back to
//! the first unmet step. The guard protects UX flow only; data integrity
//! is enforced at the persistence layer.

use crate::db::models::{IdeaType, SelectionSnapshot};
use serde::{Deserialize, Serialize};

/// Pages of the selection wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Step 1: choose one or more project types
    Types,
    /// Step 2: choose own-idea vs. collaborate
    Approach,
    /// Step 3: browse faculty or posted projects
    Browse,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Types => "types",
            WizardStep::Approach => "approach",
            WizardStep::Browse => "browse",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "types" => Some(WizardStep::Types),
            "approach" => Some(WizardStep::Approach),
            "browse" => Some(WizardStep::Browse),
            _ => None,
        }
    }
}

/// How far the student has progressed, derived purely from stored state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Nothing chosen yet
    NoSelection,
    /// Step 1 done, step 2 pending
    TypesChosen,
    /// Both steps done; browsing is unlocked
    ApproachChosen,
}

/// Outcome of an entry guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    /// Prerequisites met; the step may render
    Render,
    /// Prerequisites missing; send the student back
    RedirectTo(WizardStep),
}

/// Where browsing lands after step 2.
/// The only algorithmic branch in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowseDestination {
    /// Student has their own idea and looks for a supervisor
    FacultyBrowse,
    /// Student joins an existing posted project
    ProjectBrowse,
}

/// Derive the furthest completed state from a selection snapshot
pub fn progress(selection: &SelectionSnapshot) -> SelectionState {
    if selection.project_types.is_empty() {
        SelectionState::NoSelection
    } else if selection.idea_type.is_none() {
        SelectionState::TypesChosen
    } else {
        SelectionState::ApproachChosen
    }
}

/// Check whether a step may render given the persisted selection
pub fn entry_guard(step: WizardStep, selection: &SelectionSnapshot) -> StepDecision {
    match step {
        // The first step is always reachable
        WizardStep::Types => StepDecision::Render,

        WizardStep::Approach => {
            if selection.project_types.is_empty() {
                StepDecision::RedirectTo(WizardStep::Types)
            } else {
                StepDecision::Render
            }
        }

        WizardStep::Browse => match progress(selection) {
            SelectionState::NoSelection => StepDecision::RedirectTo(WizardStep::Types),
            SelectionState::TypesChosen => StepDecision::RedirectTo(WizardStep::Approach),
            SelectionState::ApproachChosen => StepDecision::Render,
        },
    }
}

/// Route the completed wizard to its browse page
pub fn browse_destination(idea_type: IdeaType) -> BrowseDestination {
    match idea_type {
        IdeaType::OwnIdea => BrowseDestination::FacultyBrowse,
        IdeaType::Collaborate => BrowseDestination::ProjectBrowse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ProjectType;

    fn snapshot(types: Vec<ProjectType>, idea: Option<IdeaType>) -> SelectionSnapshot {
        SelectionSnapshot {
            project_types: types,
            idea_type: idea,
        }
    }

    #[test]
    fn test_progress_derivation() {
        assert_eq!(progress(&snapshot(vec![], None)), SelectionState::NoSelection);
        assert_eq!(
            progress(&snapshot(vec![ProjectType::Project], None)),
            SelectionState::TypesChosen
        );
        assert_eq!(
            progress(&snapshot(vec![ProjectType::Patent], Some(IdeaType::Collaborate))),
            SelectionState::ApproachChosen
        );
    }

    #[test]
    fn test_first_step_always_renders() {
        assert_eq!(
            entry_guard(WizardStep::Types, &snapshot(vec![], None)),
            StepDecision::Render
        );
    }

    #[test]
    fn test_approach_guard_redirects_without_types() {
        assert_eq!(
            entry_guard(WizardStep::Approach, &snapshot(vec![], None)),
            StepDecision::RedirectTo(WizardStep::Types)
        );
        assert_eq!(
            entry_guard(WizardStep::Approach, &snapshot(vec![ProjectType::Project], None)),
            StepDecision::Render
        );
    }

    #[test]
    fn test_browse_guard_redirects_to_first_unmet_step() {
        assert_eq!(
            entry_guard(WizardStep::Browse, &snapshot(vec![], None)),
            StepDecision::RedirectTo(WizardStep::Types)
        );
        assert_eq!(
            entry_guard(WizardStep::Browse, &snapshot(vec![ProjectType::Project], None)),
            StepDecision::RedirectTo(WizardStep::Approach)
        );
        assert_eq!(
            entry_guard(
                WizardStep::Browse,
                &snapshot(vec![ProjectType::Project], Some(IdeaType::OwnIdea))
            ),
            StepDecision::Render
        );
    }

    #[test]
    fn test_browse_branch() {
        assert_eq!(browse_destination(IdeaType::OwnIdea), BrowseDestination::FacultyBrowse);
        assert_eq!(browse_destination(IdeaType::Collaborate), BrowseDestination::ProjectBrowse);
    }

    #[test]
    fn test_step_name_roundtrip() {
        for step in [WizardStep::Types, WizardStep::Approach, WizardStep::Browse] {
            assert_eq!(WizardStep::parse(step.as_str()), Some(step));
        }
        assert_eq!(WizardStep::parse("summary"), None);
    }
}
