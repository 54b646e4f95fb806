//! Domain validation for student submissions
//!
//! Pure, fail-fast checks applied before any persistence call.
//! Rules run in a fixed order and the first failure wins.

use crate::db::models::ProjectType;
use std::fmt;

/// Minimum trimmed length for a request description or abstract content
pub const MIN_DESCRIPTION_CHARS: usize = 100;

/// Raw form fields for a collaboration request submission
#[derive(Debug, Clone, Default)]
pub struct RequestForm {
    pub project_type: Option<String>,
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

/// First validation failure for a request form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestValidationError {
    /// project_type absent or not a recognized value
    MissingProjectType,
    /// title empty after trimming
    MissingTitle,
    /// description below the minimum length after trimming
    DescriptionTooShort { length: usize },
    /// personal_motivation empty after trimming
    MissingMotivation,
}

impl RequestValidationError {
    /// Form field the failure refers to
    pub fn field(&self) -> &'static str {
        match self {
            RequestValidationError::MissingProjectType => "project_type",
            RequestValidationError::MissingTitle => "title",
            RequestValidationError::DescriptionTooShort { .. } => "description",
            RequestValidationError::MissingMotivation => "personal_motivation",
        }
    }
}

impl fmt::Display for RequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestValidationError::MissingProjectType => {
                write!(f, "Project type must be one of PROJECT, PATENT, RESEARCH_PAPER")
            }
            RequestValidationError::MissingTitle => write!(f, "Title is required"),
            RequestValidationError::DescriptionTooShort { length } => write!(
                f,
                "Description must be at least {} characters (got {})",
                MIN_DESCRIPTION_CHARS, length
            ),
            RequestValidationError::MissingMotivation => {
                write!(f, "Personal motivation is required")
            }
        }
    }
}

/// Validate a collaboration request form.
///
/// Rules in order, first failure wins:
/// 1. project_type recognized
/// 2. title non-empty after trim
/// 3. description at least MIN_DESCRIPTION_CHARS after trim
/// 4. personal_motivation non-empty after trim
///
/// The remaining fields pass through unvalidated. Returns the parsed
/// project type on success; the caller persists.
pub fn validate_request(form: &RequestForm) -> Result<ProjectType, RequestValidationError> {
    let project_type = form
        .project_type
        .as_deref()
        .and_then(ProjectType::parse)
        .ok_or(RequestValidationError::MissingProjectType)?;

    if form.title.trim().is_empty() {
        return Err(RequestValidationError::MissingTitle);
    }

    let description_len = form.description.trim().chars().count();
    if description_len < MIN_DESCRIPTION_CHARS {
        return Err(RequestValidationError::DescriptionTooShort {
            length: description_len,
        });
    }

    if form.personal_motivation.trim().is_empty() {
        return Err(RequestValidationError::MissingMotivation);
    }

    Ok(project_type)
}

/// First validation failure for an abstract submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractValidationError {
    /// title empty after trimming
    MissingTitle,
    /// content below the minimum length after trimming
    ContentTooShort { length: usize },
}

impl AbstractValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            AbstractValidationError::MissingTitle => "title",
            AbstractValidationError::ContentTooShort { .. } => "content",
        }
    }
}

impl fmt::Display for AbstractValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractValidationError::MissingTitle => write!(f, "Title is required"),
            AbstractValidationError::ContentTooShort { length } => write!(
                f,
                "Abstract content must be at least {} characters (got {})",
                MIN_DESCRIPTION_CHARS, length
            ),
        }
    }
}

/// Validate an abstract submission: non-empty title, content of at
/// least MIN_DESCRIPTION_CHARS. Same fail-fast ordering as requests.
pub fn validate_abstract(title: &str, content: &str) -> Result<(), AbstractValidationError> {
    if title.trim().is_empty() {
        return Err(AbstractValidationError::MissingTitle);
    }

    let content_len = content.trim().chars().count();
    if content_len < MIN_DESCRIPTION_CHARS {
        return Err(AbstractValidationError::ContentTooShort {
            length: content_len,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RequestForm {
        RequestForm {
            project_type: Some("PROJECT".to_string()),
            title: "Graph-based recommendation engine".to_string(),
            description: "x".repeat(120),
            personal_motivation: "I want to explore applied graph theory.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(validate_request(&valid_form()), Ok(ProjectType::Project));
    }

    #[test]
    fn test_unrecognized_project_type_fails() {
        let mut form = valid_form();
        form.project_type = Some("THESIS".to_string());
        assert_eq!(
            validate_request(&form),
            Err(RequestValidationError::MissingProjectType)
        );

        form.project_type = None;
        assert_eq!(
            validate_request(&form),
            Err(RequestValidationError::MissingProjectType)
        );
    }

    #[test]
    fn test_fail_fast_ordering() {
        // Missing title and short description together: title is checked
        // first, so that is the reported failure.
        let mut form = valid_form();
        form.title = "   ".to_string();
        form.description = "too short".to_string();

        assert_eq!(validate_request(&form), Err(RequestValidationError::MissingTitle));
    }

    #[test]
    fn test_description_boundary() {
        let mut form = valid_form();

        form.description = "x".repeat(99);
        assert_eq!(
            validate_request(&form),
            Err(RequestValidationError::DescriptionTooShort { length: 99 })
        );

        form.description = "x".repeat(100);
        assert!(validate_request(&form).is_ok());
    }

    #[test]
    fn test_description_trimmed_before_counting() {
        let mut form = valid_form();
        // 99 meaningful characters padded with whitespace must still fail
        form.description = format!("  {}  ", "x".repeat(99));
        assert_eq!(
            validate_request(&form),
            Err(RequestValidationError::DescriptionTooShort { length: 99 })
        );
    }

    #[test]
    fn test_missing_motivation() {
        let mut form = valid_form();
        form.personal_motivation = " ".to_string();
        assert_eq!(
            validate_request(&form),
            Err(RequestValidationError::MissingMotivation)
        );
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let mut form = valid_form();
        form.objectives = Some(String::new());
        form.questions = Some("  ".to_string());
        assert!(validate_request(&form).is_ok());
    }

    #[test]
    fn test_abstract_validation() {
        assert_eq!(
            validate_abstract("", &"x".repeat(150)),
            Err(AbstractValidationError::MissingTitle)
        );
        assert_eq!(
            validate_abstract("Title", &"x".repeat(99)),
            Err(AbstractValidationError::ContentTooShort { length: 99 })
        );
        assert!(validate_abstract("Title", &"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_error_fields() {
        assert_eq!(RequestValidationError::MissingTitle.field(), "title");
        assert_eq!(
            RequestValidationError::DescriptionTooShort { length: 5 }.field(),
            "description"
        );
    }
}
