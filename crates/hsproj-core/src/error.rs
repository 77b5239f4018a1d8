//! Error taxonomy for configuration resolution

use crate::config::{Field, FieldError, FieldErrors};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcomes of a resolution run.
///
/// An unavailable ambient source (no default config file, no git identity)
/// is never an `Error`; it becomes an empty contribution plus a [`crate::report::Note`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {}", .0.display())]
    ExplicitSourceMissing(PathBuf),

    #[error("conflicting options for '{field}': {reason}")]
    ConflictingDirective { field: Field, reason: String },

    #[error("neither cabal nor stack was chosen as a build tool{}", others_suffix(.others))]
    BuildToolConflict { others: FieldErrors },

    #[error("could not ask for '{field}': {reason}")]
    Prompt { field: Field, reason: String },

    #[error("configuration is incomplete:\n{0}")]
    Unresolved(FieldErrors),

    #[error("project directory already exists: {}", .0.display())]
    ProjectExists(PathBuf),
}

impl Error {
    pub(crate) fn conflict(field: Field, reason: impl Into<String>) -> Self {
        Error::ConflictingDirective {
            field,
            reason: reason.into(),
        }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        if let Some(FieldError::Prompt { field, reason }) = errors.prompt_failure() {
            return Error::Prompt {
                field: *field,
                reason: reason.clone(),
            };
        }
        if errors.has_build_tool_conflict() {
            Error::BuildToolConflict {
                others: errors.without_build_tool_conflict(),
            }
        } else {
            Error::Unresolved(errors)
        }
    }
}

fn others_suffix(others: &FieldErrors) -> String {
    if others.is_empty() {
        String::new()
    } else {
        format!("\n{}", others)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_owner() -> FieldError {
        FieldError::Missing {
            field: Field::Owner,
            reason: "no repository owner given by any source".to_string(),
        }
    }

    #[test]
    fn test_build_tool_conflict_keeps_other_errors() {
        let errors = FieldErrors(vec![missing_owner(), FieldError::BuildToolConflict]);

        match Error::from(errors) {
            Error::BuildToolConflict { others } => {
                assert_eq!(others, FieldErrors(vec![missing_owner()]));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_tool_conflict_message_lists_other_errors() {
        let errors = FieldErrors(vec![FieldError::BuildToolConflict, missing_owner()]);
        let message = Error::from(errors).to_string();

        assert!(message.starts_with("neither cabal nor stack"));
        assert!(message.contains("owner: no repository owner"));
    }

    #[test]
    fn test_prompt_failure_takes_precedence() {
        let errors = FieldErrors(vec![
            missing_owner(),
            FieldError::Prompt {
                field: Field::Cabal,
                reason: "terminal closed".to_string(),
            },
        ]);

        assert!(matches!(
            Error::from(errors),
            Error::Prompt { field: Field::Cabal, .. }
        ));
    }
}
