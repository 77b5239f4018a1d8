//! Finalization: reduce a merged `PartialConfig` to a concrete `Config`

use super::ghc::consumption_order;
use super::{CustomPrelude, Field, GhcVersion, License, PartialConfig, Target};
use crate::decision::Decision;
use crate::prompt::Prompter;
use std::fmt;

/// GHC warning flags used when no source lists any
pub const DEFAULT_WARNINGS: &[&str] = &[
    "-Wall",
    "-Wcompat",
    "-Widentities",
    "-Wincomplete-uni-patterns",
    "-Wincomplete-record-updates",
    "-Wredundant-constraints",
];

/// A fully-determined project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub owner: String,
    pub full_name: String,
    pub email: String,
    pub license: License,
    /// Ascending, always containing the default GHC
    pub ghc_versions: Vec<GhcVersion>,
    pub cabal: bool,
    pub stack: bool,
    pub github: bool,
    pub travis: bool,
    pub appveyor: bool,
    pub private: bool,
    pub bscript: bool,
    pub lib: bool,
    pub exe: bool,
    pub test: bool,
    pub bench: bool,
    pub prelude: Option<CustomPrelude>,
    pub extensions: Vec<String>,
    pub warnings: Vec<String>,
    pub no_upload: bool,
}

impl Config {
    /// Whether a remote repository should be created and pushed to
    pub fn upload(&self) -> bool {
        self.github && !self.no_upload
    }

    /// Newest compiler in the build matrix
    pub fn latest_ghc(&self) -> GhcVersion {
        self.ghc_versions
            .last()
            .cloned()
            .unwrap_or_else(GhcVersion::default_version)
    }
}

/// Why a single field could not be finalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// No source supplied a value and there is no hard default
    Missing { field: Field, reason: String },
    /// A value exists but contradicts another field
    Invalid { field: Field, reason: String },
    /// The prompter could not ask; nothing after it was asked either
    Prompt { field: Field, reason: String },
    /// Both build tools were declined
    BuildToolConflict,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Missing { field, .. }
            | FieldError::Invalid { field, .. }
            | FieldError::Prompt { field, .. } => *field,
            FieldError::BuildToolConflict => Field::Cabal,
        }
    }

    pub fn is_prompt_failure(&self) -> bool {
        matches!(self, FieldError::Prompt { .. })
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing { field, reason } | FieldError::Invalid { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            FieldError::Prompt { field, reason } => write!(f, "{}: could not ask: {}", field, reason),
            FieldError::BuildToolConflict => {
                write!(f, "cabal/stack: at least one build tool must be enabled")
            }
        }
    }
}

/// Every field that failed finalization, reported together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_build_tool_conflict(&self) -> bool {
        self.0.contains(&FieldError::BuildToolConflict)
    }

    /// Everything except the build-tool conflict, in report order
    pub fn without_build_tool_conflict(&self) -> FieldErrors {
        FieldErrors(
            self.0
                .iter()
                .filter(|e| **e != FieldError::BuildToolConflict)
                .cloned()
                .collect(),
        )
    }

    /// The prompt failure that stopped finalization, if any
    pub fn prompt_failure(&self) -> Option<&FieldError> {
        self.0.iter().find(|e| e.is_prompt_failure())
    }

    /// Fields lacking a value, in report order
    pub fn missing_fields(&self) -> Vec<Field> {
        self.0
            .iter()
            .filter_map(|e| match e {
                FieldError::Missing { field, .. } => Some(*field),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|e| format!("  - {}", e)).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Finalize a merged configuration.
///
/// Unknown decisions are put to `prompter`; text fields without a value are
/// reported, never prompted here. Returns either a complete `Config` or every
/// problem found, never a partially filled result. Once the prompter fails,
/// no further question is put to it.
pub fn finalize(partial: &PartialConfig, prompter: &mut dyn Prompter) -> Result<Config, FieldErrors> {
    let mut errors = Vec::new();

    let owner = required_text(&partial.owner, Field::Owner, "repository owner", &mut errors);
    let full_name = required_text(&partial.full_name, Field::FullName, "author name", &mut errors);
    let email = required_text(&partial.email, Field::Email, "author email", &mut errors);
    let license = partial.license.unwrap_or(License::Mit);

    let (cabal, stack) = match resolve_build_tools(partial.cabal, partial.stack, prompter) {
        Ok(tools) => tools,
        Err(e) => {
            errors.push(e);
            (false, false)
        }
    };

    let github = ask_target(partial, Target::Github, prompter, &mut errors);
    let mut decide = |target: Target| {
        if target.requires_github() && !github {
            without_github(partial, target, &mut errors)
        } else {
            ask_target(partial, target, prompter, &mut errors)
        }
    };
    let private = decide(Target::Private);
    let travis = decide(Target::Travis);
    let appveyor = decide(Target::Appveyor);
    let bscript = decide(Target::Bscript);
    let lib = decide(Target::Lib);
    let exe = decide(Target::Exe);
    let test = decide(Target::Test);
    let bench = decide(Target::Bench);

    let lib_or_exe_reported = errors
        .iter()
        .any(|e| e.is_prompt_failure() || matches!(e.field(), Field::Lib | Field::Exe));
    if !lib && !exe && !lib_or_exe_reported {
        errors.push(FieldError::Invalid {
            field: Field::Lib,
            reason: "a project needs a library, an executable, or both".to_string(),
        });
    }

    let warnings = if partial.warnings.is_empty() {
        DEFAULT_WARNINGS.iter().map(|w| w.to_string()).collect()
    } else {
        partial.warnings.as_slice().to_vec()
    };

    match (owner, full_name, email) {
        (Some(owner), Some(full_name), Some(email)) if errors.is_empty() => Ok(Config {
            owner,
            full_name,
            email,
            license,
            ghc_versions: consumption_order(partial.ghc_versions.as_slice()),
            cabal,
            stack,
            github,
            travis,
            appveyor,
            private,
            bscript,
            lib,
            exe,
            test,
            bench,
            prelude: partial.prelude.clone(),
            extensions: partial.extensions.as_slice().to_vec(),
            warnings,
            no_upload: partial.no_upload == Decision::Yes,
        }),
        _ => Err(FieldErrors(errors)),
    }
}

/// Settle the two build-tool decisions together.
///
/// | cabal   | stack   | result                                   |
/// |---------|---------|------------------------------------------|
/// | Unknown | Unknown | ask cabal; ask stack only if cabal declined |
/// | No      | No      | `BuildToolConflict`                      |
/// | Yes     | Yes     | both                                     |
/// | Yes     | Unknown/No | cabal only                            |
/// | Unknown/No | Yes  | stack only                               |
/// | No      | Unknown | stack only                               |
/// | Unknown | No      | cabal only                               |
pub fn resolve_build_tools(
    cabal: Decision,
    stack: Decision,
    prompter: &mut dyn Prompter,
) -> Result<(bool, bool), FieldError> {
    use Decision::{No, Unknown, Yes};

    match (cabal, stack) {
        (Unknown, Unknown) => {
            if confirm(prompter, Field::Cabal, "Use cabal as the build tool?", true)? {
                Ok((true, false))
            } else if confirm(prompter, Field::Stack, "Use stack as the build tool?", true)? {
                Ok((false, true))
            } else {
                Err(FieldError::BuildToolConflict)
            }
        }
        (No, No) => Err(FieldError::BuildToolConflict),
        (Yes, Yes) => Ok((true, true)),
        (Yes, Unknown) | (Yes, No) | (Unknown, No) => Ok((true, false)),
        (Unknown, Yes) | (No, Yes) | (No, Unknown) => Ok((false, true)),
    }
}

fn required_text(
    value: &Option<String>,
    field: Field,
    what: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        Some(_) => {
            errors.push(FieldError::Missing {
                field,
                reason: format!("{} is empty", what),
            });
            None
        }
        None => {
            errors.push(FieldError::Missing {
                field,
                reason: format!("no {} given by any source", what),
            });
            None
        }
    }
}

fn confirm(
    prompter: &mut dyn Prompter,
    field: Field,
    question: &str,
    default: bool,
) -> Result<bool, FieldError> {
    prompter
        .confirm(question, default)
        .map_err(|e| FieldError::Prompt {
            field,
            reason: format!("{:#}", e),
        })
}

fn ask_target(
    partial: &PartialConfig,
    target: Target,
    prompter: &mut dyn Prompter,
    errors: &mut Vec<FieldError>,
) -> bool {
    if errors.iter().any(FieldError::is_prompt_failure) {
        return false;
    }
    let answer = partial
        .decision(target)
        .resolve(|| confirm(prompter, target.field(), target.question(), target.default_answer()));
    answer.unwrap_or_else(|e| {
        errors.push(e);
        false
    })
}

/// Targets that need a GitHub repository are off without one; an explicit `Yes` is an error.
fn without_github(partial: &PartialConfig, target: Target, errors: &mut Vec<FieldError>) -> bool {
    if partial.decision(target) == Decision::Yes {
        errors.push(FieldError::Invalid {
            field: target.field(),
            reason: "requires the GitHub integration, which is disabled".to_string(),
        });
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::{Failing, Scripted};
    use crate::prompt::NonInteractive;

    fn identity() -> PartialConfig {
        PartialConfig {
            owner: Some("alice".into()),
            full_name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            ..Default::default()
        }
    }

    fn fully_decided() -> PartialConfig {
        let mut p = identity();
        p.cabal = Decision::Yes;
        p.stack = Decision::No;
        for target in Target::ALL {
            *p.decision_mut(target) = Decision::Yes;
        }
        p
    }

    #[test]
    fn test_fully_decided_config_needs_no_prompts() {
        let mut prompter = Scripted::new();
        let config = finalize(&fully_decided(), &mut prompter).unwrap();

        assert!(prompter.asked.is_empty());
        assert!(config.cabal && !config.stack);
        assert!(config.github && config.travis && config.private);
        assert_eq!(config.license, License::Mit);
        assert_eq!(config.ghc_versions, vec![GhcVersion::default_version()]);
        assert_eq!(config.warnings.len(), DEFAULT_WARNINGS.len());
    }

    #[test]
    fn test_missing_text_fields_are_all_reported() {
        let mut p = fully_decided();
        p.owner = None;
        p.email = Some("  ".into());

        let errors = finalize(&p, &mut Scripted::new()).unwrap_err();
        assert_eq!(errors.missing_fields(), vec![Field::Owner, Field::Email]);
    }

    #[test]
    fn test_unknown_decisions_are_prompted() {
        let mut p = identity();
        p.cabal = Decision::Yes;
        p.github = Decision::No;

        let mut prompter = Scripted::new();
        let config = finalize(&p, &mut prompter).unwrap();

        assert!(prompter.was_asked("Setup.hs"));
        assert!(prompter.was_asked("test suite"));
        assert!(!prompter.was_asked("Travis"));
        assert!(!config.travis && !config.private && !config.appveyor);
    }

    #[test]
    fn test_explicit_ci_without_github_is_invalid() {
        let mut p = fully_decided();
        p.github = Decision::No;
        p.travis = Decision::Yes;
        p.appveyor = Decision::Unknown;
        p.private = Decision::Unknown;

        let errors = finalize(&p, &mut Scripted::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().field(), Field::Travis);
    }

    #[test]
    fn test_neither_lib_nor_exe_is_invalid() {
        let mut p = fully_decided();
        p.lib = Decision::No;
        p.exe = Decision::No;

        let errors = finalize(&p, &mut Scripted::new()).unwrap_err();
        assert_eq!(errors.iter().next().unwrap().field(), Field::Lib);
    }

    #[test]
    fn test_build_tool_table() {
        use Decision::{No, Unknown, Yes};
        let mut p = NonInteractive;

        assert_eq!(resolve_build_tools(No, No, &mut p), Err(FieldError::BuildToolConflict));
        assert_eq!(resolve_build_tools(Yes, Yes, &mut p), Ok((true, true)));
        assert_eq!(resolve_build_tools(Yes, Unknown, &mut p), Ok((true, false)));
        assert_eq!(resolve_build_tools(Unknown, Yes, &mut p), Ok((false, true)));
        assert_eq!(resolve_build_tools(No, Unknown, &mut p), Ok((false, true)));
        assert_eq!(resolve_build_tools(Unknown, No, &mut p), Ok((true, false)));
    }

    #[test]
    fn test_build_tools_decided_without_prompting() {
        let mut prompter = Scripted::new();
        let tools = resolve_build_tools(Decision::Yes, Decision::Unknown, &mut prompter);
        assert_eq!(tools, Ok((true, false)));
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_build_tools_asks_stack_only_after_cabal_declined() {
        let mut accepts = Scripted::new().confirming(&[true]);
        let tools = resolve_build_tools(Decision::Unknown, Decision::Unknown, &mut accepts);
        assert_eq!(tools, Ok((true, false)));
        assert_eq!(accepts.asked.len(), 1);

        let mut declines = Scripted::new().confirming(&[false, true]);
        let tools = resolve_build_tools(Decision::Unknown, Decision::Unknown, &mut declines);
        assert_eq!(tools, Ok((false, true)));
        assert!(declines.was_asked("stack"));

        let mut refuses = Scripted::new().confirming(&[false, false]);
        let tools = resolve_build_tools(Decision::Unknown, Decision::Unknown, &mut refuses);
        assert_eq!(tools, Err(FieldError::BuildToolConflict));
    }

    #[test]
    fn test_both_tools_declined_fails_finalization() {
        let mut p = fully_decided();
        p.cabal = Decision::No;
        p.stack = Decision::No;

        let errors = finalize(&p, &mut Scripted::new()).unwrap_err();
        assert!(errors.has_build_tool_conflict());
    }

    #[test]
    fn test_prompt_failure_stops_asking() {
        let mut prompter = Failing::default();
        let errors = finalize(&identity(), &mut prompter).unwrap_err();

        assert_eq!(prompter.calls, 1);
        assert_eq!(errors.len(), 1);
        let failure = errors.prompt_failure().unwrap();
        assert_eq!(failure.field(), Field::Cabal);
    }

    #[test]
    fn test_prompt_failure_keeps_text_errors() {
        let mut p = identity();
        p.owner = None;
        p.cabal = Decision::Yes;

        let mut prompter = Failing::default();
        let errors = finalize(&p, &mut prompter).unwrap_err();

        assert_eq!(prompter.calls, 1);
        assert_eq!(errors.missing_fields(), vec![Field::Owner]);
        assert_eq!(errors.prompt_failure().unwrap().field(), Field::Github);
    }

    #[test]
    fn test_github_dependent_targets_follow_target_table() {
        let mut p = fully_decided();
        p.github = Decision::No;
        for target in Target::ALL.into_iter().filter(Target::requires_github) {
            *p.decision_mut(target) = Decision::Unknown;
        }

        let mut prompter = Scripted::new();
        let config = finalize(&p, &mut prompter).unwrap();

        assert!(prompter.asked.is_empty());
        assert!(!config.private && !config.travis && !config.appveyor);
    }

    #[test]
    fn test_upload_requires_github() {
        let mut p = fully_decided();
        p.no_upload = Decision::Yes;
        let config = finalize(&p, &mut NonInteractive).unwrap();
        assert!(config.github && !config.upload());
    }
}
