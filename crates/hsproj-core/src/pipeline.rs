//! Resolution pipeline: fold the sources, finalize, and re-enter once with answers
//!
//! `Gathering -> Merging -> Finalizing -> {Resolved | Failed}`. When the only
//! failures are missing text fields and a person is at the keyboard, the
//! answers become one more, highest-precedence source and finalization runs
//! a second and last time.

use crate::config::{finalize, Config, ConfigFile, Field, PartialConfig};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use std::collections::HashMap;

/// Merge `sources` (lowest precedence first) and finalize, asking for what is missing.
pub fn resolve(sources: &[PartialConfig], prompter: &mut dyn Prompter) -> Result<Config> {
    let mut memo = Memo::new(prompter);
    let merged = PartialConfig::merge_all(sources);

    let errors = match finalize(&merged, &mut memo) {
        Ok(config) => return Ok(config),
        Err(errors) => errors,
    };

    let missing = errors.missing_fields();
    let answerable = !missing.is_empty() && missing.len() == errors.len();
    if !answerable || !memo.is_interactive() {
        return Err(errors.into());
    }

    let answers = ask_missing(&missing, &mut memo)?;
    let merged = merged.merge(&answers);
    finalize(&merged, &mut memo).map_err(Error::from)
}

/// Render a merged, unfinalized configuration in config-file syntax
pub fn describe(merged: &PartialConfig) -> anyhow::Result<String> {
    ConfigFile::from(merged).to_toml()
}

/// Stops at the first question the prompter cannot ask.
fn ask_missing(missing: &[Field], prompter: &mut dyn Prompter) -> Result<PartialConfig> {
    let mut answers = PartialConfig::empty();

    for field in missing {
        let (question, slot) = match field {
            Field::Owner => ("Repository owner (GitHub user or organisation)", &mut answers.owner),
            Field::FullName => ("Author full name", &mut answers.full_name),
            Field::Email => ("Author email", &mut answers.email),
            _ => continue,
        };
        let answer = prompter.input(question, None).map_err(|e| Error::Prompt {
            field: *field,
            reason: format!("{:#}", e),
        })?;
        *slot = Some(answer);
    }

    Ok(answers)
}

/// Remembers yes/no answers so re-entering finalization never asks twice
struct Memo<'a> {
    inner: &'a mut dyn Prompter,
    answers: HashMap<String, bool>,
}

impl<'a> Memo<'a> {
    fn new(inner: &'a mut dyn Prompter) -> Self {
        Self {
            inner,
            answers: HashMap::new(),
        }
    }
}

impl Prompter for Memo<'_> {
    fn is_interactive(&self) -> bool {
        self.inner.is_interactive()
    }

    fn confirm(&mut self, question: &str, default: bool) -> anyhow::Result<bool> {
        if let Some(answer) = self.answers.get(question) {
            return Ok(*answer);
        }
        let answer = self.inner.confirm(question, default)?;
        self.answers.insert(question.to_string(), answer);
        Ok(answer)
    }

    fn input(&mut self, question: &str, suggestion: Option<&str>) -> anyhow::Result<String> {
        self.inner.input(question, suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{License, Target};
    use crate::decision::Decision;
    use crate::prompt::testing::{Failing, Scripted};
    use crate::prompt::NonInteractive;
    use crate::sources;

    fn identity() -> PartialConfig {
        PartialConfig {
            owner: Some("alice".into()),
            full_name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_file_overrides_defaults_and_empty_cli_contributes_nothing() {
        let file = PartialConfig {
            license: Some(License::Bsd3),
            ..identity()
        };
        let sources = [sources::defaults(), file, PartialConfig::empty()];

        let config = resolve(&sources, &mut NonInteractive).unwrap();
        assert_eq!(config.license, License::Bsd3);
    }

    #[test]
    fn test_end_to_end_prompts_only_for_undecided_fields() {
        let defaults = PartialConfig {
            license: Some(License::Mit),
            github: Decision::Unknown,
            ..Default::default()
        };
        let identity = PartialConfig {
            owner: Some("alice".into()),
            ..Default::default()
        };
        let file = PartialConfig {
            github: Decision::Yes,
            ..Default::default()
        };
        let cli = PartialConfig::empty();

        let mut prompter = Scripted::new().typing(&["Alice Liddell", "alice@example.com"]);
        let config = resolve(&[defaults, identity, file, cli], &mut prompter).unwrap();

        assert_eq!(config.owner, "alice");
        assert_eq!(config.full_name, "Alice Liddell");
        assert_eq!(config.license, License::Mit);
        assert!(config.github);

        assert!(!prompter.was_asked(Target::Github.question()));
        assert!(!prompter.was_asked("owner"));
        let travis_prompts = prompter
            .asked
            .iter()
            .filter(|q| q.as_str() == Target::Travis.question())
            .count();
        assert_eq!(travis_prompts, 1);
    }

    #[test]
    fn test_non_interactive_reports_missing_fields() {
        let err = resolve(&[sources::defaults()], &mut NonInteractive).unwrap_err();
        match err {
            Error::Unresolved(errors) => {
                assert_eq!(
                    errors.missing_fields(),
                    vec![Field::Owner, Field::FullName, Field::Email]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_tool_conflict_is_never_retried() {
        let cli = PartialConfig {
            cabal: Decision::No,
            stack: Decision::No,
            ..Default::default()
        };
        let mut prompter = Scripted::new();
        let err = resolve(&[identity(), cli], &mut prompter).unwrap_err();
        assert!(matches!(err, Error::BuildToolConflict { .. }));
    }

    #[test]
    fn test_build_tool_conflict_reports_missing_owner() {
        let cli = PartialConfig {
            cabal: Decision::No,
            stack: Decision::No,
            ..Default::default()
        };
        let sources = [PartialConfig { owner: None, ..identity() }, cli];
        let err = resolve(&sources, &mut NonInteractive).unwrap_err();

        match err {
            Error::BuildToolConflict { others } => {
                assert_eq!(others.missing_fields(), vec![Field::Owner]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failed_prompt_is_fatal_after_one_question() {
        let mut prompter = Failing::default();
        let err = resolve(&[sources::defaults(), identity()], &mut prompter).unwrap_err();

        assert_eq!(prompter.calls, 1);
        assert!(matches!(err, Error::Prompt { field: Field::Cabal, .. }));
    }

    #[test]
    fn test_failed_text_prompt_stops_re_entry() {
        let decided = PartialConfig {
            cabal: Decision::Yes,
            github: Decision::No,
            bscript: Decision::Yes,
            lib: Decision::Yes,
            exe: Decision::No,
            test: Decision::Yes,
            bench: Decision::No,
            ..Default::default()
        };
        let mut prompter = Failing::default();
        let err = resolve(&[sources::defaults(), decided], &mut prompter).unwrap_err();

        assert_eq!(prompter.calls, 1);
        assert!(matches!(err, Error::Prompt { field: Field::Owner, .. }));
    }

    #[test]
    fn test_invalid_fields_are_not_prompted_for() {
        let cli = PartialConfig {
            github: Decision::No,
            travis: Decision::Yes,
            ..Default::default()
        };
        let sources = [PartialConfig { owner: None, ..identity() }, cli];
        let err = resolve(&sources, &mut Scripted::new()).unwrap_err();

        match err {
            Error::Unresolved(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_describe_renders_merged_sources() {
        let merged = PartialConfig::merge_all(&[sources::defaults(), identity()]);
        let rendered = describe(&merged).unwrap();
        assert!(rendered.contains("license = \"MIT\""));
        assert!(rendered.contains("owner = \"alice\""));
    }
}
