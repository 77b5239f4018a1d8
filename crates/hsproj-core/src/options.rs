//! Command-line directives and their translation into the highest-precedence source

use crate::config::{CustomPrelude, Field, GhcVersion, License, PartialConfig, Target};
use crate::decision::Decision;
use crate::error::{Error, Result};

/// A pair of opposing flags such as `--cabal` / `--no-cabal`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    pub on: bool,
    pub off: bool,
}

impl Toggle {
    pub fn decision(self, field: Field) -> Result<Decision> {
        match (self.on, self.off) {
            (true, true) => Err(Error::conflict(field, "both enabled and disabled")),
            (true, false) => Ok(Decision::Yes),
            (false, true) => Ok(Decision::No),
            (false, false) => Ok(Decision::Unknown),
        }
    }
}

/// Everything the command line can say about the configuration
#[derive(Debug, Clone, Default)]
pub struct Directives {
    /// Targets switched on with `--on`
    pub enable: Vec<Target>,
    /// Targets switched off with `--off`
    pub disable: Vec<Target>,
    pub cabal: Toggle,
    pub stack: Toggle,
    pub license: Option<License>,
    pub ghc_versions: Vec<GhcVersion>,
    pub extensions: Vec<String>,
    pub prelude_package: Option<String>,
    pub prelude_module: Option<String>,
    /// Work without network access: no upload and the restrictive `NONE` license
    pub offline: bool,
    pub no_upload: bool,
}

impl Directives {
    /// Check for contradictions and produce the command-line source.
    ///
    /// Runs before finalization; any conflict aborts the run.
    pub fn into_partial(self) -> Result<PartialConfig> {
        if let Some(target) = self.enable.iter().find(|t| self.disable.contains(*t)) {
            return Err(Error::conflict(
                target.field(),
                "listed in both --on and --off",
            ));
        }

        let mut partial = PartialConfig {
            cabal: self.cabal.decision(Field::Cabal)?,
            stack: self.stack.decision(Field::Stack)?,
            license: self.license,
            ghc_versions: self.ghc_versions.into_iter().collect(),
            extensions: self.extensions.into_iter().collect(),
            prelude: prelude(self.prelude_package, self.prelude_module)?,
            no_upload: if self.no_upload {
                Decision::Yes
            } else {
                Decision::Unknown
            },
            ..Default::default()
        };

        for target in &self.enable {
            *partial.decision_mut(*target) = Decision::Yes;
        }
        for target in &self.disable {
            *partial.decision_mut(*target) = Decision::No;
        }

        if self.offline {
            if let Some(license) = partial.license.filter(|l| *l != License::None) {
                return Err(Error::conflict(
                    Field::License,
                    format!("--offline uses license NONE but --license {} was given", license),
                ));
            }
            partial.license = Some(License::None);
            partial.no_upload = Decision::Yes;
        }

        Ok(partial)
    }
}

fn prelude(package: Option<String>, module: Option<String>) -> Result<Option<CustomPrelude>> {
    match (package, module) {
        (Some(package), Some(module)) => Ok(Some(CustomPrelude { package, module })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(Error::conflict(
            Field::Prelude,
            "--prelude-package requires --prelude-module",
        )),
        (None, Some(_)) => Err(Error::conflict(
            Field::Prelude,
            "--prelude-module requires --prelude-package",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_and_disable_sets() {
        let partial = Directives {
            enable: vec![Target::Github, Target::Lib],
            disable: vec![Target::Bench],
            ..Default::default()
        }
        .into_partial()
        .unwrap();

        assert_eq!(partial.github, Decision::Yes);
        assert_eq!(partial.lib, Decision::Yes);
        assert_eq!(partial.bench, Decision::No);
        assert_eq!(partial.travis, Decision::Unknown);
    }

    #[test]
    fn test_target_in_both_sets_conflicts() {
        let err = Directives {
            enable: vec![Target::Test, Target::Travis],
            disable: vec![Target::Travis],
            ..Default::default()
        }
        .into_partial()
        .unwrap_err();

        assert!(matches!(
            err,
            Error::ConflictingDirective {
                field: Field::Travis,
                ..
            }
        ));
    }

    #[test]
    fn test_build_tool_toggles() {
        let partial = Directives {
            cabal: Toggle { on: true, off: false },
            stack: Toggle { on: false, off: true },
            ..Default::default()
        }
        .into_partial()
        .unwrap();
        assert_eq!((partial.cabal, partial.stack), (Decision::Yes, Decision::No));

        let err = Directives {
            stack: Toggle { on: true, off: true },
            ..Default::default()
        }
        .into_partial()
        .unwrap_err();
        assert!(matches!(err, Error::ConflictingDirective { field: Field::Stack, .. }));
    }

    #[test]
    fn test_offline_forces_no_upload_and_license() {
        let partial = Directives {
            offline: true,
            ..Default::default()
        }
        .into_partial()
        .unwrap();

        assert_eq!(partial.license, Some(License::None));
        assert_eq!(partial.no_upload, Decision::Yes);
        assert_eq!(partial.test, Decision::Unknown);
    }

    #[test]
    fn test_offline_rejects_explicit_license() {
        let err = Directives {
            offline: true,
            license: Some(License::Mit),
            ..Default::default()
        }
        .into_partial()
        .unwrap_err();
        assert!(matches!(err, Error::ConflictingDirective { field: Field::License, .. }));
    }

    #[test]
    fn test_prelude_needs_both_halves() {
        let err = Directives {
            prelude_package: Some("relude".into()),
            ..Default::default()
        }
        .into_partial()
        .unwrap_err();
        assert!(matches!(err, Error::ConflictingDirective { field: Field::Prelude, .. }));

        let partial = Directives {
            prelude_package: Some("relude".into()),
            prelude_module: Some("Relude".into()),
            ..Default::default()
        }
        .into_partial()
        .unwrap();
        assert_eq!(partial.prelude.unwrap().package, "relude");
    }

    #[test]
    fn test_no_flags_is_empty_source() {
        assert!(Directives::default().into_partial().unwrap().is_empty());
    }
}
