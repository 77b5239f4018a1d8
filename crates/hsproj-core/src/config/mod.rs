//! Project configuration: per-source partial opinions and the finalized result
//!
//! This module provides:
//! - `PartialConfig`, one source's mergeable contribution
//! - `Config`, the fully-determined configuration handed to the materializer
//! - The on-disk TOML format and the finalization step between the two

pub mod file;
pub mod finalize;
pub mod ghc;
pub mod license;
pub mod partial;

pub use file::ConfigFile;
pub use finalize::{finalize, resolve_build_tools, Config, FieldError, FieldErrors};
pub use ghc::GhcVersion;
pub use license::License;
pub use partial::{accumulate, last_wins, CustomPrelude, Distinct, PartialConfig};

use std::fmt;

/// Every configurable field, named as it appears in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Owner,
    FullName,
    Email,
    License,
    GhcVersions,
    Cabal,
    Stack,
    Github,
    Travis,
    Appveyor,
    Private,
    Bscript,
    Lib,
    Exe,
    Test,
    Bench,
    Prelude,
    Extensions,
    Warnings,
    NoUpload,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Field::Owner => "owner",
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::License => "license",
            Field::GhcVersions => "ghcVersions",
            Field::Cabal => "cabal",
            Field::Stack => "stack",
            Field::Github => "github",
            Field::Travis => "travis",
            Field::Appveyor => "appveyor",
            Field::Private => "private",
            Field::Bscript => "bscript",
            Field::Lib => "lib",
            Field::Exe => "exe",
            Field::Test => "test",
            Field::Bench => "bench",
            Field::Prelude => "prelude",
            Field::Extensions => "extensions",
            Field::Warnings => "warnings",
            Field::NoUpload => "noUpload",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Project features that can be switched on or off from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Target {
    Github,
    Travis,
    Appveyor,
    Private,
    Bscript,
    Lib,
    Exe,
    Test,
    Bench,
}

impl Target {
    pub const ALL: [Target; 9] = [
        Target::Github,
        Target::Travis,
        Target::Appveyor,
        Target::Private,
        Target::Bscript,
        Target::Lib,
        Target::Exe,
        Target::Test,
        Target::Bench,
    ];

    pub fn field(&self) -> Field {
        match self {
            Target::Github => Field::Github,
            Target::Travis => Field::Travis,
            Target::Appveyor => Field::Appveyor,
            Target::Private => Field::Private,
            Target::Bscript => Field::Bscript,
            Target::Lib => Field::Lib,
            Target::Exe => Field::Exe,
            Target::Test => Field::Test,
            Target::Bench => Field::Bench,
        }
    }

    /// Question asked when no source decided this target
    pub fn question(&self) -> &'static str {
        match self {
            Target::Github => "Create a GitHub repository?",
            Target::Travis => "Add Travis CI integration?",
            Target::Appveyor => "Add AppVeyor CI integration?",
            Target::Private => "Make the GitHub repository private?",
            Target::Bscript => "Add a custom Setup.hs build script?",
            Target::Lib => "Add a library target?",
            Target::Exe => "Add an executable target?",
            Target::Test => "Add a test suite?",
            Target::Bench => "Add benchmarks?",
        }
    }

    /// Answer suggested by the prompt, and taken in non-interactive mode
    pub fn default_answer(&self) -> bool {
        matches!(
            self,
            Target::Github | Target::Travis | Target::Lib | Target::Exe | Target::Test
        )
    }

    /// Targets that only make sense alongside a GitHub repository
    pub fn requires_github(&self) -> bool {
        matches!(self, Target::Travis | Target::Appveyor | Target::Private)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().key())
    }
}
