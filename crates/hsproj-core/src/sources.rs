//! Source adapters and the fixed precedence order between them
//!
//! Precedence, lowest to highest:
//! 1. Compiled-in defaults
//! 2. Local git identity
//! 3. Configuration file
//! 4. Command-line options
//!
//! An unavailable source contributes the empty `PartialConfig` and a note.
//! The only fatal case is an explicitly requested config file that does not exist.

use crate::config::{ConfigFile, License, PartialConfig};
use crate::error::{Error, Result};
use crate::report::Note;
use crate::vcs::Vcs;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name looked up in the home directory when no `--file` is given
pub const CONFIG_FILE_NAME: &str = ".hsproj.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceKind {
    Defaults,
    Identity,
    File,
    Cli,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Defaults => "defaults",
            SourceKind::Identity => "git identity",
            SourceKind::File => "config file",
            SourceKind::Cli => "command line",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub kind: SourceKind,
    pub config: PartialConfig,
}

/// Which configuration file to read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileRequest {
    /// The conventional location, if the locator finds one
    #[default]
    Default,
    /// A path the user named; it must exist
    Explicit(PathBuf),
    /// Skip the file source entirely
    Ignore,
}

impl FileRequest {
    pub fn new(explicit: Option<PathBuf>, ignore: bool) -> Self {
        match (explicit, ignore) {
            (_, true) => FileRequest::Ignore,
            (Some(path), false) => FileRequest::Explicit(path),
            (None, false) => FileRequest::Default,
        }
    }
}

/// Sources in precedence order plus the notes produced while reading them
#[derive(Debug, Clone, Default)]
pub struct Gathered {
    pub sources: Vec<Source>,
    pub notes: Vec<Note>,
}

impl Gathered {
    pub fn partials(&self) -> Vec<PartialConfig> {
        self.sources.iter().map(|s| s.config.clone()).collect()
    }

    pub fn merged(&self) -> PartialConfig {
        PartialConfig::merge_all(self.sources.iter().map(|s| &s.config))
    }
}

/// Compiled-in hard defaults, the lowest-precedence source
pub fn defaults() -> PartialConfig {
    PartialConfig {
        license: Some(License::Mit),
        ..Default::default()
    }
}

/// Production locator for the default config file: `~/.hsproj.toml`
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Read the configuration file source.
///
/// `locate` resolves the conventional path and is only called for `FileRequest::Default`.
pub fn file_source(
    request: &FileRequest,
    locate: &dyn Fn() -> Option<PathBuf>,
    notes: &mut Vec<Note>,
) -> Result<PartialConfig> {
    let path = match request {
        FileRequest::Ignore => {
            notes.push(Note::info("Ignoring configuration file"));
            return Ok(PartialConfig::empty());
        }
        FileRequest::Explicit(path) => {
            if !path.is_file() {
                return Err(Error::ExplicitSourceMissing(path.clone()));
            }
            path.clone()
        }
        FileRequest::Default => match locate() {
            Some(path) if path.is_file() => path,
            Some(path) => {
                notes.push(Note::warning(format!(
                    "No config file found at {}, using defaults",
                    path.display()
                )));
                return Ok(PartialConfig::empty());
            }
            None => {
                notes.push(Note::warning(
                    "Could not determine the default config file location",
                ));
                return Ok(PartialConfig::empty());
            }
        },
    };

    Ok(load_or_warn(&path, notes))
}

fn load_or_warn(path: &Path, notes: &mut Vec<Note>) -> PartialConfig {
    match ConfigFile::load(path) {
        Ok(file) => {
            notes.push(Note::info(format!("Using config file {}", path.display())));
            file.into()
        }
        Err(e) => {
            notes.push(Note::warning(format!("{:#}; ignoring it", e)));
            PartialConfig::empty()
        }
    }
}

/// Local identity source; never fails
pub fn identity_source(vcs: &dyn Vcs, notes: &mut Vec<Note>) -> PartialConfig {
    let identity = vcs.identity();
    if identity.is_empty() {
        notes.push(Note::info("No git identity configured"));
    } else {
        let found: Vec<&str> = [
            identity.full_name.as_ref().map(|_| "name"),
            identity.email.as_ref().map(|_| "email"),
            identity.owner.as_ref().map(|_| "GitHub user"),
        ]
        .into_iter()
        .flatten()
        .collect();
        notes.push(Note::info(format!("Using git identity ({})", found.join(", "))));
    }
    identity
}

/// Gather every source in precedence order.
///
/// A missing explicit config file is detected before any other source is consulted.
pub fn gather(
    request: &FileRequest,
    locate: &dyn Fn() -> Option<PathBuf>,
    vcs: &dyn Vcs,
    cli: PartialConfig,
) -> Result<Gathered> {
    if let FileRequest::Explicit(path) = request {
        if !path.is_file() {
            return Err(Error::ExplicitSourceMissing(path.clone()));
        }
    }

    let mut notes = Vec::new();
    let identity = identity_source(vcs, &mut notes);
    let file = file_source(request, locate, &mut notes)?;

    let sources = vec![
        Source {
            kind: SourceKind::Defaults,
            config: defaults(),
        },
        Source {
            kind: SourceKind::Identity,
            config: identity,
        },
        Source {
            kind: SourceKind::File,
            config: file,
        },
        Source {
            kind: SourceKind::Cli,
            config: cli,
        },
    ];

    Ok(Gathered { sources, notes })
}
