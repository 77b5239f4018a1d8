//! hsproj core - layered configuration resolution for project scaffolding
//!
//! This library resolves a project configuration from several overlapping
//! sources and materializes it as a ready-to-build Haskell project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Resolution** - `Decision`, `PartialConfig` merging, source
//!   adapters and finalization into a `Config`. Pure apart from source I/O.
//! - **Layer 2: Workflow** - the `Prompter` and `Vcs` capabilities, the
//!   re-entrant `pipeline`, and the `project` materializer
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use hsproj_core::{pipeline, prompt::NonInteractive, sources, PartialConfig};
//!
//! let gathered = sources::gather(
//!     &sources::FileRequest::Default,
//!     &sources::home_config_path,
//!     &hsproj_core::vcs::GitCli,
//!     PartialConfig::empty(),
//! )?;
//! let config = pipeline::resolve(&gathered.partials(), &mut NonInteractive)?;
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod project;
pub mod prompt;
pub mod report;
pub mod sources;
pub mod vcs;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Config, PartialConfig};
pub use decision::Decision;
pub use error::{Error, Result};

#[cfg(feature = "tui")]
pub use tui::run;
