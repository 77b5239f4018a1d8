//! Project materialization: write the generated tree, then hand it to version control
//!
//! This module provides:
//! - File rendering from a finalized `Config` (see `render`)
//! - Writing the tree after checking the target does not already exist
//! - The commit / repository-creation / push sequence

pub mod render;

use crate::config::Config;
use crate::error::Error;
use crate::vcs::{RepoSpec, Vcs};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

pub use render::{module_name, render, GeneratedFile};

/// Commit message of the initial commit
pub const INITIAL_COMMIT: &str = "Create the project";

/// What happened on the version-control side after the files were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Published {
    /// GitHub integration is off; nothing was committed
    Skipped,
    /// Committed locally; upload disabled
    Committed,
    /// Repository created and pushed
    Pushed { slug: String },
}

/// Reject names that cannot be a directory, a cabal package and a module name at once.
///
/// Dash-separated components must be non-empty and alphanumeric with at least
/// one letter each, and the name starts with a letter.
pub fn validate_name(name: &str) -> Result<()> {
    let starts_with_letter = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_with_letter
        && name.split('-').all(|part| {
            !part.is_empty()
                && part.chars().all(|c| c.is_ascii_alphanumeric())
                && part.chars().any(|c| c.is_ascii_alphabetic())
        });
    if !valid {
        anyhow::bail!(
            "Invalid project name '{}': start with a letter, separate words with single dashes, \
             and give every word a letter",
            name
        );
    }
    Ok(())
}

/// Write the project into `<parent>/<name>` and return the relative paths written.
///
/// Fails with [`Error::ProjectExists`] before touching the filesystem if the
/// directory is already there. The check is not safe against concurrent creation.
pub async fn materialize(parent: &Path, name: &str, config: &Config) -> Result<(PathBuf, Vec<String>)> {
    validate_name(name)?;

    let target_dir = parent.join(name);
    if fs::try_exists(&target_dir).await.unwrap_or(true) {
        return Err(Error::ProjectExists(target_dir).into());
    }

    let files = render(name, config)?;

    fs::create_dir_all(&target_dir)
        .await
        .context("Failed to create project directory")?;

    let mut written = Vec::new();
    for file in files {
        let target_path = target_dir.join(&file.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, file.content.as_bytes())
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        written.push(file.path);
    }

    Ok((target_dir, written))
}

/// Commit the project and, when uploading, create and push the remote repository.
pub fn publish(vcs: &dyn Vcs, dir: &Path, name: &str, config: &Config) -> Result<Published> {
    if !config.github {
        return Ok(Published::Skipped);
    }

    if !config.upload() {
        vcs.commit_and_push(dir, INITIAL_COMMIT, false)?;
        return Ok(Published::Committed);
    }

    let repo = RepoSpec {
        owner: config.owner.clone(),
        name: name.to_string(),
        description: format!("{} by {}", name, config.full_name),
        private: config.private,
    };
    vcs.create_repository(dir, &repo)
        .with_context(|| format!("Failed to create repository {}", repo.slug()))?;
    vcs.commit_and_push(dir, INITIAL_COMMIT, true)?;

    Ok(Published::Pushed { slug: repo.slug() })
}
