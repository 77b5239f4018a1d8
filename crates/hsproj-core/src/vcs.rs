//! Version control and hosting, driven through pre-authenticated command-line tools
//!
//! Resolution only depends on the [`Vcs`] trait. [`GitCli`] shells out to
//! `git` and `hub`; tests use a recording fake.

use crate::config::PartialConfig;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// What to create on the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub private: bool,
}

impl RepoSpec {
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

pub trait Vcs {
    /// Locally configured identity; empty when nothing is configured
    fn identity(&self) -> PartialConfig;

    /// Create the remote repository and register it for `dir`
    fn create_repository(&self, dir: &Path, repo: &RepoSpec) -> Result<()>;

    /// Commit everything in `dir`, pushing to the registered remote when `push` is set
    fn commit_and_push(&self, dir: &Path, message: &str, push: bool) -> Result<()>;
}

/// Production adapter over the `git` and `hub` executables
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    /// `git config --get <key>`, `None` when unset or git is unavailable
    fn config_value(key: &str) -> Option<String> {
        Command::new("git")
            .args(["config", "--get", key])
            .output()
            .ok()
            .filter(|output| output.status.success())
            .and_then(|output| String::from_utf8(output.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn run(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("Failed to run {}", program))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} {} failed with exit code {}:\n{}",
                program,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

impl Vcs for GitCli {
    fn identity(&self) -> PartialConfig {
        PartialConfig {
            owner: Self::config_value("github.user"),
            full_name: Self::config_value("user.name"),
            email: Self::config_value("user.email"),
            ..Default::default()
        }
    }

    fn create_repository(&self, dir: &Path, repo: &RepoSpec) -> Result<()> {
        Self::run(dir, "git", &["init"])?;

        let slug = repo.slug();
        let mut args = vec!["create", "-d", repo.description.as_str()];
        if repo.private {
            args.push("-p");
        }
        args.push(&slug);
        Self::run(dir, "hub", &args)
    }

    fn commit_and_push(&self, dir: &Path, message: &str, push: bool) -> Result<()> {
        Self::run(dir, "git", &["init"])?;
        Self::run(dir, "git", &["add", "."])?;
        Self::run(dir, "git", &["commit", "-m", message])?;
        if push {
            Self::run(dir, "git", &["push", "-u", "origin", "HEAD"])?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_slug() {
        let repo = RepoSpec {
            owner: "alice".into(),
            name: "wonderland".into(),
            description: String::new(),
            private: false,
        };
        assert_eq!(repo.slug(), "alice/wonderland");
    }

    #[test]
    fn test_run_reports_failing_command() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitCli::run(dir.path(), "git", &["no-such-subcommand"]).unwrap_err();
        assert!(err.to_string().contains("no-such-subcommand") || err.to_string().contains("git"));
    }
}
