//! Version-control collaborator.
//!
//! Source-control automation is strictly best-effort: every method returns
//! a result the orchestrator logs and records as a warning, never a fatal
//! error.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Capability interface for post-build source-control automation.
pub trait VersionControlClient {
    /// Stage the given paths and commit them with `message`.
    fn commit(&self, paths: &[PathBuf], message: &str) -> Result<()>;

    /// Create a lightweight tag named `name`.
    fn tag(&self, name: &str) -> Result<()>;

    /// Push the current branch, then any tags.
    fn push(&self) -> Result<()>;
}

/// `git` subprocess client rooted at a discovered repository.
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    /// Walk up from `start` looking for a `.git` directory.
    ///
    /// Returns `None` when no enclosing repository exists, in which case
    /// the orchestrator skips source-control automation entirely.
    pub fn discover(start: &Path) -> Option<GitCli> {
        let mut current = start.canonicalize().ok()?;
        loop {
            if current.join(".git").is_dir() {
                return Some(GitCli { repo_root: current });
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .with_context(|| format!("running git {}", args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}

impl VersionControlClient for GitCli {
    fn commit(&self, paths: &[PathBuf], message: &str) -> Result<()> {
        let mut add_args = vec!["add".to_string()];
        add_args.extend(paths.iter().map(|p| p.display().to_string()));
        let add_args: Vec<&str> = add_args.iter().map(String::as_str).collect();
        self.run(&add_args)?;
        self.run(&["commit", "-m", message])
    }

    fn tag(&self, name: &str) -> Result<()> {
        self.run(&["tag", name])
    }

    fn push(&self) -> Result<()> {
        self.run(&["push"])?;
        // pushing tags is a no-op when none exist
        self.run(&["push", "--tags"])
    }
}

/// Whether this process appears to run inside a CI environment.
///
/// An external signal the CLI layer uses to disable commit/tag/push
/// automation for the run.
pub fn running_in_ci() -> bool {
    std::env::var_os("CI").is_some() || std::env::var_os("GITHUB_ACTIONS").is_some()
}
