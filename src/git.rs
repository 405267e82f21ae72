//! # Git Operations
//!
//! The mirror repository is driven through the system `git` binary, one
//! `git -C <repo> ...` invocation per step. The [`GitOperations`] trait sits
//! between the replay engine and the binary so tests can substitute their own
//! implementation.

use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Fail unless `repo` is an initialized git working directory.
    fn ensure_repository(&self, repo: &Path) -> Result<()>;

    /// Stage every change in the working tree (`git add .`).
    fn add_all(&self, repo: &Path) -> Result<()>;

    /// Commit the staged changes with `message`.
    fn commit(&self, repo: &Path, message: &str) -> Result<()>;

    /// Create a lightweight tag at `HEAD`.
    fn tag(&self, repo: &Path, name: &str) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitOperations for SystemGit {
    fn ensure_repository(&self, repo: &Path) -> Result<()> {
        if !repo.is_dir() {
            return Err(Error::Precondition {
                path: repo.display().to_string(),
                message: "directory does not exist".to_string(),
            });
        }

        // `.git` is a file in worktrees and submodules
        if !repo.join(".git").exists() {
            return Err(Error::Precondition {
                path: repo.display().to_string(),
                message: "not a git repository (run `git init` first)".to_string(),
            });
        }

        Ok(())
    }

    fn add_all(&self, repo: &Path) -> Result<()> {
        run_git(repo, &["add", "."]).map(|_| ())
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<()> {
        run_git(repo, &["commit", "-m", message]).map(|_| ())
    }

    fn tag(&self, repo: &Path, name: &str) -> Result<()> {
        run_git(repo, &["tag", name]).map(|_| ())
    }
}

/// Run `git -C <repo> <args>` and return its stdout.
pub fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    let command = format!("git {}", args.join(" "));
    debug!("Running {} in {}", command, repo.display());

    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| Error::VcsCommand {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // `git commit` reports "nothing to commit" on stdout
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(Error::VcsCommand {
            command,
            stderr: detail,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
