//! Staging, diff, commit, push and reset operations.
//!
//! All operations use `std::process::Command` to shell out to the system `git`
//! binary, inheriting the user's existing git config, SSH agent, and credential store.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::GitError;

use super::status::first_changed_path;

/// Ordered paths currently in the staging area.
pub type StagedFileSet = Vec<String>;

/// Which staged entries to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedFilter {
    All,
    ExcludeDeleted,
}

/// What a diff read covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffScope {
    AllStaged,
    Path(String),
}

/// Version-control operations used by a commit run.
///
/// This abstraction allows substituting the git binary in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Stage every change in the tree (`git add -A`).
    fn stage_all(&self) -> Result<(), GitError>;

    /// Stage only the first changed path reported by `git status`.
    ///
    /// Returns the staged path, or `None` when the tree is clean.
    fn stage_first_changed(&self) -> Result<Option<String>, GitError>;

    fn list_staged_files(&self, filter: StagedFilter) -> Result<StagedFileSet, GitError>;

    fn read_diff(&self, scope: &DiffScope) -> Result<String, GitError>;

    /// Create a commit, passing the message on stdin.
    fn commit(&self, message: &str) -> Result<(), GitError>;

    fn push(&self, remote: &str, branch: &str) -> Result<(), GitError>;

    /// Unstage everything (`git reset`).
    fn reset_staging(&self) -> Result<(), GitError>;
}

/// Check that a `git` executable is on `PATH`.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::NotInstalled)
}

/// [`Vcs`] backed by the `git` command line, run inside one working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run a git command and return its stdout.
    fn run(&self, args: &[&str], operation: &'static str) -> Result<String, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::SpawnFailed { operation, source })?;

        check_output(output, operation)
    }

    /// Run a git command with `input` written to its stdin.
    fn run_with_stdin(
        &self,
        args: &[&str],
        input: &str,
        operation: &'static str,
    ) -> Result<String, GitError> {
        debug!("git {} (stdin: {} bytes)", args.join(" "), input.len());

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::SpawnFailed { operation, source })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .map_err(|source| GitError::SpawnFailed { operation, source })?;
            // stdin is closed on drop so git sees EOF
        }

        let output = child
            .wait_with_output()
            .map_err(|source| GitError::SpawnFailed { operation, source })?;

        check_output(output, operation)
    }
}

fn check_output(output: Output, operation: &'static str) -> Result<String, GitError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::NonZeroExit {
            operation,
            code: output.status.code(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

impl Vcs for GitCli {
    fn stage_all(&self) -> Result<(), GitError> {
        self.run(&["add", "-A"], "add").map(|_| ())
    }

    fn stage_first_changed(&self) -> Result<Option<String>, GitError> {
        let status = self.run(&["status", "--porcelain", "-z"], "status")?;

        let Some(path) = first_changed_path(&status) else {
            return Ok(None);
        };

        self.run(&["add", "--", &path], "add")?;
        Ok(Some(path))
    }

    fn list_staged_files(&self, filter: StagedFilter) -> Result<StagedFileSet, GitError> {
        let mut args = vec!["diff", "--cached", "--name-only"];
        if filter == StagedFilter::ExcludeDeleted {
            args.push("--diff-filter=d");
        }

        let stdout = self.run(&args, "diff --cached")?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn read_diff(&self, scope: &DiffScope) -> Result<String, GitError> {
        match scope {
            DiffScope::AllStaged => self.run(&["diff", "--staged"], "diff --staged"),
            DiffScope::Path(path) => self.run(&["diff", "--staged", "--", path], "diff --staged"),
        }
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_with_stdin(&["commit", "-F", "-"], message, "commit")
            .map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run(&["push", "-u", remote, branch], "push").map(|_| ())
    }

    fn reset_staging(&self) -> Result<(), GitError> {
        self.run(&["reset"], "reset").map(|_| ())
    }
}
