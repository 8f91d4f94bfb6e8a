//! Operator confirmation and the final commit, push or rollback.

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use crate::error::CommitError;
use crate::git::Vcs;

pub const STOP_PROMPT: &str = "Stop here without committing?";
pub const COMMIT_ONLY_PROMPT: &str = "Commit only (no push)?";
pub const PUSH_PROMPT: &str = "Do you want to push?";

/// Trait for yes/no questions to the operator.
///
/// This abstraction allows scripting answers in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, CommitError>;
}

/// [`Confirmer`] that asks on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirmer for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool, CommitError> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| CommitError::Prompt(e.to_string()))
    }
}

/// Which questions are asked before committing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptFlow {
    /// Only "push?".
    #[default]
    PushOnly,
    /// "stop?", then "commit only?", then "push?".
    Full,
}

/// Remote and branch to push to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    pub remote: String,
    pub branch: String,
}

impl Default for PushTarget {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Operator stopped before committing; staging was reset.
    Stopped,
    /// Committed without pushing.
    CommittedOnly,
    /// Committed and pushed.
    Pushed,
    /// Operator declined the push; staging was reset.
    Declined,
    /// Only the commit command was printed; staging was reset.
    DryRun,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Stopped => "Stopped. Staging area reset.",
            Outcome::CommittedOnly => "Committed.",
            Outcome::Pushed => "Committed and pushed.",
            Outcome::Declined => "Not pushed. Staging area reset.",
            Outcome::DryRun => "Dry run. Staging area reset.",
        };
        f.write_str(text)
    }
}

/// Ask the flow's questions in order and act on the first "yes".
///
/// Every path ends in either a commit or a reset of the staging area.
pub fn drive(
    flow: PromptFlow,
    confirmer: &dyn Confirmer,
    vcs: &dyn Vcs,
    message: &str,
    target: &PushTarget,
) -> Result<Outcome, CommitError> {
    if flow == PromptFlow::Full {
        if confirmer.confirm(STOP_PROMPT)? {
            vcs.reset_staging()?;
            return Ok(Outcome::Stopped);
        }

        if confirmer.confirm(COMMIT_ONLY_PROMPT)? {
            vcs.stage_all()?;
            vcs.commit(message)?;
            return Ok(Outcome::CommittedOnly);
        }
    }

    if confirmer.confirm(PUSH_PROMPT)? {
        vcs.stage_all()?;
        vcs.commit(message)?;
        debug!("Pushing to {}/{}", target.remote, target.branch);
        vcs.push(&target.remote, &target.branch)?;
        Ok(Outcome::Pushed)
    } else {
        vcs.reset_staging()?;
        Ok(Outcome::Declined)
    }
}
