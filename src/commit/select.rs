//! Choosing which staged diff is sent to the model.
//!
//! Two policies exist: the whole staged diff, or the diff of the single staged
//! file with the shortest diff text. The latter keeps the request small when a
//! lot of changes are staged at once.

use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use crate::error::CommitError;
use crate::git::{DiffScope, StagedFilter, Vcs};

/// The diff chosen for message generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub diff: String,
    /// Source path for file-scoped selections; `None` for the whole staged diff.
    pub path: Option<String>,
}

/// A strategy for picking the diff to submit.
pub trait DiffPolicy {
    fn name(&self) -> &'static str;

    /// Which staged file list the policy reads, or `None` if it needs none.
    fn staged_filter(&self) -> Option<StagedFilter>;

    /// Pick a diff from the staged files.
    ///
    /// Fails with [`CommitError::NoChanges`] if the picked diff is blank.
    fn select(&self, vcs: &dyn Vcs, staged: &[String]) -> Result<SelectionResult, CommitError>;
}

/// Submit the full staged diff unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeDiff;

impl DiffPolicy for WholeDiff {
    fn name(&self) -> &'static str {
        "whole"
    }

    fn staged_filter(&self) -> Option<StagedFilter> {
        None
    }

    fn select(&self, vcs: &dyn Vcs, _staged: &[String]) -> Result<SelectionResult, CommitError> {
        let diff = vcs.read_diff(&DiffScope::AllStaged)?;
        ensure_not_blank(&diff)?;

        Ok(SelectionResult { diff, path: None })
    }
}

/// Submit the diff of the staged file whose diff text is shortest.
///
/// Ties go to the earliest file in staging order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmallestFileDiff;

impl DiffPolicy for SmallestFileDiff {
    fn name(&self) -> &'static str {
        "smallest-file"
    }

    // deleted files have no content worth describing on their own
    fn staged_filter(&self) -> Option<StagedFilter> {
        Some(StagedFilter::ExcludeDeleted)
    }

    fn select(&self, vcs: &dyn Vcs, staged: &[String]) -> Result<SelectionResult, CommitError> {
        if staged.is_empty() {
            return Err(CommitError::NoChanges);
        }

        let mut best: Option<(usize, &String, String)> = None;
        for path in staged {
            let diff = vcs.read_diff(&DiffScope::Path(path.clone()))?;
            let len = diff.chars().count();
            debug!("{path}: {len} chars of diff");

            // strict less-than keeps the first of equal lengths
            if best.as_ref().is_none_or(|(best_len, _, _)| len < *best_len) {
                best = Some((len, path, diff));
            }
        }

        let (_, path, diff) = best.ok_or(CommitError::NoChanges)?;
        ensure_not_blank(&diff)?;

        Ok(SelectionResult {
            diff,
            path: Some(path.clone()),
        })
    }
}

/// Policy names accepted in flags and the settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffPolicyKind {
    #[default]
    Whole,
    SmallestFile,
}

impl DiffPolicyKind {
    pub fn policy(self) -> Box<dyn DiffPolicy> {
        match self {
            DiffPolicyKind::Whole => Box::new(WholeDiff),
            DiffPolicyKind::SmallestFile => Box::new(SmallestFileDiff),
        }
    }
}

fn ensure_not_blank(diff: &str) -> Result<(), CommitError> {
    if diff.trim().is_empty() {
        return Err(CommitError::NoChanges);
    }
    Ok(())
}
