//! One commit run: stage, select a diff, generate, confirm, commit.

use tracing::debug;

use crate::config::{Config, StageMode};
use crate::error::{CommitError, GenerationError};
use crate::git::Vcs;
use crate::llm::{CompletionClient, CompletionRequest, build_messages};

use super::driver::{Confirmer, Outcome, drive};
use super::sanitize::{commit_command_line, strip_markdown_artifacts};

/// Run the full flow once.
///
/// No request is sent unless a non-blank diff was selected. On error the
/// staging area may be left modified; callers reset it.
pub async fn run(
    config: &Config,
    vcs: &dyn Vcs,
    client: &dyn CompletionClient,
    confirmer: &dyn Confirmer,
) -> Result<Outcome, CommitError> {
    match config.stage {
        StageMode::All => vcs.stage_all()?,
        StageMode::FirstChanged => {
            let path = vcs.stage_first_changed()?.ok_or(CommitError::NoChanges)?;
            debug!("Staged first changed path: {path}");
        }
    }

    let policy = config.policy.policy();
    let staged = match policy.staged_filter() {
        Some(filter) => vcs.list_staged_files(filter)?,
        None => Vec::new(),
    };
    debug!("{} staged file(s) listed for {}", staged.len(), policy.name());

    let selection = policy.select(vcs, &staged)?;
    debug!(
        "Policy {} selected {} chars{}",
        policy.name(),
        selection.diff.chars().count(),
        selection
            .path
            .as_ref()
            .map(|p| format!(" from {p}"))
            .unwrap_or_default()
    );

    let request = CompletionRequest {
        model: config.model.clone(),
        messages: build_messages(config.template, config.with_example, &selection.diff),
    };
    let raw = client.complete(&request).await?;

    let message = strip_markdown_artifacts(&raw).trim().to_string();
    if message.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "completion service returned no message text".to_string(),
        )
        .into());
    }

    println!("{message}");
    println!();

    if config.dry_run {
        println!("{}", commit_command_line(&message));
        vcs.reset_staging()?;
        return Ok(Outcome::DryRun);
    }

    drive(config.flow, confirmer, vcs, &message, &config.push)
}
