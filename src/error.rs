//! Error types for commitsmith modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from spawning the `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found on PATH. Install git and make sure it is executable.")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        operation: &'static str,
        code: Option<i32>,
        stderr: String,
    },
}

impl GitError {
    /// Exit code of the failed process, if it terminated normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GitError::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }
}

/// Errors from the chat-completion request.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("{0} environment variable is not set. Export it or add it to a .env file.")]
    MissingApiKey(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Completion request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion service returned an unreadable response: {0}")]
    InvalidResponse(String),
}

/// Errors from loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from a commit run. Every failure a run can hit is one of these.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No changes to commit")]
    NoChanges,

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Confirmation prompt failed: {0}")]
    Prompt(String),
}
