//! commitsmith - A CLI tool that writes commit messages for staged changes.
//!
//! # Overview
//!
//! commitsmith stages changes with the system `git`, picks a diff to describe,
//! asks a chat-completion model for a commit message, and then commits (and
//! optionally pushes) once the operator confirms.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{Outcome, PromptFlow, PushTarget};
pub use config::{Config, Settings, StageMode};
pub use error::{CommitError, ConfigError, GenerationError, GitError};
pub use git::{GitCli, Vcs};
pub use llm::{ChatCompletionClient, CompletionClient};
