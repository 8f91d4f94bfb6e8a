//! Diff selection, message cleanup, confirmation, and the run that ties them together.

pub mod driver;
pub mod pipeline;
pub mod sanitize;
pub mod select;

pub use driver::{Confirmer, Outcome, PromptFlow, PushTarget, TerminalConfirm, drive};
pub use pipeline::run;
pub use sanitize::{commit_command_line, escape_for_shell, sanitize, strip_markdown_artifacts};
pub use select::{DiffPolicy, DiffPolicyKind, SelectionResult, SmallestFileDiff, WholeDiff};
