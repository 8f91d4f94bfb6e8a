//! Commit message generation through a chat-completion service.

pub mod client;
pub mod prompt;

pub use client::{
    API_KEY_ENV, ChatCompletionClient, CompletionClient, CompletionRequest, DEFAULT_BASE_URL,
    DEFAULT_MODEL, KNOWN_MODELS, is_known_model,
};
pub use prompt::{ChatMessage, PromptTemplate, Role, TRANSLATION_MARKER, build_messages};
