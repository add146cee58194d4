//! # LLM session
//!
//! Completion client with per-conversation history. [`ChatCompleter`] is the
//! transport seam (one opaque failure mode); [`ChatSession`] owns an ordered
//! message history and the two call shapes the flows use:
//!
//! - [`ChatSession::send_question`] — fresh generation: discard history,
//!   install the system prompt, ask once.
//! - [`ChatSession::add_message`] — next turn of an ongoing dialogue.
//!
//! Each conversation owns its own session, so two chats can never observe
//! each other's history or system prompt.

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod openai;

pub use config::LlmSettings;
pub use openai::OpenAiCompleter;

/// Role of a message, one-to-one with Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message, one element of the request `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Completion transport: one request, one reply text. Any transport or API
/// error surfaces as a single opaque failure; callers show a "try again
/// later" message and leave their state as-is.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// One conversation's completion state: the current system prompt plus the
/// ordered user/assistant turns since it was installed.
pub struct ChatSession {
    completer: std::sync::Arc<dyn ChatCompleter>,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(completer: std::sync::Arc<dyn ChatCompleter>) -> Self {
        Self {
            completer,
            history: Vec::new(),
        }
    }

    /// Installs `prompt` as the sole system turn, dropping all history.
    pub fn set_prompt(&mut self, prompt: &str) {
        self.history.clear();
        self.history.push(ChatMessage::system(prompt));
    }

    /// Fresh one-shot exchange: discards any prior history, installs
    /// `prompt`, asks `text`, records and returns the answer.
    pub async fn send_question(&mut self, prompt: &str, text: &str) -> Result<String> {
        self.history.clear();
        self.history.push(ChatMessage::system(prompt));
        self.history.push(ChatMessage::user(text));
        self.complete_and_record().await
    }

    /// Appends `text` as the next user turn of the ongoing dialogue and
    /// returns the answer. Whatever prompt and turns are loaded stay loaded.
    pub async fn add_message(&mut self, text: &str) -> Result<String> {
        self.history.push(ChatMessage::user(text));
        self.complete_and_record().await
    }

    /// Drops the history and the system prompt entirely.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Current history, system turn first. Exposed for tests and diagnostics.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    async fn complete_and_record(&mut self) -> Result<String> {
        let answer = self.completer.complete(&self.history).await?;
        self.history.push(ChatMessage::assistant(answer.clone()));
        Ok(answer)
    }
}
