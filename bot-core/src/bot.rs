//! Platform capability trait. Production code sends through Telegram; tests
//! substitute a recording mock.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Chat;

/// Identifier of a sent message, as the platform reports it. Only used to
/// delete transient "please wait" messages, so it stays an opaque string.
pub type MessageId = String;

/// One inline button: callback payload plus the label the user sees.
/// Buttons render one per row, in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub payload: String,
    pub label: String,
}

impl Button {
    pub fn new(payload: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            label: label.into(),
        }
    }
}

/// Outbound platform operations the flows need. Formatted sends apply the
/// application's escaping policy; `send_plain` skips formatting entirely
/// (used for transient wait messages that must never fail to parse).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends formatted text and returns the platform message id.
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<MessageId>;

    /// Sends unformatted text (no parse mode).
    async fn send_plain(&self, chat: &Chat, text: &str) -> Result<MessageId>;

    /// Sends formatted text with an inline keyboard, one button per row.
    async fn send_text_buttons(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageId>;

    /// Sends an image by logical name. Implementations resolve the name to
    /// a file; a missing file degrades to a warning text, not an error.
    async fn send_image(&self, chat: &Chat, name: &str) -> Result<()>;

    /// Deletes a previously sent message. Callers deleting wait messages
    /// swallow the error; an already-gone message must never mask the
    /// primary response.
    async fn delete_message(&self, chat: &Chat, message_id: &MessageId) -> Result<()>;

    /// Registers the bot's command menu (command name → description).
    async fn set_commands(&self, chat: &Chat, commands: &[(String, String)]) -> Result<()>;
}
