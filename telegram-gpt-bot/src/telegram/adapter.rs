//! Wraps `teloxide::Bot` and implements the core [`Bot`] trait. Production
//! code sends through Telegram; tests substitute a recording mock.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{Bot as CoreBot, BotError, Button, Chat, MessageId, ResourceStore, Result};
use teloxide::prelude::*;
use teloxide::types::{
    BotCommand, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MenuButton,
    MessageId as TgMessageId, ParseMode,
};

use crate::markdown;

/// Thin wrapper around `teloxide::Bot`. Formatted sends go out as
/// MarkdownV2 with the style-preserving escaping policy; images resolve
/// through the resource store and degrade to a warning text when missing.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
    resources: Arc<dyn ResourceStore>,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot, resources: Arc<dyn ResourceStore>) -> Self {
        Self { bot, resources }
    }

    /// Returns the underlying `teloxide::Bot` for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    fn keyboard(buttons: &[Button]) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(
            buttons
                .iter()
                .map(|b| vec![InlineKeyboardButton::callback(b.label.clone(), b.payload.clone())]),
        )
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<MessageId> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), markdown::escape_preserving_styles(text))
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| BotError::Platform(e.to_string()))?;
        Ok(sent.id.0.to_string())
    }

    async fn send_plain(&self, chat: &Chat, text: &str) -> Result<MessageId> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| BotError::Platform(e.to_string()))?;
        Ok(sent.id.0.to_string())
    }

    async fn send_text_buttons(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageId> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), markdown::escape_preserving_styles(text))
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(Self::keyboard(buttons))
            .await
            .map_err(|e| BotError::Platform(e.to_string()))?;
        Ok(sent.id.0.to_string())
    }

    async fn send_image(&self, chat: &Chat, name: &str) -> Result<()> {
        match self.resources.image(name) {
            Some(path) => {
                self.bot
                    .send_photo(ChatId(chat.id), InputFile::file(path))
                    .await
                    .map_err(|e| BotError::Platform(e.to_string()))?;
            }
            None => {
                self.send_plain(chat, &format!("⚠️ Зображення '{name}' не знайдено"))
                    .await?;
            }
        }
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &MessageId) -> Result<()> {
        let id: i32 = message_id.parse().map_err(|_| {
            BotError::Platform(format!("Invalid message_id for delete: {message_id}"))
        })?;
        self.bot
            .delete_message(ChatId(chat.id), TgMessageId(id))
            .await
            .map_err(|e| BotError::Platform(e.to_string()))?;
        Ok(())
    }

    async fn set_commands(&self, chat: &Chat, commands: &[(String, String)]) -> Result<()> {
        let list: Vec<BotCommand> = commands
            .iter()
            .map(|(name, description)| BotCommand::new(name.clone(), description.clone()))
            .collect();
        self.bot
            .set_my_commands(list)
            .await
            .map_err(|e| BotError::Platform(e.to_string()))?;
        self.bot
            .set_chat_menu_button()
            .chat_id(ChatId(chat.id))
            .menu_button(MenuButton::Commands)
            .await
            .map_err(|e| BotError::Platform(e.to_string()))?;
        Ok(())
    }
}
