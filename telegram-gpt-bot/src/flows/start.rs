//! Main menu: `/start` and the `start` exit button from every flow.

use bot_core::{Chat, Result};
use tracing::info;

use crate::state::ConversationContext;

use super::FlowEnv;

const START_IMAGE: &str = "1_start_screen_neon";

/// Command menu registered with the platform on every visit to the main
/// screen (command name → description).
pub const MENU_COMMANDS: &[(&str, &str)] = &[
    ("start", "Головне меню"),
    ("random", "Випадковий факт"),
    ("gpt", "Поставити запитання ChatGPT"),
    ("talk", "Розмова з відомою особистістю"),
    ("quiz", "Пройти квіз та перевірити знання"),
    ("translate", "Перекладач"),
    ("resume_help", "Допомога з резюме"),
];

/// Clears the conversation and shows the start screen with the command menu.
pub async fn show(env: &FlowEnv<'_>, chat: &Chat, ctx: &mut ConversationContext) -> Result<()> {
    ctx.reset();
    info!(chat_id = chat.id, flow = "start", "showing main menu");

    let text = env.resources.message("main")?;
    env.bot.send_image(chat, START_IMAGE).await?;
    env.bot.send_text(chat, &text).await?;

    let commands: Vec<(String, String)> = MENU_COMMANDS
        .iter()
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect();
    env.bot.set_commands(chat, &commands).await?;
    Ok(())
}
