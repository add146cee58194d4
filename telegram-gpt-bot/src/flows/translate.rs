//! Translation flow: `/translate`, language selection, one-shot
//! translations of every following text message.

use bot_core::{Button, Chat, Result};
use tracing::{error, info};

use crate::state::{ChatState, ConversationContext};

use super::{discard_wait, send_wait, FlowEnv};

const TRANSLATE_IMAGE: &str = "6_translate_neon";

/// Target languages: button payload (also the prompt name) → menu label.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("translate_en", "🇬🇧 Англійська"),
    ("translate_ua", "🇺🇦 Українська"),
    ("translate_de", "🇩🇪 Німецька"),
    ("translate_pl", "🇵🇱 Польська"),
    ("translate_es", "🇪🇸 Іспанська"),
];

/// Human-readable language name for a payload.
pub fn lang_display_name(payload: &str) -> &'static str {
    match payload {
        "translate_en" => "Англійська",
        "translate_ua" => "Українська",
        "translate_de" => "Німецька",
        "translate_pl" => "Польська",
        "translate_es" => "Іспанська",
        _ => "невідома",
    }
}

/// Shows the language menu.
pub async fn enter(env: &FlowEnv<'_>, chat: &Chat, ctx: &mut ConversationContext) -> Result<()> {
    ctx.reset();
    info!(chat_id = chat.id, flow = "translate", "showing language menu");

    env.bot.send_image(chat, TRANSLATE_IMAGE).await?;
    ctx.state = ChatState::TranslateSelecting;

    let mut buttons: Vec<Button> = LANGUAGES
        .iter()
        .map(|(payload, label)| Button::new(*payload, *label))
        .collect();
    buttons.push(Button::new("start", "🏁 Завершити"));

    env.bot
        .send_text_buttons(chat, "🌐 Оберіть мову перекладу:", &buttons)
        .await?;
    Ok(())
}

/// Language chosen: install its prompt and invite the first text.
pub async fn on_select(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    payload: &str,
) -> Result<()> {
    info!(chat_id = chat.id, flow = "translate", lang = payload, "language selected");
    ctx.reset();

    let prompt = env.resources.prompt(payload)?;
    ctx.session.set_prompt(&prompt);
    ctx.state = ChatState::Translating {
        lang: payload.to_string(),
    };

    let name = lang_display_name(payload);
    env.bot
        .send_text(
            chat,
            &format!("✅ Мову обрано: *{name}*.\nТепер надішліть текст, який потрібно перекласти."),
        )
        .await?;
    Ok(())
}

/// Translates one message with the active language prompt.
pub async fn on_text(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    lang: &str,
    text: &str,
) -> Result<()> {
    let prompt = env.resources.prompt(lang)?;
    let waiting = send_wait(env, chat, "🔍 Перекладаю...").await;

    match ctx.session.send_question(&prompt, text).await {
        Ok(translation) => {
            discard_wait(env, chat, waiting).await;
            let buttons = [
                Button::new("translate_change", "🌐 Змінити мову"),
                Button::new("start", "🏁 Завершити"),
            ];
            env.bot
                .send_text_buttons(chat, &format!("📘 *Переклад:*\n\n{translation}"), &buttons)
                .await?;
        }
        Err(e) => {
            error!(chat_id = chat.id, flow = "translate", error = %e, "translation failed");
            discard_wait(env, chat, waiting).await;
            env.bot
                .send_text(chat, "⚠️ Помилка перекладу. Спробуйте пізніше.")
                .await?;
        }
    }
    Ok(())
}

/// Free text arrived while the language menu is still open.
pub async fn not_selected(env: &FlowEnv<'_>, chat: &Chat) -> Result<()> {
    env.bot
        .send_text(chat, "🌐 Спочатку оберіть мову: /translate")
        .await?;
    Ok(())
}
