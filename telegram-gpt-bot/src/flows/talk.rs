//! Persona-chat flow: `/talk`, persona selection buttons, and the dialogue
//! turns with the chosen persona.

use bot_core::{Button, Chat, Result};
use tracing::{error, info};

use crate::state::{ChatState, ConversationContext};

use super::{discard_wait, send_wait, FlowEnv};

const TALK_IMAGE: &str = "4_famous_people_neon";

/// Selectable personas: button payload (also the prompt and image name) →
/// menu label.
pub const PERSONAS: &[(&str, &str)] = &[
    ("talk_steve_jobs", "Стів Джобс (Apple) 💡"),
    ("talk_elon_musk", "Ілон Маск (SpaceX) 🚀"),
    ("talk_marie_curie", "Марія Кюрі (Науковиця) ⚗️"),
    ("talk_leonardo_da_vinci", "Леонардо да Вінчі (Митець) 🎨"),
    ("talk_nikola_tesla", "Нікола Тесла (Винахідник) ⚡"),
    ("talk_albert_einstein", "Альберт Ейнштейн (Фізик) 🧠"),
];

/// Human-readable persona name from the payload slug:
/// `talk_steve_jobs` → `Steve Jobs`.
pub fn persona_display_name(payload: &str) -> String {
    payload
        .strip_prefix("talk_")
        .unwrap_or(payload)
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shows the persona menu.
pub async fn enter(env: &FlowEnv<'_>, chat: &Chat, ctx: &mut ConversationContext) -> Result<()> {
    ctx.reset();
    info!(chat_id = chat.id, flow = "talk", "showing persona menu");

    env.bot.send_image(chat, TALK_IMAGE).await?;
    ctx.state = ChatState::TalkSelecting;

    let mut buttons: Vec<Button> = PERSONAS
        .iter()
        .map(|(payload, label)| Button::new(*payload, *label))
        .collect();
    buttons.push(Button::new("start", "Закінчити 🏁"));

    env.bot
        .send_text_buttons(chat, "👤 Оберіть легенду і почніть діалог 👇", &buttons)
        .await?;
    Ok(())
}

/// Persona chosen: install its prompt and invite the first message.
pub async fn on_select(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    payload: &str,
) -> Result<()> {
    info!(chat_id = chat.id, flow = "talk", persona = payload, "persona selected");
    ctx.reset();

    let prompt = env.resources.prompt(payload)?;
    ctx.session.set_prompt(&prompt);
    ctx.state = ChatState::TalkChatting {
        persona: payload.to_string(),
    };

    env.bot.send_image(chat, payload).await?;

    let name = persona_display_name(payload);
    env.bot
        .send_text_buttons(
            chat,
            &format!("👤 Ви обрали *{name}*.\nНапишіть повідомлення, щоб почати діалог."),
            &[Button::new("start", "Закінчити 🏁")],
        )
        .await?;
    Ok(())
}

/// One dialogue turn with the active persona.
pub async fn on_text(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    persona: &str,
    text: &str,
) -> Result<()> {
    let waiting = send_wait(env, chat, "🔍 Обробляю…").await;

    match ctx.session.add_message(text).await {
        Ok(response) => {
            discard_wait(env, chat, waiting).await;
            let name = persona_display_name(persona);
            env.bot
                .send_text_buttons(
                    chat,
                    &format!("👤 *{name}:*\n\n{response}"),
                    &[Button::new("start", "🏁 Закінчити")],
                )
                .await?;
        }
        Err(e) => {
            error!(chat_id = chat.id, flow = "talk", error = %e, "completion failed");
            discard_wait(env, chat, waiting).await;
            env.bot
                .send_text(chat, "😔 Сталася помилка. Спробуйте пізніше.")
                .await?;
        }
    }
    Ok(())
}

/// Free text arrived while the persona menu is still open.
pub async fn not_selected(env: &FlowEnv<'_>, chat: &Chat) -> Result<()> {
    env.bot
        .send_text(chat, "😕 Спочатку виберіть особистість командою /talk")
        .await?;
    Ok(())
}
