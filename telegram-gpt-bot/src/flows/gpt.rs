//! Open Q&A flow: `/gpt`. Multi-turn; the whole dialogue shares one
//! session history so the model keeps context across questions.

use bot_core::{Chat, Result};
use tracing::{error, info};

use crate::state::{ChatState, ConversationContext};

use super::{discard_wait, send_wait, FlowEnv};

const GPT_IMAGE: &str = "3_gpt_neon";

/// Activates Q&A mode: installs the gpt prompt and waits for questions.
pub async fn enter(env: &FlowEnv<'_>, chat: &Chat, ctx: &mut ConversationContext) -> Result<()> {
    ctx.reset();
    info!(chat_id = chat.id, flow = "gpt", "entering Q&A mode");

    env.bot.send_image(chat, GPT_IMAGE).await?;
    let prompt = env.resources.prompt("gpt")?;
    ctx.session.set_prompt(&prompt);
    ctx.state = ChatState::Gpt;

    env.bot
        .send_text(
            chat,
            "🤖 *ChatGPT активовано.*\nНадішліть своє запитання — і я одразу відповім.",
        )
        .await?;
    Ok(())
}

/// One question/answer turn of the ongoing dialogue.
pub async fn on_text(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
    text: &str,
) -> Result<()> {
    let waiting = send_wait(env, chat, "🔍 Обробляю ваше питання…").await;

    match ctx.session.add_message(text).await {
        Ok(response) => {
            discard_wait(env, chat, waiting).await;
            env.bot
                .send_text(chat, &format!("🤖 *Відповідь ChatGPT:*\n\n{response}"))
                .await?;
        }
        Err(e) => {
            error!(chat_id = chat.id, flow = "gpt", error = %e, "completion failed");
            discard_wait(env, chat, waiting).await;
            env.bot
                .send_text(chat, "😔 Сталася помилка. Спробуйте пізніше.")
                .await?;
        }
    }
    Ok(())
}
