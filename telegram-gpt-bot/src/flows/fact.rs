//! Random-fact flow: `/random` and the "more facts" button.
//!
//! Each request asks the model for one short fact and retries a few times
//! when the result was already delivered recently. Uniqueness is best
//! effort: after [`MAX_ATTEMPTS`] collisions the duplicate is accepted.

use bot_core::{Button, Chat, Result};
use llm_session::ChatSession;
use tracing::{debug, error, info};

use crate::state::{ChatState, ConversationContext, FactHistory};

use super::{discard_wait, send_wait, FlowEnv};

const FACT_IMAGE: &str = "2_random_fact_neon";
const FACT_REQUEST: &str = "Дай мені один цікавий факт, коротко.";
const MAX_ATTEMPTS: usize = 5;

/// Asks for facts until one is not in `history`, up to [`MAX_ATTEMPTS`]
/// calls. When every attempt collides, the last (colliding) fact is
/// returned anyway.
pub async fn generate_unique_fact(
    session: &mut ChatSession,
    history: &FactHistory,
    prompt: &str,
) -> anyhow::Result<String> {
    let mut last = String::new();
    for attempt in 0..MAX_ATTEMPTS {
        let fact = session.send_question(prompt, FACT_REQUEST).await?;
        if !history.contains(&fact) {
            return Ok(fact);
        }
        debug!(attempt = attempt + 1, "fact already delivered, retrying");
        last = fact;
    }
    Ok(last)
}

/// Delivers one fact with "more"/"finish" buttons and records it in the
/// chat's fact history.
pub async fn send_random_fact(
    env: &FlowEnv<'_>,
    chat: &Chat,
    ctx: &mut ConversationContext,
) -> Result<()> {
    info!(chat_id = chat.id, flow = "fact", "generating random fact");
    env.bot.send_image(chat, FACT_IMAGE).await?;
    let waiting = send_wait(env, chat, "🔍 Шукаю щось цікаве...").await;

    let prompt = env.resources.prompt("random")?;
    let generated = generate_unique_fact(&mut ctx.session, &ctx.fact_history, &prompt).await;
    discard_wait(env, chat, waiting).await;

    match generated {
        Ok(fact) => {
            ctx.fact_history.push(fact.clone());
            ctx.state = ChatState::Fact;
            let buttons = [
                Button::new("random", "Хочу ще факт 🔄"),
                Button::new("start", "Закінчити 🏁"),
            ];
            env.bot
                .send_text_buttons(
                    chat,
                    &format!("🚀 *Випадковий факт від AI:*\n\n{fact}"),
                    &buttons,
                )
                .await?;
        }
        Err(e) => {
            error!(chat_id = chat.id, flow = "fact", error = %e, "fact generation failed");
            env.bot
                .send_text(
                    chat,
                    "😔 На жаль, виникла помилка при отриманні факту. Спробуйте пізніше.",
                )
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use llm_session::{ChatCompleter, ChatMessage};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct ScriptedCompleter {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedCompleter {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl ChatCompleter for ScriptedCompleter {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| "out of script".to_string()))
        }
    }

    fn session(replies: &[&str]) -> ChatSession {
        ChatSession::new(Arc::new(ScriptedCompleter::new(replies)))
    }

    #[tokio::test]
    async fn first_unseen_fact_is_returned() {
        let mut s = session(&["A", "B"]);
        let mut history = FactHistory::default();
        history.push("A".into());

        let fact = generate_unique_fact(&mut s, &history, "p").await.unwrap();
        assert_eq!(fact, "B");
    }

    #[tokio::test]
    async fn five_collisions_accept_the_duplicate() {
        let mut s = session(&["A", "A", "A", "A", "A", "B"]);
        let mut history = FactHistory::default();
        history.push("A".into());

        // Gives up after the 5th colliding attempt; "B" is never requested.
        let fact = generate_unique_fact(&mut s, &history, "p").await.unwrap();
        assert_eq!(fact, "A");
    }

    #[tokio::test]
    async fn empty_history_accepts_first_fact() {
        let mut s = session(&["A"]);
        let history = FactHistory::default();
        let fact = generate_unique_fact(&mut s, &history, "p").await.unwrap();
        assert_eq!(fact, "A");
    }
}
