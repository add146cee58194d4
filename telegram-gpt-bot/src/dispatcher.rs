//! Update routing.
//!
//! Every inbound update maps to exactly one handler:
//!
//! - a command resets the conversation and runs its flow entry (every
//!   command is an implicit "cancel current flow, start new one");
//! - a button payload is matched against an ordered predicate list; `start`
//!   is checked first so it reaches the main menu exactly once from any
//!   flow; an unmatched payload gets a default acknowledgment;
//! - free text routes by the typed conversation state; with no active flow
//!   it goes through intent inference and then the funny fallback.
//!
//! The dispatcher never talks to the completion client itself; it only
//! routes and resets/seeds the context. It holds the per-chat context lock
//! for the whole update, so one chat's handlers are serialized while
//! different chats interleave freely.

use std::sync::Arc;

use bot_core::{Bot, Chat, Command, ResourceStore, Result, Update, UpdateKind};
use tracing::{info, warn};

use crate::flows::{self, FlowEnv};
use crate::intent::{self, Intent};
use crate::state::{ChatState, ConversationContext, StateStore};

/// Routes updates to flow handlers. One instance serves all chats.
pub struct Dispatcher {
    bot: Arc<dyn Bot>,
    resources: Arc<dyn ResourceStore>,
    store: StateStore,
}

impl Dispatcher {
    pub fn new(bot: Arc<dyn Bot>, resources: Arc<dyn ResourceStore>, store: StateStore) -> Self {
        Self {
            bot,
            resources,
            store,
        }
    }

    /// Access to the state store, mainly for tests and diagnostics.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Handles one inbound update end to end.
    pub async fn dispatch(&self, update: Update) -> Result<()> {
        let chat = update.chat;
        let ctx_handle = self.store.context(&chat).await;
        let mut ctx = ctx_handle.lock().await;
        let env = FlowEnv {
            bot: self.bot.as_ref(),
            resources: self.resources.as_ref(),
        };

        match update.kind {
            UpdateKind::Command(command) => {
                info!(chat_id = chat.id, command = command.name(), "dispatching command");
                ctx.reset();
                self.run_command(&env, &chat, &mut ctx, command).await
            }
            UpdateKind::Button(payload) => {
                info!(chat_id = chat.id, payload = %payload, "dispatching button");
                self.run_button(&env, &chat, &mut ctx, &payload).await
            }
            UpdateKind::Text(text) => {
                info!(chat_id = chat.id, state = ?ctx.state, "dispatching free text");
                self.run_text(&env, &chat, &mut ctx, &text).await
            }
        }
    }

    async fn run_command(
        &self,
        env: &FlowEnv<'_>,
        chat: &Chat,
        ctx: &mut ConversationContext,
        command: Command,
    ) -> Result<()> {
        match command {
            Command::Start => flows::start::show(env, chat, ctx).await,
            Command::Random => flows::fact::send_random_fact(env, chat, ctx).await,
            Command::Gpt => flows::gpt::enter(env, chat, ctx).await,
            Command::Talk => flows::talk::enter(env, chat, ctx).await,
            Command::Quiz => flows::quiz::enter(env, chat, ctx).await,
            Command::Translate => flows::translate::enter(env, chat, ctx).await,
            Command::ResumeHelp => flows::resume::enter(env, chat, ctx).await,
        }
    }

    /// Ordered button predicates. `start` first: it is registered as an
    /// exit payload by every flow and must reach the main menu exactly
    /// once, no matter which flow is active.
    async fn run_button(
        &self,
        env: &FlowEnv<'_>,
        chat: &Chat,
        ctx: &mut ConversationContext,
        payload: &str,
    ) -> Result<()> {
        match payload {
            "start" => flows::start::show(env, chat, ctx).await,
            "random" => flows::fact::send_random_fact(env, chat, ctx).await,
            p if p.starts_with("talk_") => flows::talk::on_select(env, chat, ctx, p).await,
            p if p.starts_with("quiz_") => flows::quiz::on_button(env, chat, ctx, p).await,
            "translate_change" => flows::translate::enter(env, chat, ctx).await,
            p if p.starts_with("translate_") => {
                flows::translate::on_select(env, chat, ctx, p).await
            }
            "resume_restart" => flows::resume::restart(env, chat, ctx).await,
            other => {
                warn!(chat_id = chat.id, payload = %other, "unhandled button payload");
                env.bot
                    .send_text(
                        chat,
                        &format!("Натиснута кнопка: {other}\n(але для неї ще нема логіки 😅)"),
                    )
                    .await?;
                Ok(())
            }
        }
    }

    async fn run_text(
        &self,
        env: &FlowEnv<'_>,
        chat: &Chat,
        ctx: &mut ConversationContext,
        text: &str,
    ) -> Result<()> {
        match ctx.state.clone() {
            ChatState::ResumeCollecting { .. } | ChatState::ResumeDone => {
                flows::resume::collect(env, chat, ctx, text).await
            }
            ChatState::QuizAwaitingAnswer { topic, question } => {
                flows::quiz::check_answer(env, chat, ctx, &topic, &question, text).await
            }
            // No active flow: try to infer intent, otherwise joke and go home.
            ChatState::Idle | ChatState::Fact => {
                self.run_idle_text(env, chat, ctx, text).await
            }
            ChatState::Gpt => flows::gpt::on_text(env, chat, ctx, text).await,
            ChatState::TalkChatting { persona } => {
                flows::talk::on_text(env, chat, ctx, &persona, text).await
            }
            ChatState::TalkSelecting => flows::talk::not_selected(env, chat).await,
            ChatState::Translating { lang } => {
                flows::translate::on_text(env, chat, ctx, &lang, text).await
            }
            ChatState::TranslateSelecting => flows::translate::not_selected(env, chat).await,
            ChatState::QuizSelectingTopic => {
                env.bot
                    .send_text(chat, "❓ Спочатку оберіть тему квізу: /quiz")
                    .await?;
                Ok(())
            }
            ChatState::QuizBetweenQuestions { .. } => {
                env.bot
                    .send_text(
                        chat,
                        "🔄 Натисніть «Наступне питання», щоб продовжити квіз.",
                    )
                    .await?;
                Ok(())
            }
        }
    }

    async fn run_idle_text(
        &self,
        env: &FlowEnv<'_>,
        chat: &Chat,
        ctx: &mut ConversationContext,
        text: &str,
    ) -> Result<()> {
        match intent::detect(text) {
            Some(inferred) => {
                info!(chat_id = chat.id, intent = ?inferred, "intent inferred from free text");
                env.bot.send_text(chat, intent::notice(inferred)).await?;
                match inferred {
                    Intent::Fact => flows::fact::send_random_fact(env, chat, ctx).await,
                    Intent::Gpt => flows::gpt::enter(env, chat, ctx).await,
                    Intent::Talk => flows::talk::enter(env, chat, ctx).await,
                    Intent::Quiz => flows::quiz::enter(env, chat, ctx).await,
                    Intent::Translate => flows::translate::enter(env, chat, ctx).await,
                    Intent::Resume => flows::resume::enter(env, chat, ctx).await,
                }
            }
            None => {
                info!(chat_id = chat.id, "no intent matched, funny fallback");
                env.bot.send_text(chat, &intent::funny_fallback()).await?;
                flows::start::show(env, chat, ctx).await
            }
        }
    }
}
