//! # Telegram GPT bot
//!
//! Conversational front-end routing Telegram updates (commands, inline
//! buttons, free text) to linear prompt-driven flows: random facts, open
//! Q&A, persona chat, quiz, translation, and resume building. Each flow
//! drives the user through a few states, talks to the chat-completion
//! client, and replies with formatted text and inline buttons.
//!
//! Core pieces: [`state`] (typed per-chat conversation state),
//! [`dispatcher`] (update routing), [`flows`] (one module per feature),
//! [`intent`] (idle free-text keyword heuristic), and [`telegram`]
//! (teloxide adapter and runner).

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod flows;
pub mod intent;
pub mod markdown;
pub mod state;
pub mod telegram;

pub use cli::{Cli, Commands};
pub use config::BotConfig;
pub use dispatcher::Dispatcher;
pub use state::{
    ChatState, ConversationContext, FactHistory, QuizScore, ResumeDraft, ResumeStep, StateStore,
};
pub use telegram::run_bot;
