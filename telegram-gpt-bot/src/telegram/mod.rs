//! Telegram wiring: the adapter implementing the core [`Bot`] trait and the
//! teloxide dispatcher runner.

pub mod adapter;
pub mod runner;

use std::sync::Arc;

use anyhow::Result;
use bot_core::{Bot, FsResources, ResourceStore};
use llm_session::OpenAiCompleter;

use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;
use crate::state::StateStore;

pub use adapter::TelegramBotAdapter;

/// Builds all components from config and runs the bot until shutdown.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    let completer = Arc::new(OpenAiCompleter::new(&config.llm));
    let resources: Arc<dyn ResourceStore> = Arc::new(FsResources::new(&config.resources_dir));
    let bot = teloxide::Bot::new(&config.bot_token);
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone(), resources.clone()));
    let store = StateStore::new(completer);
    let dispatcher = Arc::new(Dispatcher::new(adapter, resources, store));

    runner::run(bot, dispatcher).await
}
