//! Teloxide dispatcher runner: converts platform updates into core updates
//! and hands them to the application [`Dispatcher`]. Each update runs in a
//! spawned task; handler errors are logged and never terminate the process.

use std::sync::Arc;

use anyhow::Result;
use bot_core::{Chat as CoreChat, Command, Update as CoreUpdate, UpdateKind};
use teloxide::prelude::*;
use tracing::{error, info};

use crate::dispatcher::Dispatcher as AppDispatcher;

/// Runs long polling until shutdown (Ctrl-C handled).
pub async fn run(bot: Bot, dispatcher: Arc<AppDispatcher>) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "bot started");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback_query));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

fn spawn_dispatch(dispatcher: Arc<AppDispatcher>, update: CoreUpdate) {
    tokio::spawn(async move {
        let chat_id = update.chat.id;
        if let Err(e) = dispatcher.dispatch(update).await {
            error!(chat_id, error = %e, "update handling failed");
        }
    });
}

async fn handle_message(
    msg: Message,
    dispatcher: Arc<AppDispatcher>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        info!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };
    let chat = CoreChat::new(msg.chat.id.0);
    info!(chat_id = chat.id, message_content = %text, "received message");

    let kind = match Command::parse(text) {
        Some(command) => UpdateKind::Command(command),
        None if text.trim_start().starts_with('/') => {
            // Unknown slash command: no handler is bound, leave it alone.
            info!(chat_id = chat.id, "ignoring unknown command");
            return Ok(());
        }
        None => UpdateKind::Text(text.to_string()),
    };

    spawn_dispatch(dispatcher, CoreUpdate { chat, kind });
    Ok(())
}

async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    dispatcher: Arc<AppDispatcher>,
) -> ResponseResult<()> {
    // Telegram keeps the button spinner until the query is answered.
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(chat_id) = query.message.as_ref().map(|m| m.chat().id.0) else {
        return Ok(());
    };
    let Some(payload) = query.data else {
        return Ok(());
    };
    let chat = CoreChat::new(chat_id);
    info!(chat_id = chat.id, payload = %payload, "received callback query");

    spawn_dispatch(dispatcher, CoreUpdate::button(chat, payload));
    Ok(())
}
