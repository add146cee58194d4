//! Shared test doubles: a recording platform bot, a scripted completer,
//! and a stub resource store.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use bot_core::{Bot, Button, Chat, MessageId, ResourceStore, Result};
use llm_session::{ChatCompleter, ChatMessage};
use telegram_gpt_bot::{Dispatcher, StateStore};

/// One recorded outbound platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat: i64, text: String },
    Plain { chat: i64, text: String },
    Buttons { chat: i64, text: String, payloads: Vec<String> },
    Image { chat: i64, name: String },
    Deleted { chat: i64, id: String },
    Menu { chat: i64 },
}

/// Records every outbound call; message ids are sequential integers.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicUsize,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// All formatted texts (plain and buttons included), in send order.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. }
                | Sent::Plain { text, .. }
                | Sent::Buttons { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    pub fn menu_count(&self) -> usize {
        self.sent()
            .iter()
            .filter(|s| matches!(s, Sent::Menu { .. }))
            .count()
    }

    fn record(&self, item: Sent) -> MessageId {
        self.sent.lock().unwrap().push(item);
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<MessageId> {
        Ok(self.record(Sent::Text {
            chat: chat.id,
            text: text.to_string(),
        }))
    }

    async fn send_plain(&self, chat: &Chat, text: &str) -> Result<MessageId> {
        Ok(self.record(Sent::Plain {
            chat: chat.id,
            text: text.to_string(),
        }))
    }

    async fn send_text_buttons(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageId> {
        Ok(self.record(Sent::Buttons {
            chat: chat.id,
            text: text.to_string(),
            payloads: buttons.iter().map(|b| b.payload.clone()).collect(),
        }))
    }

    async fn send_image(&self, chat: &Chat, name: &str) -> Result<()> {
        self.record(Sent::Image {
            chat: chat.id,
            name: name.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &MessageId) -> Result<()> {
        self.record(Sent::Deleted {
            chat: chat.id,
            id: message_id.clone(),
        });
        Ok(())
    }

    async fn set_commands(&self, chat: &Chat, _commands: &[(String, String)]) -> Result<()> {
        self.record(Sent::Menu { chat: chat.id });
        Ok(())
    }
}

/// Replies from a script, then `"ok"` forever; counts every call.
#[derive(Default)]
pub struct ScriptedCompleter {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(reply.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompleter for ScriptedCompleter {
    async fn complete(&self, _messages: &[ChatMessage]) -> AnyResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "ok".to_string()))
    }
}

/// Stub store: every prompt/message exists and names itself; no images.
pub struct StubResources;

impl ResourceStore for StubResources {
    fn prompt(&self, name: &str) -> Result<String> {
        Ok(format!("prompt:{name}"))
    }

    fn message(&self, name: &str) -> Result<String> {
        Ok(format!("message:{name}"))
    }

    fn image(&self, _name: &str) -> Option<PathBuf> {
        None
    }
}

/// Fully wired dispatcher over the test doubles.
pub fn build_dispatcher() -> (Arc<Dispatcher>, Arc<MockBot>, Arc<ScriptedCompleter>) {
    let bot = Arc::new(MockBot::new());
    let completer = Arc::new(ScriptedCompleter::new());
    let store = StateStore::new(completer.clone());
    let dispatcher = Arc::new(Dispatcher::new(
        bot.clone(),
        Arc::new(StubResources),
        store,
    ));
    (dispatcher, bot, completer)
}
