//! Flow handlers, one module per feature.
//!
//! Every flow is a strictly linear state machine over the chat's
//! [`ConversationContext`]: an entry handler that clears the context and
//! shows the selection menu or instruction, optional selection handlers
//! (button-driven), and turn handlers (text-driven) that do one completion
//! round trip and render the answer with follow-up buttons. The `start`
//! payload exits any flow back to the main menu.
//!
//! LLM failures are caught at the flow boundary: the user sees a
//! flow-specific apologetic message and the state is left unchanged.
//! Platform send failures propagate to the dispatcher.
//!
//! [`ConversationContext`]: crate::state::ConversationContext

pub mod fact;
pub mod gpt;
pub mod quiz;
pub mod resume;
pub mod start;
pub mod talk;
pub mod translate;

use bot_core::{Bot, Chat, MessageId, ResourceStore};
use tracing::{debug, warn};

/// Collaborators every flow handler needs.
pub struct FlowEnv<'a> {
    pub bot: &'a dyn Bot,
    pub resources: &'a dyn ResourceStore,
}

/// Sends a transient "please wait" message without any formatting. A send
/// failure is logged and ignored so the actual work still runs.
pub(crate) async fn send_wait(env: &FlowEnv<'_>, chat: &Chat, text: &str) -> Option<MessageId> {
    match env.bot.send_plain(chat, text).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(chat_id = chat.id, error = %e, "failed to send wait message");
            None
        }
    }
}

/// Deletes a wait message if one was sent. Deletion failures are swallowed;
/// an already-gone message must never mask the primary response.
pub(crate) async fn discard_wait(env: &FlowEnv<'_>, chat: &Chat, waiting: Option<MessageId>) {
    if let Some(id) = waiting {
        if let Err(e) = env.bot.delete_message(chat, &id).await {
            debug!(chat_id = chat.id, error = %e, "could not delete wait message");
        }
    }
}
