//! # Bot core
//!
//! Transport-agnostic core for the conversational bot: inbound update model
//! ([`Update`], [`Command`]), the outbound platform capability trait ([`Bot`]),
//! the prompt/message resource store ([`ResourceStore`]), error types, and
//! tracing initialization. The Telegram adapter and the flow handlers live in
//! the application crate; everything here can be mocked in tests.

pub mod bot;
pub mod error;
pub mod logger;
pub mod resources;
pub mod types;

pub use bot::{Bot, Button, MessageId};
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use resources::{FsResources, ResourceStore};
pub use types::{Chat, Command, Update, UpdateKind};
