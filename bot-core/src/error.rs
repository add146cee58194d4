//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; everything a flow handler can fail
//! with collapses into one of its variants.

use thiserror::Error;

/// Top-level error (platform transport, LLM, resources, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Platform error: {0}")]
    Platform(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
