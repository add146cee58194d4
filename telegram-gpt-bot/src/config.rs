//! Application config: Telegram token, logging, resources, LLM settings.
//! Loaded from env; `.env` is read by the binary before loading.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use llm_session::LlmSettings;

/// Full bot config. Use [`BotConfig::load`] then [`BotConfig::validate`]
/// to fail fast before startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN (CLI `--token` overrides)
    pub bot_token: String,
    /// LOG_FILE
    pub log_file: String,
    /// RESOURCES_DIR: root with prompts/, messages/, images/
    pub resources_dir: String,
    pub llm: LlmSettings,
}

impl BotConfig {
    /// Load from environment variables. If `token` is provided it overrides
    /// BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/gptbot.log".to_string());
        let resources_dir =
            env::var("RESOURCES_DIR").unwrap_or_else(|_| "resources".to_string());
        let llm = LlmSettings::from_env()?;

        Ok(Self {
            bot_token,
            log_file,
            resources_dir,
            llm,
        })
    }

    /// Validate config before init: the resources tree must exist, since
    /// prompts are read per call with no fallback.
    pub fn validate(&self) -> Result<()> {
        let root = Path::new(&self.resources_dir);
        if !root.join("prompts").is_dir() {
            anyhow::bail!(
                "RESOURCES_DIR has no prompts/ directory: {}",
                root.display()
            );
        }
        if !root.join("messages").is_dir() {
            anyhow::bail!(
                "RESOURCES_DIR has no messages/ directory: {}",
                root.display()
            );
        }
        Ok(())
    }
}
