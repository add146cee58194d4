//! LLM settings loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Settings for the OpenAI-compatible completion transport.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// OPENAI_API_KEY (required)
    pub api_key: String,
    /// OPENAI_BASE_URL; default api.openai.com
    pub base_url: String,
    /// MODEL; default gpt-3.5-turbo
    pub model: String,
    /// LLM_MAX_TOKENS; default 3000
    pub max_tokens: u32,
    /// LLM_TEMPERATURE; default 0.9
    pub temperature: f32,
}

impl LlmSettings {
    /// Load from environment variables. Fails only on a missing API key;
    /// everything else has a default.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let max_tokens = env::var("LLM_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let temperature = env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.9);
        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
        })
    }
}
