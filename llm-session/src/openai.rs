//! OpenAI implementation of [`ChatCompleter`] on `async-openai`.

use std::sync::Arc;

use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::debug;

use crate::{ChatCompleter, ChatMessage, LlmSettings, MessageRole};

/// Chat-completion transport against an OpenAI-compatible API.
#[derive(Clone)]
pub struct OpenAiCompleter {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiCompleter {
    pub fn new(settings: &LlmSettings) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(settings.api_key.clone())
            .with_api_base(settings.base_url.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

fn to_request_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let request_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(request_msg)
}

#[async_trait]
impl ChatCompleter for OpenAiCompleter {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()?;

        debug!(model = %self.model, turns = messages.len(), "sending chat completion request");
        let response = self.client.chat().create(request).await?;

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No choices in completion response"),
        }
    }
}
