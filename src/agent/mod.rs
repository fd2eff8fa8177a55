//! Conversational roadmap agent.
//!
//! Wraps the chat client with a fixed system prompt and a per-conversation
//! message history (`AgentThread`).

use std::path::Path;

use log::{debug, info};

use crate::config::DEFAULT_AGENT_NAME;
use crate::error_handling::{ConfigError, UpstreamError};
use crate::upstream::{ChatClient, ChatMessage};

/// Reads the agent's system prompt from `path`.
///
/// # Errors
///
/// - `ConfigError::PromptNotFound` if the file does not exist
/// - `ConfigError::Io` if it exists but cannot be read
pub fn load_system_prompt(path: &Path) -> Result<String, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::PromptNotFound(path.to_path_buf()));
    }
    let prompt = std::fs::read_to_string(path)?;
    debug!(
        "Loaded system prompt from {} ({} bytes)",
        path.display(),
        prompt.len()
    );
    Ok(prompt)
}

/// Message history of one conversation, excluding the system prompt.
#[derive(Debug, Clone, Default)]
pub struct AgentThread {
    messages: Vec<ChatMessage>,
}

impl AgentThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The roadmap agent: a chat model primed with the roadmap system prompt.
pub struct RoadmapAgent {
    client: ChatClient,
    system_prompt: String,
    name: String,
}

impl RoadmapAgent {
    pub fn new(client: ChatClient, system_prompt: impl Into<String>) -> Self {
        RoadmapAgent {
            client,
            system_prompt: system_prompt.into(),
            name: DEFAULT_AGENT_NAME.to_string(),
        }
    }

    /// Builds an agent whose system prompt is read from `prompt_path`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`load_system_prompt`].
    pub fn from_prompt_file(client: ChatClient, prompt_path: &Path) -> Result<Self, ConfigError> {
        let prompt = load_system_prompt(prompt_path)?;
        Ok(Self::new(client, prompt))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn new_thread(&self) -> AgentThread {
        AgentThread::new()
    }

    /// Sends `input` as the next user turn of `thread` and returns the reply.
    ///
    /// The thread only grows when the call succeeds, so a failed turn can be
    /// retried without duplicating the user message.
    ///
    /// # Errors
    ///
    /// Returns the `UpstreamError` of the chat call.
    pub async fn run(&self, input: &str, thread: &mut AgentThread) -> Result<String, UpstreamError> {
        let user = ChatMessage::user(input);

        let mut messages = Vec::with_capacity(thread.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.as_str()));
        messages.extend(thread.messages.iter().cloned());
        messages.push(user.clone());

        info!(
            "{}: sending turn {} to {}",
            self.name,
            thread.len() / 2 + 1,
            self.client.model()
        );
        let reply = self.client.complete_chat(&messages).await?;

        thread.messages.push(user);
        thread.messages.push(ChatMessage::assistant(reply.as_str()));
        Ok(reply)
    }
}
