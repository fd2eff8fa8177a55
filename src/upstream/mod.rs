//! Chat completion collaborators.
//!
//! The scheduler and the agent only depend on `CompletionClient`; the concrete
//! `ChatClient` talks to an OpenAI-compatible endpoint over HTTP.

mod chat;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error_handling::UpstreamError;

pub use chat::ChatClient;

/// Something that turns a prompt into completion text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends a single-turn prompt and returns the reply text.
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
