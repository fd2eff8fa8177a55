//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, CompletionClient};
use crate::error_handling::UpstreamError;

/// Chat completion client for GitHub Models (or any OpenAI-compatible API).
///
/// Sends non-streaming `POST {endpoint}/chat/completions` requests with a
/// bearer token and returns the first choice's message content.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        token: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }

    /// Sends a full conversation and returns the assistant's reply.
    ///
    /// # Errors
    ///
    /// - `UpstreamError::Transport` if the request could not be sent or decoded
    /// - `UpstreamError::Status` for non-success HTTP statuses (e.g. 429)
    /// - `UpstreamError::EmptyResponse` if no choice carried content
    pub async fn complete_chat(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .http
            .post(self.chat_url())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(UpstreamError::EmptyResponse)?;

        debug!(
            "Chat completion from {} returned {} chars",
            self.model,
            content.len()
        );
        Ok(content)
    }
}

#[async_trait]
impl CompletionClient for ChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.complete_chat(&[ChatMessage::user(prompt)]).await
    }
}
