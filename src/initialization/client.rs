//! HTTP client initialization.
//!
//! All outbound traffic goes through `reqwest` clients built here so timeouts
//! and the User-Agent header stay consistent.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{AgentSettings, URL_VALIDATION_TIMEOUT, USER_AGENT};
use crate::error_handling::{ConfigError, InitializationError};
use crate::upstream::ChatClient;

/// Initializes an HTTP client with the given request timeout.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot be
/// set up.
pub fn init_client(timeout: Duration) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Initializes the client used for HEAD checks of resource URLs.
///
/// Some sites reject unknown agents on HEAD, so this client presents a browser
/// User-Agent and gives up after a short timeout.
pub fn init_validation_client() -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(URL_VALIDATION_TIMEOUT)
        .user_agent("Mozilla/5.0")
        .build()?;
    Ok(client)
}

/// Builds the chat client from settings, failing early when the token is missing.
///
/// # Errors
///
/// Returns `ConfigError::MissingSetting` if no GitHub token is configured.
pub fn init_chat_client(
    settings: &AgentSettings,
    http: reqwest::Client,
) -> Result<ChatClient, ConfigError> {
    let token = settings.require_token()?;
    Ok(ChatClient::new(
        http,
        settings.endpoint.as_str(),
        token,
        settings.model_id.as_str(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client() {
        assert!(init_client(Duration::from_secs(10)).is_ok());
        assert!(init_validation_client().is_ok());
    }

    #[test]
    fn test_init_chat_client_requires_token() {
        let http = init_client(Duration::from_secs(10)).unwrap();
        let result = init_chat_client(&AgentSettings::default(), http);
        assert!(matches!(
            result,
            Err(ConfigError::MissingSetting("GITHUB_TOKEN"))
        ));
    }

    #[test]
    fn test_init_chat_client_uses_model() {
        let http = init_client(Duration::from_secs(10)).unwrap();
        let settings = AgentSettings {
            github_token: "token".to_string(),
            model_id: "gpt-4o-mini".to_string(),
            ..Default::default()
        };
        let client = init_chat_client(&settings, http).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
    }
}
