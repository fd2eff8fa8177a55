//! Error type definitions.
//!
//! This module defines the error enums returned by the library and the outcome
//! taxonomy assigned to every scheduled request.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Configuration faults detected before any request is attempted.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is empty or absent.
    #[error("{0} is not configured (set it in the environment or a .env file)")]
    MissingSetting(&'static str),

    /// A setting holds a value the scheduler cannot work with.
    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// The agent's system prompt file does not exist.
    #[error("System prompt file not found at path: {}", .0.display())]
    PromptNotFound(PathBuf),

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures returned by the chat completion API.
///
/// The rendered message is the only signal the scheduler uses to tell rate
/// limiting and quota exhaustion apart from other failures, so `Status` keeps
/// the numeric code and the upstream body in its text.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure (connect, timeout, decode).
    #[error("Chat request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered without any completion text.
    #[error("Chat response contained no choices")]
    EmptyResponse,
}

/// Failures returned by the web search service.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Transport(#[from] ReqwestError),

    #[error("Search API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failures reading or writing roadmap documents.
#[derive(Error, Debug)]
pub enum RoadmapError {
    #[error("Roadmap JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Roadmap file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal classification of one scheduled request, including any retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeKind {
    /// First attempt succeeded
    Success,
    /// First attempt was rate limited, the retry succeeded
    SuccessOnRetry,
    /// Throttled and the single retry did not help
    RateLimited,
    /// Upstream reported hard quota exhaustion
    QuotaExceeded,
    /// Any other failure
    OtherFailure,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "Success",
            OutcomeKind::SuccessOnRetry => "Success (retry)",
            OutcomeKind::RateLimited => "Rate Limited",
            OutcomeKind::QuotaExceeded => "Quota Exceeded",
            OutcomeKind::OtherFailure => "Other failure",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeKind::Success | OutcomeKind::SuccessOnRetry)
    }
}
