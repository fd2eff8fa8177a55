//! Configuration types.
//!
//! This module defines the settings structs consumed by the library and the
//! enums used for command-line argument parsing.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    BATCH_SIZE, DEFAULT_MODEL_ID, GITHUB_MODELS_ENDPOINT, MAX_CONCURRENT_REQUESTS,
    RATE_LIMIT_BACKOFF, RATE_POLL_INTERVAL, RATE_WINDOW, REQUESTS_PER_MINUTE,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Limits applied by the batch scheduler.
///
/// The three counters jointly determine the delay inserted between batches:
/// a batch should occupy `60s * batch_size / requests_per_minute` of wall
/// clock time so that back-to-back batches stay under the per-minute quota.
///
/// # Examples
///
/// ```
/// use roadmap_agent::SchedulerConfig;
/// use std::time::Duration;
///
/// let config = SchedulerConfig::default();
/// assert_eq!(config.batch_delay(), Duration::from_secs(20));
/// ```
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Maximum requests in flight at once
    pub max_concurrency: usize,

    /// Requests allowed to begin in any trailing 60 second window
    pub requests_per_minute: usize,

    /// Requests dispatched together per batch
    pub batch_size: usize,

    /// Delay before retrying a rate-limited request
    pub retry_backoff: Duration,

    /// Re-check interval while waiting for rate window admission
    pub rate_poll_interval: Duration,

    /// Trailing window the per-minute quota applies to
    pub rate_window: Duration,
}

impl SchedulerConfig {
    /// Wall-clock time each batch occupies before the next one is dispatched.
    ///
    /// Computed in floating point so quotas smaller than the batch size still
    /// yield a finite delay (e.g. 5 per batch at 2 per minute is 150 seconds).
    /// Returns zero for an invalid (zero) quota and saturates at
    /// `Duration::MAX` when the delay does not fit; `validate` rejects both.
    pub fn batch_delay(&self) -> Duration {
        self.checked_batch_delay().unwrap_or(Duration::MAX)
    }

    fn checked_batch_delay(&self) -> Option<Duration> {
        if self.requests_per_minute == 0 {
            return Some(Duration::ZERO);
        }
        let batches_per_window = self.requests_per_minute as f64 / self.batch_size as f64;
        Duration::try_from_secs_f64(self.rate_window.as_secs_f64() / batches_per_window).ok()
    }

    /// Checks that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSetting` when any counter is zero, or when
    /// batch size and quota imply a batch delay too large to represent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counters = [
            ("max_concurrency", self.max_concurrency),
            ("requests_per_minute", self.requests_per_minute),
            ("batch_size", self.batch_size),
        ];
        for (name, value) in counters {
            if value == 0 {
                return Err(ConfigError::InvalidSetting {
                    name,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if self.checked_batch_delay().is_none() {
            return Err(ConfigError::InvalidSetting {
                name: "batch_size",
                reason: format!(
                    "batch delay for {} per batch at {} per minute is out of range",
                    self.batch_size, self.requests_per_minute
                ),
            });
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: MAX_CONCURRENT_REQUESTS,
            requests_per_minute: REQUESTS_PER_MINUTE,
            batch_size: BATCH_SIZE,
            retry_backoff: RATE_LIMIT_BACKOFF,
            rate_poll_interval: RATE_POLL_INTERVAL,
            rate_window: RATE_WINDOW,
        }
    }
}

/// Credentials and model selection for the upstream services.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Token used as the bearer credential for the chat API
    pub github_token: String,

    /// Chat model identifier
    pub model_id: String,

    /// OpenAI-compatible inference endpoint
    pub endpoint: String,

    /// Serper.dev key; web search is unavailable without it
    pub serper_api_key: Option<String>,
}

impl AgentSettings {
    /// Returns the chat token, failing when it was never configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` if the token is empty.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        let token = self.github_token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingSetting("GITHUB_TOKEN"));
        }
        Ok(token)
    }

    /// Returns the Serper key, failing when web search is not configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` if the key is absent or blank.
    pub fn require_serper_key(&self) -> Result<&str, ConfigError> {
        match self.serper_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingSetting("SERPER_API_KEY")),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            github_token: String::new(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: GITHUB_MODELS_ENDPOINT.to_string(),
            serper_api_key: None,
        }
    }
}
