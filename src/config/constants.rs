//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: scheduler
//! limits, retry timing, upstream endpoints and display limits.

use std::time::Duration;

// Batch scheduler defaults
/// Maximum number of requests allowed in flight at once
pub const MAX_CONCURRENT_REQUESTS: usize = 5;
/// Requests allowed to begin within any trailing rate window
pub const REQUESTS_PER_MINUTE: usize = 15;
/// Number of requests dispatched together as one batch
pub const BATCH_SIZE: usize = 5;
/// Length of the trailing window the per-minute quota is enforced over
pub const RATE_WINDOW: Duration = Duration::from_secs(60);
/// How long a blocked request waits before re-checking the rate window
pub const RATE_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Delay before the single retry of a rate-limited request
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(5);
/// Request count used by `/test` when the prompt is left blank
pub const DEFAULT_TEST_REQUESTS: usize = 10;

// Failure reporting
/// Maximum failure message length in characters before truncation
pub const MAX_FAILURE_MESSAGE_CHARS: usize = 50;

// Upstream chat API
/// GitHub Models inference endpoint (OpenAI-compatible)
pub const GITHUB_MODELS_ENDPOINT: &str = "https://models.github.ai/inference";
pub const DEFAULT_MODEL_ID: &str = "gpt-4o";
pub const DEFAULT_AGENT_NAME: &str = "Letopia - Roadmap Agent";
pub const DEFAULT_SYSTEM_PROMPT_PATH: &str = "prompts/system_prompt.txt";
/// Per-request HTTP timeout in seconds for chat completions
pub const CHAT_TIMEOUT_SECS: u64 = 120;

// Web search (Serper.dev)
pub const SERPER_API_URL: &str = "https://google.serper.dev/search";
pub const SEARCH_MAX_RESULTS: usize = 3;
/// Timeout for HEAD requests used to validate resource URLs
pub const URL_VALIDATION_TIMEOUT: Duration = Duration::from_secs(5);

pub const USER_AGENT: &str = concat!("roadmap_agent/", env!("CARGO_PKG_VERSION"));
