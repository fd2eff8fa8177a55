//! Error handling and failure classification.
//!
//! This module provides:
//! - Error type definitions for configuration, upstream and I/O failures
//! - The outcome taxonomy for scheduled requests
//! - String-based classification of upstream failure messages
//! - The retry strategy for rate-limited requests

mod categorization;
mod types;

// Re-export public API
pub use categorization::{
    classify_failure, failure_display_message, get_retry_strategy, is_quota_signal,
    is_rate_limit_signal, truncate_failure_message,
};
pub use types::{
    ConfigError, InitializationError, OutcomeKind, RoadmapError, SearchError, UpstreamError,
};
