//! Failure classification and retry strategy.
//!
//! The chat API exposes no structured error codes to the scheduler, so upstream
//! failures are classified by substring matching on their message. All of that
//! matching lives here; the scheduler only sees `OutcomeKind`.

use std::time::Duration;
use tokio_retry::strategy::FixedInterval;

use super::types::OutcomeKind;
use crate::config::MAX_FAILURE_MESSAGE_CHARS;

/// Marker for HTTP 429 Too Many Requests.
const RATE_LIMIT_STATUS_MARKER: &str = "429";
const RATE_MARKER: &str = "rate";
const QUOTA_MARKER: &str = "quota";

/// Returns true when a failure message looks like upstream throttling.
///
/// Matching is case-sensitive: `"429"` or `"rate"` anywhere in the text.
pub fn is_rate_limit_signal(message: &str) -> bool {
    message.contains(RATE_LIMIT_STATUS_MARKER) || message.contains(RATE_MARKER)
}

/// Returns true when a failure message reports quota exhaustion.
pub fn is_quota_signal(message: &str) -> bool {
    message.contains(QUOTA_MARKER)
}

/// Maps a final failure message to its outcome kind.
///
/// Quota exhaustion wins over throttling when a message carries both markers,
/// since retrying cannot recover a spent quota.
pub fn classify_failure(message: &str) -> OutcomeKind {
    if is_quota_signal(message) {
        OutcomeKind::QuotaExceeded
    } else if is_rate_limit_signal(message) {
        OutcomeKind::RateLimited
    } else {
        OutcomeKind::OtherFailure
    }
}

/// Truncates a failure message for display.
///
/// Messages longer than `MAX_FAILURE_MESSAGE_CHARS` characters are cut at that
/// many characters and suffixed with `...`. Counts characters, not bytes, so
/// multi-byte text never splits a code point.
pub fn truncate_failure_message(message: &str) -> String {
    match message.char_indices().nth(MAX_FAILURE_MESSAGE_CHARS) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}

/// Human-readable message recorded for a failed request.
pub fn failure_display_message(kind: OutcomeKind, raw: &str) -> String {
    match kind {
        OutcomeKind::OtherFailure => truncate_failure_message(raw),
        other => other.as_str().to_string(),
    }
}

/// Creates the retry strategy for rate-limited requests.
///
/// One retry after a fixed `backoff`. The retry reuses the caller's concurrency
/// permit and does not pass through rate window admission again.
pub fn get_retry_strategy(backoff: Duration) -> impl Iterator<Item = Duration> {
    FixedInterval::new(backoff).take(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_signal_markers() {
        assert!(is_rate_limit_signal("HTTP 429: Too Many Requests"));
        assert!(is_rate_limit_signal("rate limit exceeded"));
        assert!(!is_rate_limit_signal("connection reset by peer"));
        // Case-sensitive on purpose
        assert!(!is_rate_limit_signal("Rate Limit"));
    }

    #[test]
    fn test_classify_failure() {
        assert_eq!(
            classify_failure("HTTP 429: Too Many Requests"),
            OutcomeKind::RateLimited
        );
        assert_eq!(
            classify_failure("You exceeded your current quota"),
            OutcomeKind::QuotaExceeded
        );
        assert_eq!(
            classify_failure("HTTP 429: quota exhausted for today"),
            OutcomeKind::QuotaExceeded
        );
        assert_eq!(
            classify_failure("HTTP 500: internal error"),
            OutcomeKind::OtherFailure
        );
    }

    #[test]
    fn test_truncate_short_message_unchanged() {
        assert_eq!(truncate_failure_message("boom"), "boom");
        let exactly_fifty = "a".repeat(50);
        assert_eq!(truncate_failure_message(&exactly_fifty), exactly_fifty);
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "x".repeat(80);
        let truncated = truncate_failure_message(&long);
        assert_eq!(truncated, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_truncate_multibyte_message() {
        let long = "é".repeat(60);
        let truncated = truncate_failure_message(&long);
        assert_eq!(truncated.chars().count(), 53);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_failure_display_message() {
        assert_eq!(
            failure_display_message(OutcomeKind::RateLimited, "HTTP 429: slow down"),
            "Rate Limited"
        );
        assert_eq!(
            failure_display_message(OutcomeKind::QuotaExceeded, "quota"),
            "Quota Exceeded"
        );
        assert_eq!(
            failure_display_message(OutcomeKind::OtherFailure, "socket closed"),
            "socket closed"
        );
    }

    #[test]
    fn test_get_retry_strategy_single_fixed_delay() {
        let delays: Vec<_> = get_retry_strategy(Duration::from_secs(5)).collect();
        assert_eq!(delays, vec![Duration::from_secs(5)]);
    }
}
