//! Outcome collection and run summaries.

use std::time::Duration;

use tokio::sync::Mutex;

use super::types::RequestOutcome;
use crate::error_handling::OutcomeKind;

/// Collects outcomes as requests finish, in completion order.
#[derive(Default)]
pub struct ResultAggregator {
    outcomes: Mutex<Vec<RequestOutcome>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, outcome: RequestOutcome) {
        self.outcomes.lock().await.push(outcome);
    }

    pub async fn len(&self) -> usize {
        self.outcomes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.outcomes.lock().await.is_empty()
    }

    /// Takes the collected outcomes, leaving the aggregator empty.
    pub async fn drain(&self) -> Vec<RequestOutcome> {
        std::mem::take(&mut *self.outcomes.lock().await)
    }
}

/// Aggregate view of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Requests that only succeeded on their retry (included in `succeeded`)
    pub retried: usize,
    pub rate_limited: usize,
    pub quota_exceeded: usize,
    /// Percentage of all requests that succeeded (0-100)
    pub success_rate: f64,
    /// Mean latency of successful requests in milliseconds (0 if none)
    pub average_latency_ms: f64,
    pub total_duration: Duration,
    /// Requests per minute over the whole run (0 for a zero-length run)
    pub throughput_per_minute: f64,
    /// Outcomes in completion order
    pub outcomes: Vec<RequestOutcome>,
}

impl RunSummary {
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind == kind).count()
    }
}

/// Builds the summary for a set of outcomes.
///
/// Pure function of its inputs; an empty outcome set yields zero rates.
/// Outcomes may be in any order.
pub fn summarize(outcomes: Vec<RequestOutcome>, total_duration: Duration) -> RunSummary {
    let total = outcomes.len();
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let count_of = |kind: OutcomeKind| outcomes.iter().filter(|o| o.kind == kind).count();
    let retried = count_of(OutcomeKind::SuccessOnRetry);
    let rate_limited = count_of(OutcomeKind::RateLimited);
    let quota_exceeded = count_of(OutcomeKind::QuotaExceeded);

    let success_rate = if total > 0 {
        succeeded as f64 * 100.0 / total as f64
    } else {
        0.0
    };

    let average_latency_ms = if succeeded > 0 {
        let sum: f64 = outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.latency.as_secs_f64() * 1000.0)
            .sum();
        sum / succeeded as f64
    } else {
        0.0
    };

    let minutes = total_duration.as_secs_f64() / 60.0;
    let throughput_per_minute = if minutes > 0.0 {
        total as f64 / minutes
    } else {
        0.0
    };

    RunSummary {
        total,
        succeeded,
        failed: total - succeeded,
        retried,
        rate_limited,
        quota_exceeded,
        success_rate,
        average_latency_ms,
        total_duration,
        throughput_per_minute,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::types::RequestId;

    fn outcome(id: usize, kind: OutcomeKind, latency_ms: u64) -> RequestOutcome {
        RequestOutcome {
            id: RequestId(id),
            batch: 0,
            kind,
            message: kind.as_str().to_string(),
            latency: Duration::from_millis(latency_ms),
            attempts: 1,
        }
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(Vec::new(), Duration::ZERO);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.average_latency_ms, 0.0);
        assert_eq!(summary.throughput_per_minute, 0.0);
    }

    #[test]
    fn test_summarize_mixed() {
        let outcomes = vec![
            outcome(3, OutcomeKind::RateLimited, 900),
            outcome(1, OutcomeKind::Success, 200),
            outcome(2, OutcomeKind::SuccessOnRetry, 400),
            outcome(4, OutcomeKind::QuotaExceeded, 50),
        ];
        let summary = summarize(outcomes, Duration::from_secs(30));

        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.retried, 1);
        assert_eq!(summary.rate_limited, 1);
        assert_eq!(summary.quota_exceeded, 1);
        assert!((summary.success_rate - 50.0).abs() < 1e-9);
        // Failures are excluded from the latency average
        assert!((summary.average_latency_ms - 300.0).abs() < 1e-9);
        // 4 requests in half a minute
        assert!((summary.throughput_per_minute - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_all_failed() {
        let outcomes = vec![
            outcome(1, OutcomeKind::OtherFailure, 10),
            outcome(2, OutcomeKind::OtherFailure, 10),
        ];
        let summary = summarize(outcomes, Duration::from_secs(1));
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.average_latency_ms, 0.0);
        assert_eq!(summary.count(OutcomeKind::OtherFailure), 2);
    }

    #[tokio::test]
    async fn test_aggregator_record_and_drain() {
        let aggregator = ResultAggregator::new();
        assert!(aggregator.is_empty().await);

        aggregator.record(outcome(2, OutcomeKind::Success, 1)).await;
        aggregator.record(outcome(1, OutcomeKind::Success, 1)).await;
        assert_eq!(aggregator.len().await, 2);

        let drained = aggregator.drain().await;
        assert_eq!(drained[0].id, RequestId(2));
        assert!(aggregator.is_empty().await);
    }
}
