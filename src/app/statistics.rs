//! Run banner and summary block printed around a load test.

use colored::*;

use crate::config::SchedulerConfig;
use crate::scheduler::RunSummary;

const RULE: &str = "═══════════════════════════════════════════════════════";

/// Lines of the banner shown before a run starts.
pub fn banner_lines(model: &str, total_requests: usize, config: &SchedulerConfig) -> Vec<String> {
    let batch_size = config.batch_size.max(1);
    let batches = total_requests.div_ceil(batch_size);
    vec![
        RULE.to_string(),
        format!("  Batch Processing Test: {}", model),
        format!("  Total Requests: {}", total_requests),
        format!("  Max Concurrent: {}", config.max_concurrency),
        format!("  Rate Limit: {} req/min", config.requests_per_minute),
        format!(
            "  Batch Size: {} | Batch Delay: {}s",
            config.batch_size,
            config.batch_delay().as_secs_f64()
        ),
        RULE.to_string(),
        String::new(),
        format!("  Processing {} batch(es)...", batches),
        String::new(),
    ]
}

pub fn print_run_banner(model: &str, total_requests: usize, config: &SchedulerConfig) {
    for line in banner_lines(model, total_requests, config) {
        println!("{}", line);
    }
}

/// Lines of the results table, without the trailing notices.
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let elapsed = summary.total_duration;
    vec![
        String::new(),
        RULE.to_string(),
        "  RESULTS SUMMARY".to_string(),
        RULE.to_string(),
        format!("  Total Requests:    {}", summary.total),
        format!("  Successful:        {}", summary.succeeded),
        format!("  Failed:            {}", summary.failed),
        format!("  Success Rate:      {:.1}%", summary.success_rate),
        format!(
            "  Total Time:        {}ms ({:.1}s)",
            elapsed.as_millis(),
            elapsed.as_secs_f64()
        ),
        format!("  Avg Response Time: {:.0}ms", summary.average_latency_ms),
        format!(
            "  Throughput:        {:.1} req/min",
            summary.throughput_per_minute
        ),
        RULE.to_string(),
    ]
}

/// Closing notices: rate limiting and quota exhaustion when they occurred,
/// or a success line when nothing failed.
pub fn summary_notices(summary: &RunSummary) -> Vec<String> {
    let mut notices = Vec::new();
    if summary.rate_limited > 0 {
        notices.push(format!(
            "  ⚠ {} requests were rate limited",
            summary.rate_limited
        ));
    }
    if summary.quota_exceeded > 0 {
        notices.push(format!(
            "  ⚠ {} requests hit the quota limit",
            summary.quota_exceeded
        ));
    }
    if summary.failed == 0 {
        notices.push("  ✓ All requests completed successfully!".to_string());
    }
    notices
}

pub fn print_run_summary(summary: &RunSummary) {
    for line in summary_lines(summary) {
        if line.starts_with("  Successful:") {
            println!("{}", line.green());
        } else if line.starts_with("  Failed:") {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }

    for notice in summary_notices(summary) {
        println!();
        if notice.contains('⚠') {
            println!("{}", notice.yellow());
        } else {
            println!("{}", notice.green());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::OutcomeKind;
    use crate::scheduler::{summarize, RequestId, RequestOutcome};
    use std::time::Duration;

    fn outcome(id: usize, kind: OutcomeKind) -> RequestOutcome {
        RequestOutcome {
            id: RequestId(id),
            batch: 0,
            kind,
            message: kind.as_str().to_string(),
            latency: Duration::from_millis(400),
            attempts: 1,
        }
    }

    #[test]
    fn test_banner_lines() {
        let lines = banner_lines("gpt-4o", 10, &SchedulerConfig::default());
        assert!(lines.contains(&"  Batch Processing Test: gpt-4o".to_string()));
        assert!(lines.contains(&"  Batch Size: 5 | Batch Delay: 20s".to_string()));
        assert!(lines.contains(&"  Processing 2 batch(es)...".to_string()));
    }

    #[test]
    fn test_summary_lines() {
        let summary = summarize(
            vec![
                outcome(1, OutcomeKind::Success),
                outcome(2, OutcomeKind::SuccessOnRetry),
                outcome(3, OutcomeKind::RateLimited),
                outcome(4, OutcomeKind::OtherFailure),
            ],
            Duration::from_millis(30_000),
        );
        let lines = summary_lines(&summary);
        assert!(lines.contains(&"  Success Rate:      50.0%".to_string()));
        assert!(lines.contains(&"  Total Time:        30000ms (30.0s)".to_string()));
        assert!(lines.contains(&"  Avg Response Time: 400ms".to_string()));
        assert!(lines.contains(&"  Throughput:        8.0 req/min".to_string()));

        let notices = summary_notices(&summary);
        assert_eq!(notices, vec!["  ⚠ 1 requests were rate limited".to_string()]);
    }

    #[test]
    fn test_all_success_notice() {
        let summary = summarize(vec![outcome(1, OutcomeKind::Success)], Duration::from_secs(1));
        assert_eq!(
            summary_notices(&summary),
            vec!["  ✓ All requests completed successfully!".to_string()]
        );
    }
}
