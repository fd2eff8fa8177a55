//! Rate-limited batch request scheduling.
//!
//! Fans a number of independent chat requests out to the upstream API under two
//! simultaneous limits:
//! - a concurrency ceiling (`ConcurrencyGate`)
//! - a per-minute quota over a rolling window (`RateWindow`)
//!
//! Requests are grouped into fixed-size batches that run strictly one after
//! another with a delay between them. Each request is retried once when the
//! upstream signals rate limiting, and every request ends in exactly one
//! `RequestOutcome`. Outcomes are summarized into a `RunSummary`.

mod aggregator;
mod batch;
mod executor;
mod gate;
mod report;
mod types;
mod window;

use std::sync::Arc;

pub use aggregator::{summarize, ResultAggregator, RunSummary};
pub use batch::{partition_batches, BatchScheduler};
pub use executor::{request_prompt, RequestExecutor};
pub use gate::ConcurrencyGate;
pub use report::{outcome_line, ConsoleReporter, RunReporter, SilentReporter};
pub use types::{Batch, RequestId, RequestOutcome};
pub use window::RateWindow;

use crate::config::SchedulerConfig;
use crate::error_handling::ConfigError;
use crate::upstream::CompletionClient;

/// Runs a load test of `total_requests` chat requests.
///
/// # Errors
///
/// Returns `ConfigError::InvalidSetting` if the scheduler limits are unusable.
/// Individual request failures never produce an error; they are counted in
/// the summary.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use roadmap_agent::{run_load_test, ChatClient, SchedulerConfig, SilentReporter};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ChatClient::new(
///     reqwest::Client::new(),
///     "https://models.github.ai/inference",
///     "token",
///     "gpt-4o",
/// );
/// let summary = run_load_test(
///     Arc::new(client),
///     10,
///     &SchedulerConfig::default(),
///     Arc::new(SilentReporter),
/// )
/// .await?;
/// println!("{} of {} succeeded", summary.succeeded, summary.total);
/// # Ok(())
/// # }
/// ```
pub async fn run_load_test(
    client: Arc<dyn CompletionClient>,
    total_requests: usize,
    config: &SchedulerConfig,
    reporter: Arc<dyn RunReporter>,
) -> Result<RunSummary, ConfigError> {
    config.validate()?;
    let scheduler = BatchScheduler::new(client, config, reporter);
    Ok(scheduler.run(total_requests).await)
}
