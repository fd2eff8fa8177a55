//! Batch partitioning and sequential batch dispatch.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use log::{debug, info, warn};
use tokio::time::Instant;

use super::aggregator::{summarize, ResultAggregator, RunSummary};
use super::executor::RequestExecutor;
use super::gate::ConcurrencyGate;
use super::report::RunReporter;
use super::types::{Batch, RequestId, RequestOutcome};
use super::window::RateWindow;
use crate::config::SchedulerConfig;
use crate::error_handling::{failure_display_message, OutcomeKind};
use crate::upstream::CompletionClient;

/// Splits requests `1..=total` into contiguous batches of `batch_size`.
///
/// The last batch holds the remainder and may be shorter. A zero batch size is
/// treated as one.
pub fn partition_batches(total: usize, batch_size: usize) -> Vec<Batch> {
    let batch_size = batch_size.max(1);
    let ids: Vec<RequestId> = (1..=total).map(RequestId).collect();
    ids.chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            ids: chunk.to_vec(),
        })
        .collect()
}

/// Dispatches batches one after another, fanning out within each batch.
///
/// Every request of batch N produces an outcome before batch N+1 is
/// dispatched, and a fixed delay separates consecutive batches. Inside a batch
/// the concurrency gate may admit fewer requests than the batch holds, in which
/// case the rest queue on the gate.
pub struct BatchScheduler {
    executor: Arc<RequestExecutor>,
    reporter: Arc<dyn RunReporter>,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchScheduler {
    /// Builds a scheduler with a fresh rate window and concurrency gate.
    ///
    /// Both are owned by this scheduler, so separate schedulers never share
    /// admission state.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        config: &SchedulerConfig,
        reporter: Arc<dyn RunReporter>,
    ) -> Self {
        let gate = ConcurrencyGate::new(config.max_concurrency);
        let window = Arc::new(RateWindow::with_window(
            config.requests_per_minute,
            config.rate_window,
            config.rate_poll_interval,
        ));
        let executor = Arc::new(RequestExecutor::new(
            client,
            gate,
            window,
            Arc::clone(&reporter),
            config.retry_backoff,
        ));

        BatchScheduler {
            executor,
            reporter,
            batch_size: config.batch_size.max(1),
            batch_delay: config.batch_delay(),
        }
    }

    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Runs `total_requests` requests and summarizes them.
    ///
    /// Exactly one outcome is recorded per request. A request whose task
    /// panics is recorded as `OtherFailure` and does not disturb its siblings.
    pub async fn run(&self, total_requests: usize) -> RunSummary {
        let batches = partition_batches(total_requests, self.batch_size);
        let total_batches = batches.len();
        let aggregator = ResultAggregator::new();
        let start = Instant::now();

        info!(
            "Processing {} request(s) in {} batch(es), {:?} between batches",
            total_requests, total_batches, self.batch_delay
        );

        for batch in &batches {
            self.reporter.batch_started(batch, total_batches);
            self.run_batch(batch, &aggregator).await;

            if batch.index + 1 < total_batches {
                debug!(
                    "Batch {} complete, waiting {:?}",
                    batch.index + 1,
                    self.batch_delay
                );
                self.reporter.batch_waiting(self.batch_delay);
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        let summary = summarize(aggregator.drain().await, start.elapsed());
        info!(
            "Run finished: {} succeeded, {} failed in {:.1}s",
            summary.succeeded,
            summary.failed,
            summary.total_duration.as_secs_f64()
        );
        summary
    }

    async fn run_batch(&self, batch: &Batch, aggregator: &ResultAggregator) {
        let mut tasks = FuturesUnordered::new();
        for &id in &batch.ids {
            let executor = Arc::clone(&self.executor);
            let batch_index = batch.index;
            tasks.push(
                tokio::spawn(async move { executor.execute(id, batch_index).await })
                    .map(move |joined| (id, joined)),
            );
        }

        while let Some((id, joined)) = tasks.next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    warn!("Request {} task failed: {:?}", id, join_error);
                    let raw = format!("Task failed: {}", join_error);
                    RequestOutcome {
                        id,
                        batch: batch.index,
                        kind: OutcomeKind::OtherFailure,
                        message: failure_display_message(OutcomeKind::OtherFailure, &raw),
                        latency: Duration::ZERO,
                        attempts: 0,
                    }
                }
            };
            self.reporter.request_finished(&outcome);
            aggregator.record(outcome).await;
        }
    }
}
