//! Progress reporting for scheduler runs.

use std::time::Duration;

use colored::*;

use super::types::{Batch, RequestId, RequestOutcome};
use crate::error_handling::OutcomeKind;

/// Receives progress events while a run is in flight.
///
/// Every method has an empty default so implementations only override what
/// they display. Events may arrive from several requests concurrently.
pub trait RunReporter: Send + Sync {
    fn batch_started(&self, _batch: &Batch, _total_batches: usize) {}

    fn request_retrying(&self, _id: RequestId, _backoff: Duration) {}

    fn request_finished(&self, _outcome: &RequestOutcome) {}

    fn batch_waiting(&self, _delay: Duration) {}
}

/// Discards every event. Used by tests and library callers without a console.
pub struct SilentReporter;

impl RunReporter for SilentReporter {}

/// Prints coloured per-request and per-batch lines to stdout.
pub struct ConsoleReporter;

impl RunReporter for ConsoleReporter {
    fn batch_started(&self, batch: &Batch, total_batches: usize) {
        println!(
            "{}",
            format!(
                "  ── Batch {}/{} ({} requests) ──",
                batch.index + 1,
                total_batches,
                batch.len()
            )
            .cyan()
        );
    }

    fn request_retrying(&self, id: RequestId, backoff: Duration) {
        println!(
            "{}",
            format!(
                "    [⏳] Request {}: Rate limited, retrying in {}s...",
                id,
                backoff.as_secs_f64()
            )
            .yellow()
        );
    }

    fn request_finished(&self, outcome: &RequestOutcome) {
        let line = outcome_line(outcome);
        if outcome.is_success() {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }

    fn batch_waiting(&self, delay: Duration) {
        println!(
            "{}",
            format!(
                "    Waiting {}s before next batch...",
                delay.as_secs_f64()
            )
            .dimmed()
        );
    }
}

/// Renders the status line for a finished request (without colour).
pub fn outcome_line(outcome: &RequestOutcome) -> String {
    let ms = outcome.latency_ms();
    match outcome.kind {
        OutcomeKind::Success => format!("    [✓] Request {}: Success ({}ms)", outcome.id, ms),
        OutcomeKind::SuccessOnRetry => {
            format!("    [✓] Request {}: Success on retry ({}ms)", outcome.id, ms)
        }
        _ => format!(
            "    [✗] Request {}: {} ({}ms)",
            outcome.id, outcome.message, ms
        ),
    }
}
