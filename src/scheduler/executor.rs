//! Execution of a single scheduled request.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::Instant;
use tokio_retry::RetryIf;

use super::gate::ConcurrencyGate;
use super::report::RunReporter;
use super::types::{RequestId, RequestOutcome};
use super::window::RateWindow;
use crate::error_handling::{
    classify_failure, failure_display_message, get_retry_strategy, is_rate_limit_signal,
    OutcomeKind,
};
use crate::upstream::CompletionClient;

/// Prompt sent upstream for a load-test request.
pub fn request_prompt(id: RequestId) -> String {
    format!("Say 'Test {} OK' in exactly 3 words.", id)
}

/// A failed upstream attempt, reduced to what classification needs.
struct AttemptFailure {
    message: String,
    latency: Duration,
}

/// Runs one request through the concurrency gate, the rate window and the
/// upstream client, converting every result into a `RequestOutcome`.
///
/// Steps:
/// 1. Hold a concurrency permit for the whole execution (released on drop)
/// 2. Wait for rate window admission
/// 3. Call upstream; on a rate-limit shaped failure wait `retry_backoff` and
///    call once more
/// 4. Classify the final result
///
/// The retry reuses the held permit and skips rate window admission. That keeps
/// the retry cheap but means a retried request is not counted in the window a
/// second time, so the upstream may see up to `quota + retries` calls in a
/// window.
pub struct RequestExecutor {
    client: Arc<dyn CompletionClient>,
    gate: ConcurrencyGate,
    window: Arc<RateWindow>,
    reporter: Arc<dyn RunReporter>,
    retry_backoff: Duration,
}

impl RequestExecutor {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        gate: ConcurrencyGate,
        window: Arc<RateWindow>,
        reporter: Arc<dyn RunReporter>,
        retry_backoff: Duration,
    ) -> Self {
        RequestExecutor {
            client,
            gate,
            window,
            reporter,
            retry_backoff,
        }
    }

    /// Executes request `id` belonging to batch `batch`.
    ///
    /// Never fails: upstream errors are caught and classified. The only
    /// unbounded wait is rate window admission.
    pub async fn execute(&self, id: RequestId, batch: usize) -> RequestOutcome {
        let _permit = match self.gate.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Concurrency gate closed, request {} not sent", id);
                return RequestOutcome {
                    id,
                    batch,
                    kind: OutcomeKind::OtherFailure,
                    message: "Concurrency gate closed".to_string(),
                    latency: Duration::ZERO,
                    attempts: 0,
                };
            }
        };
        debug!(
            "Request {} holds a permit ({} free)",
            id,
            self.gate.available()
        );

        self.window.acquire_slot().await;
        debug!("Request {} admitted by rate window", id);

        let prompt = request_prompt(id);
        let prompt = prompt.as_str();
        let client = self.client.as_ref();
        let reporter = self.reporter.as_ref();
        let backoff = self.retry_backoff;
        let attempts = AtomicU32::new(0);
        let attempts_ref = &attempts;

        let action = move || {
            attempts_ref.fetch_add(1, Ordering::SeqCst);
            async move {
                let started = Instant::now();
                match client.complete(prompt).await {
                    Ok(text) => Ok((text, started.elapsed())),
                    Err(e) => Err(AttemptFailure {
                        message: e.to_string(),
                        latency: started.elapsed(),
                    }),
                }
            }
        };

        // Only the first failure may trigger the retry
        let condition = move |failure: &AttemptFailure| {
            let retry = attempts_ref.load(Ordering::SeqCst) == 1
                && is_rate_limit_signal(&failure.message);
            if retry {
                warn!(
                    "Request {} rate limited ({}), retrying in {:?}",
                    id, failure.message, backoff
                );
                reporter.request_retrying(id, backoff);
            }
            retry
        };

        let result = RetryIf::spawn(get_retry_strategy(backoff), action, condition).await;
        let attempts = attempts.load(Ordering::SeqCst);

        match result {
            Ok((text, latency)) => {
                debug!("Request {} answered: {}", id, text.trim());
                let kind = if attempts > 1 {
                    OutcomeKind::SuccessOnRetry
                } else {
                    OutcomeKind::Success
                };
                RequestOutcome {
                    id,
                    batch,
                    kind,
                    message: kind.as_str().to_string(),
                    latency,
                    attempts,
                }
            }
            Err(failure) => {
                let kind = classify_failure(&failure.message);
                warn!(
                    "Request {} failed after {} attempt(s): {}",
                    id, attempts, failure.message
                );
                RequestOutcome {
                    id,
                    batch,
                    kind,
                    message: failure_display_message(kind, &failure.message),
                    latency: failure.latency,
                    attempts,
                }
            }
        }
    }
}
