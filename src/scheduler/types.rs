//! Identifiers, batches and per-request outcomes.

use std::time::Duration;

use crate::error_handling::OutcomeKind;

/// Identifier of one logical request, unique within a run (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub usize);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contiguous run of request ids dispatched together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Zero-based position of the batch in the run
    pub index: usize,
    pub ids: Vec<RequestId>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Terminal result of one request, produced exactly once per `RequestId`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub id: RequestId,
    /// Index of the batch the request was dispatched in
    pub batch: usize,
    pub kind: OutcomeKind,
    /// Display message; failure text is truncated
    pub message: String,
    /// Duration of the attempt that decided the outcome
    pub latency: Duration,
    /// Upstream calls made (1, or 2 when retried)
    pub attempts: u32,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        self.kind.is_success()
    }

    pub fn latency_ms(&self) -> u128 {
        self.latency.as_millis()
    }
}
