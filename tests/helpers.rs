// Shared test helpers: a scriptable in-process chat client and a reporter that
// records scheduler events.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use roadmap_agent::scheduler::Batch;
use roadmap_agent::{CompletionClient, RequestId, RequestOutcome, RunReporter, UpstreamError};

/// One upstream call as observed by `FakeClient`.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub id: usize,
    pub started: Instant,
    pub finished: Instant,
}

/// Chat client double.
///
/// Every call sleeps for `latency` (virtual time under a paused clock) and
/// succeeds unless a failure was scripted for that request id. Tracks calls
/// and the peak number of calls in flight.
pub struct FakeClient {
    latency: Duration,
    failures: Mutex<HashMap<usize, VecDeque<(u16, String)>>>,
    panics: HashSet<usize>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<CallRecord>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl FakeClient {
    pub fn new(latency: Duration) -> Self {
        FakeClient {
            latency,
            failures: Mutex::new(HashMap::new()),
            panics: HashSet::new(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next calls for request `id` fail with these HTTP statuses and
    /// bodies, in order.
    pub fn fail(self, id: usize, responses: &[(u16, &str)]) -> Self {
        self.failures.lock().unwrap().insert(
            id,
            responses
                .iter()
                .map(|(status, body)| (*status, body.to_string()))
                .collect(),
        );
        self
    }

    /// Makes every call for request `id` panic.
    pub fn panic_on(mut self, id: usize) -> Self {
        self.panics.insert(id);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    /// Start times of every call, sorted.
    pub fn start_times(&self) -> Vec<Instant> {
        let mut starts: Vec<_> = self.calls().iter().map(|c| c.started).collect();
        starts.sort();
        starts
    }
}

/// Extracts the request id from the load test prompt "Say 'Test {id} OK' ...".
pub fn request_id_from_prompt(prompt: &str) -> usize {
    prompt
        .split_whitespace()
        .nth(2)
        .and_then(|token| token.parse().ok())
        .expect("prompt should carry a request id")
}

#[async_trait]
impl CompletionClient for FakeClient {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let id = request_id_from_prompt(prompt);
        let started = Instant::now();
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        tokio::time::sleep(self.latency).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(CallRecord {
            id,
            started,
            finished: Instant::now(),
        });

        if self.panics.contains(&id) {
            panic!("fake client exploded on request {}", id);
        }

        let failure = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&id)
            .and_then(VecDeque::pop_front);
        match failure {
            Some((status, body)) => Err(UpstreamError::Status { status, body }),
            None => Ok(format!("Test {} OK", id)),
        }
    }
}

/// Reporter that records what the scheduler told it.
#[derive(Default)]
pub struct RecordingReporter {
    pub batches: Mutex<Vec<(usize, usize)>>,
    pub retries: Mutex<Vec<RequestId>>,
    pub finished: Mutex<Vec<RequestId>>,
    pub waits: Mutex<Vec<Duration>>,
}

impl RunReporter for RecordingReporter {
    fn batch_started(&self, batch: &Batch, total_batches: usize) {
        self.batches
            .lock()
            .unwrap()
            .push((batch.index, total_batches));
    }

    fn request_retrying(&self, id: RequestId, _backoff: Duration) {
        self.retries.lock().unwrap().push(id);
    }

    fn request_finished(&self, outcome: &RequestOutcome) {
        self.finished.lock().unwrap().push(outcome.id);
    }

    fn batch_waiting(&self, delay: Duration) {
        self.waits.lock().unwrap().push(delay);
    }
}
