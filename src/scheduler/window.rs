//! Rolling-window admission control.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::{RATE_POLL_INTERVAL, RATE_WINDOW};

/// Polling admission control over a trailing time window.
///
/// Keeps the start times of admitted requests and lets a new request begin only
/// while fewer than `quota` of them fall inside the trailing `window`. A caller
/// that finds the window full sleeps for `poll_interval` and checks again.
///
/// This is not a token bucket: it guarantees that no trailing window ever holds
/// more than `quota` admissions, but blocked callers are not served in FIFO
/// order and may wait up to one poll interval longer than strictly necessary.
pub struct RateWindow {
    timestamps: Mutex<VecDeque<Instant>>,
    quota: usize,
    window: Duration,
    poll_interval: Duration,
}

impl RateWindow {
    /// Creates a window admitting `requests_per_minute` requests per 60 seconds.
    pub fn new(requests_per_minute: usize) -> Self {
        Self::with_window(requests_per_minute, RATE_WINDOW, RATE_POLL_INTERVAL)
    }

    /// Creates a window with explicit length and poll interval.
    ///
    /// A zero quota would block forever and is raised to one.
    pub fn with_window(quota: usize, window: Duration, poll_interval: Duration) -> Self {
        let quota = quota.max(1);
        RateWindow {
            timestamps: Mutex::new(VecDeque::with_capacity(quota)),
            quota,
            window,
            poll_interval,
        }
    }

    /// Waits until the window has room, then records the admission.
    ///
    /// Never fails; it only delays. The lock is held for the purge-and-check
    /// step only and is released before sleeping.
    pub async fn acquire_slot(&self) {
        loop {
            if self.try_admit().await {
                return;
            }
            log::trace!(
                "Rate window full ({} in last {:?}), retrying in {:?}",
                self.quota,
                self.window,
                self.poll_interval
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn try_admit(&self) -> bool {
        let mut timestamps = self.timestamps.lock().await;
        let now = Instant::now();
        self.purge_expired(&mut timestamps, now);

        if timestamps.len() < self.quota {
            timestamps.push_back(now);
            true
        } else {
            false
        }
    }

    fn purge_expired(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(front) = timestamps.front() {
            if now.duration_since(*front) > self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Number of admissions inside the trailing window right now.
    pub async fn in_window(&self) -> usize {
        let mut timestamps = self.timestamps.lock().await;
        self.purge_expired(&mut timestamps, Instant::now());
        timestamps.len()
    }

    pub fn quota(&self) -> usize {
        self.quota
    }
}
