//! Minimum-interval throttle for upstream calls, keyed by operation name.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

/// Enforces a minimum interval between successive calls to the same named
/// operation. Calls are delayed, never rejected. Different names are
/// independent; two endpoints using the same name share one slot.
///
/// The interval is measured from the moment the previous call *finished*.
/// Concurrent callers on one name are serialized: each reserves its start
/// instant under the lock, so no two callers can observe the same stale
/// timestamp and both skip the wait.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_called: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `calls_per_second` calls per operation.
    /// A rate that is zero, negative or not finite disables throttling.
    pub fn new(calls_per_second: f64) -> Self {
        let min_interval = if calls_per_second.is_finite() && calls_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / calls_per_second)
        } else {
            warn!("Invalid rate of {calls_per_second} calls/s, throttling disabled");
            Duration::ZERO
        };
        Self::with_min_interval(min_interval)
    }

    /// Creates a limiter with an explicit minimum interval between calls
    pub fn with_min_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_called: Mutex::new(HashMap::new()),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Runs `operation` once the interval for `key` has elapsed, then records
    /// its completion time as the new "last called" instant for `key`.
    pub async fn throttle<F, T>(&self, key: &str, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        let start_at = self.reserve(key);
        let now = Instant::now();
        if start_at > now {
            debug!(
                "Rate limiting '{key}': waiting {:?} before calling upstream",
                start_at - now
            );
            tokio::time::sleep_until(start_at).await;
        }

        let result = operation.await;
        self.record(key, Instant::now());
        result
    }

    /// Instant the last call for `key` finished, or the start reserved by a
    /// call that is still waiting or in flight
    pub fn last_called(&self, key: &str) -> Option<Instant> {
        self.slots().get(key).copied()
    }

    fn reserve(&self, key: &str) -> Instant {
        let mut slots = self.slots();
        let now = Instant::now();
        let start_at = match slots.get(key) {
            Some(last) => (*last + self.min_interval).max(now),
            None => now,
        };
        slots.insert(key.to_string(), start_at);
        start_at
    }

    fn record(&self, key: &str, finished_at: Instant) {
        let mut slots = self.slots();
        let last = slots.entry(key.to_string()).or_insert(finished_at);
        if finished_at > *last {
            *last = finished_at;
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        // The map holds plain timestamps, so a poisoned lock is still usable
        self.last_called
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
