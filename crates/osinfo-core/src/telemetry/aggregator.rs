//! Request aggregator.
//!
//! All counters live behind a single `Mutex` so the three updates of one
//! observation (request count, elapsed sum, per-status count) are applied as
//! one critical section, and a snapshot copies them at one instant. Readers
//! and writers share the same lock; both hold it only for a few integer adds
//! or a small map clone and never across an `.await`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// One finished request: final status code and measured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub status: u16,
    pub elapsed_ms: u64,
}

impl Observation {
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    total_requests: u64,
    total_elapsed_ms: u64,
    status_codes: HashMap<u16, u64>,
}

/// Point-in-time copy of the aggregate counters plus derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_requests: u64,
    pub total_elapsed_ms: u64,
    /// `total_elapsed_ms / total_requests`, or `0.0` before the first request.
    pub average_ms: f64,
    pub status_codes: BTreeMap<u16, u64>,
    pub started_at: DateTime<Utc>,
    pub uptime: Duration,
}

impl Snapshot {
    pub fn uptime_secs(&self) -> f64 {
        self.uptime.as_secs_f64()
    }
}

/// Shared request counters for one serving process.
///
/// Constructed once by the composition root and handed out behind an `Arc`;
/// tests build as many independent instances as they need.
#[derive(Debug)]
pub struct Aggregator {
    counters: Mutex<Counters>,
    started: Instant,
    started_wall: DateTime<Utc>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(Counters::default()),
            started: Instant::now(),
            started_wall: Utc::now(),
        }
    }

    /// Nothing inside the critical section can unwind halfway through an
    /// update, so a poisoned lock still guards consistent counters.
    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record one finished request.
    pub fn record(&self, status: u16, elapsed_ms: u64) {
        let mut c = self.lock();
        c.total_requests = c.total_requests.saturating_add(1);
        c.total_elapsed_ms = c.total_elapsed_ms.saturating_add(elapsed_ms);
        let n = c.status_codes.entry(status).or_insert(0);
        *n = n.saturating_add(1);
    }

    pub fn record_observation(&self, obs: Observation) {
        self.record(obs.status, obs.elapsed_ms);
    }

    /// Consistent copy of all counters, with uptime measured now.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(Instant::now())
    }

    /// Same as [`snapshot`](Self::snapshot) against an explicit clock reading.
    /// A reading taken before construction yields zero uptime.
    pub fn snapshot_at(&self, now: Instant) -> Snapshot {
        let (total_requests, total_elapsed_ms, status_codes) = {
            let c = self.lock();
            let codes: BTreeMap<u16, u64> =
                c.status_codes.iter().map(|(k, v)| (*k, *v)).collect();
            (c.total_requests, c.total_elapsed_ms, codes)
        };

        let average_ms = if total_requests > 0 {
            total_elapsed_ms as f64 / total_requests as f64
        } else {
            0.0
        };

        Snapshot {
            total_requests,
            total_elapsed_ms,
            average_ms,
            status_codes,
            started_at: self.started_wall,
            uptime: now.saturating_duration_since(self.started),
        }
    }

    /// Wall-clock instant the aggregator was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_wall
    }

    /// Time since creation on the monotonic clock. Takes no lock.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}
