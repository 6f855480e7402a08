//! Request observation hook.
//!
//! The timer is started before the downstream step runs and consumed when it
//! returns, so one request yields at most one observation. A downstream
//! future that is dropped before completion records nothing.

use std::future::Future;
use std::time::Instant;

use super::aggregator::{Aggregator, Observation};

/// Wall-clock stopwatch for one request.
#[derive(Debug)]
pub struct RequestTimer {
    started: Instant,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self { started: Instant::now() }
    }

    /// Stop the timer and build the observation for `status`.
    pub fn finish(self, status: u16) -> Observation {
        Observation::new(status, Instant::now().saturating_duration_since(self.started))
    }
}

/// Time `downstream` end to end and record its final status exactly once.
///
/// `status_of` maps the downstream output to the status code it carries
/// (for HTTP, the response status after any error or panic mapping). The
/// output is returned unchanged.
pub async fn observe<Fut, T, S>(aggregator: &Aggregator, downstream: Fut, status_of: S) -> T
where
    Fut: Future<Output = T>,
    S: FnOnce(&T) -> u16,
{
    let timer = RequestTimer::start();
    let out = downstream.await;
    let obs = timer.finish(status_of(&out));
    aggregator.record_observation(obs);
    tracing::debug!(status = obs.status, elapsed_ms = obs.elapsed_ms, "request observed");
    out
}
