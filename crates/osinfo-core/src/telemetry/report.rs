//! Report payloads for the metrics routes.
//!
//! Pure formatting over a [`Snapshot`]: no state, safe to build at any rate.
//! Status codes become string keys when serialized to JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregator::{Aggregator, Snapshot};

/// Body of the request statistics route.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub total_requests: u64,
    pub total_response_time_ms: u64,
    pub avg_response_time_ms: f64,
    pub status_codes: BTreeMap<u16, u64>,
    pub server_start_time: DateTime<Utc>,
    pub server_uptime_seconds: f64,
}

impl From<&Snapshot> for MetricsReport {
    fn from(s: &Snapshot) -> Self {
        Self {
            total_requests: s.total_requests,
            total_response_time_ms: s.total_elapsed_ms,
            avg_response_time_ms: s.average_ms,
            status_codes: s.status_codes.clone(),
            server_start_time: s.started_at,
            server_uptime_seconds: s.uptime_secs(),
        }
    }
}

/// Body of the server uptime route.
#[derive(Debug, Clone, Serialize)]
pub struct ServerUptimeReport {
    pub server_uptime_seconds: f64,
    pub server_start_time: DateTime<Utc>,
}

impl From<&Snapshot> for ServerUptimeReport {
    fn from(s: &Snapshot) -> Self {
        Self {
            server_uptime_seconds: s.uptime_secs(),
            server_start_time: s.started_at,
        }
    }
}

impl From<&Aggregator> for ServerUptimeReport {
    fn from(agg: &Aggregator) -> Self {
        Self {
            server_uptime_seconds: agg.uptime().as_secs_f64(),
            server_start_time: agg.started_at(),
        }
    }
}
