//! Request telemetry.
//!
//! - `aggregator`: shared counters behind one mutex, consistent snapshots
//! - `hook`: per-request timer and the `observe` timing decorator
//! - `report`: serializable payloads built from a snapshot

pub mod aggregator;
pub mod hook;
pub mod report;

pub use aggregator::{Aggregator, Observation, Snapshot};
pub use hook::{observe, RequestTimer};
pub use report::{MetricsReport, ServerUptimeReport};
