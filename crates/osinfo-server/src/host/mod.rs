//! Host telemetry.
//!
//! `HostProbe` is the seam between the HTTP handlers and whatever reads host
//! facts. `SysinfoProbe` is the production implementation; tests plug in
//! fakes through `AppState::with_probe`.

pub mod handlers;
pub mod sysinfo_probe;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use osinfo_core::error::Result;

pub use sysinfo_probe::SysinfoProbe;

/// Static platform facts plus host uptime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub hostname: String,
    /// Host uptime in seconds.
    pub uptime: u64,
    pub platform: String,
    pub platform_family: String,
    pub platform_version: String,
    pub kernel_version: String,
    pub architecture: String,
}

/// Virtual memory totals in bytes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub used_percent: f64,
}

/// Usage of one mounted partition, in bytes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsage {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub total: u64,
    pub free: u64,
    pub used: u64,
    pub used_percent: f64,
}

#[async_trait]
pub trait HostProbe: Send + Sync {
    async fn info(&self) -> Result<HostInfo>;

    /// Host uptime in seconds.
    async fn uptime(&self) -> Result<u64>;

    async fn memory(&self) -> Result<MemoryStats>;

    /// Overall CPU utilisation sampled over `sample`, one entry per reported
    /// aggregate (a single element for the whole machine).
    async fn cpu_percent(&self, sample: Duration) -> Result<Vec<f64>>;

    /// Mounted partitions whose usage could be read.
    async fn disks(&self) -> Result<Vec<DiskUsage>>;
}

/// `part / whole * 100`, or `0.0` for an empty whole.
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_of_zero_is_zero() {
        assert_eq!(percent(5, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
