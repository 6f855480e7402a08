//! `HostProbe` backed by the `sysinfo` crate.
//!
//! Enumeration of memory and disks touches procfs/sysfs, so it runs on the
//! blocking pool. CPU usage needs two refreshes separated by a sample
//! window; the wait happens on the async timer instead of a blocked thread.

use std::time::Duration;

use async_trait::async_trait;
use sysinfo::{Disks, System, MINIMUM_CPU_UPDATE_INTERVAL};

use osinfo_core::error::{OsInfoError, Result};

use super::{percent, DiskUsage, HostInfo, HostProbe, MemoryStats};

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProbe;

impl SysinfoProbe {
    pub fn new() -> Self {
        Self
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| OsInfoError::Internal(format!("probe task failed: {e}")))?
}

#[async_trait]
impl HostProbe for SysinfoProbe {
    async fn info(&self) -> Result<HostInfo> {
        blocking(|| {
            Ok(HostInfo {
                hostname: System::host_name().unwrap_or_default(),
                uptime: System::uptime(),
                platform: System::distribution_id(),
                platform_family: System::name().unwrap_or_default(),
                platform_version: System::os_version().unwrap_or_default(),
                kernel_version: System::kernel_version().unwrap_or_default(),
                architecture: std::env::consts::ARCH.to_string(),
            })
        })
        .await
    }

    async fn uptime(&self) -> Result<u64> {
        let secs = System::uptime();
        if secs == 0 {
            return Err(OsInfoError::Probe("host uptime unavailable".into()));
        }
        Ok(secs)
    }

    async fn memory(&self) -> Result<MemoryStats> {
        blocking(|| {
            let mut sys = System::new();
            sys.refresh_memory();

            let total = sys.total_memory();
            if total == 0 {
                return Err(OsInfoError::Probe("memory statistics unavailable".into()));
            }
            let used = sys.used_memory();
            Ok(MemoryStats {
                total,
                available: sys.available_memory(),
                used,
                used_percent: percent(used, total),
            })
        })
        .await
    }

    async fn cpu_percent(&self, sample: Duration) -> Result<Vec<f64>> {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        tokio::time::sleep(sample.max(MINIMUM_CPU_UPDATE_INTERVAL)).await;
        sys.refresh_cpu_usage();

        if sys.cpus().is_empty() {
            return Err(OsInfoError::Probe("cpu statistics unavailable".into()));
        }
        Ok(vec![f64::from(sys.global_cpu_usage())])
    }

    async fn disks(&self) -> Result<Vec<DiskUsage>> {
        blocking(|| {
            let disks = Disks::new_with_refreshed_list();
            let out = disks
                .list()
                .iter()
                .filter(|d| d.total_space() > 0)
                .map(|d| {
                    let total = d.total_space();
                    let free = d.available_space();
                    let used = total.saturating_sub(free);
                    DiskUsage {
                        device: d.name().to_string_lossy().into_owned(),
                        mountpoint: d.mount_point().display().to_string(),
                        fstype: d.file_system().to_string_lossy().into_owned(),
                        total,
                        free,
                        used,
                        used_percent: percent(used, total),
                    }
                })
                .collect();
            Ok(out)
        })
        .await
    }
}
