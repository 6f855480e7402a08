//! Shared application state for the osinfo server.
//!
//! This is the composition root: it owns the one request `Aggregator` for
//! the process and the host probe, and hands out cheap clones to handlers
//! and the observation middleware.

use std::sync::Arc;

use osinfo_core::error::Result;
use osinfo_core::telemetry::Aggregator;

use crate::config::ServerConfig;
use crate::host::{HostProbe, SysinfoProbe};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    aggregator: Arc<Aggregator>,
    probe: Arc<dyn HostProbe>,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    /// Build application state with the `sysinfo`-backed probe.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_probe(cfg, Arc::new(SysinfoProbe::new()))
    }

    pub fn with_probe(cfg: ServerConfig, probe: Arc<dyn HostProbe>) -> Result<Self> {
        cfg.validate()?;

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            aggregator: Arc::new(Aggregator::new()),
            probe,
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn aggregator(&self) -> Arc<Aggregator> {
        Arc::clone(&self.aggregator)
    }

    pub fn probe(&self) -> Arc<dyn HostProbe> {
        Arc::clone(&self.probe)
    }
}
