use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use osinfo_core::error::{OsInfoError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub features: FeatureFlags,

    #[serde(default)]
    pub dashboard: DashboardSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            features: FeatureFlags::default(),
            dashboard: DashboardSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OsInfoError::UnsupportedVersion);
        }

        self.server.validate()?;   // Verify the scope of value
        self.dashboard.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Route prefix every endpoint is mounted under.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Window over which CPU usage is sampled.
    #[serde(default = "default_cpu_sample_ms")]
    pub cpu_sample_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            prefix: default_prefix(),
            cpu_sample_ms: default_cpu_sample_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.prefix.starts_with('/') {
            return Err(OsInfoError::BadRequest(
                "server.prefix must start with '/'".into(),
            ));
        }
        if self.prefix.len() > 1 && self.prefix.ends_with('/') {
            return Err(OsInfoError::BadRequest(
                "server.prefix must not end with '/'".into(),
            ));
        }
        if self.prefix.len() > 1 {
            // every segment must be a literal route component
            let bad = self.prefix[1..].split('/').any(|seg| {
                seg.is_empty() || seg.contains(['*', ':', '{', '}'])
            });
            if bad {
                return Err(OsInfoError::BadRequest(format!(
                    "server.prefix has an empty or non-literal segment: {}",
                    self.prefix
                )));
            }
        }
        if !(200..=10000).contains(&self.cpu_sample_ms) {
            return Err(OsInfoError::BadRequest(
                "server.cpu_sample_ms must be between 200 and 10000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            OsInfoError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }

    pub fn cpu_sample(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_prefix() -> String {
    "/os".into()
}
fn default_cpu_sample_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureFlags {
    /// Expose the process environment listing.
    #[serde(default = "default_true")]
    pub env: bool,

    /// Expose the dashboard page and its static assets.
    #[serde(default = "default_true")]
    pub dashboard: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self { env: true, dashboard: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSection {
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self { title: default_title() }
    }
}

impl DashboardSection {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(OsInfoError::BadRequest("dashboard.title must not be empty".into()));
        }
        Ok(())
    }
}

fn default_title() -> String {
    "OS Metrics Dashboard".into()
}
