use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use lolminer_core::error::{ExporterError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub upstream: UpstreamSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
            upstream: UpstreamSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.exporter.validate()?;
        self.upstream.validate()?;

        Ok(())
    }
}

/// How per-position series are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricNaming {
    /// One metric name per quantity, position carried in a label.
    #[default]
    Labeled,
    /// Position suffixed to the metric name (`lolminer_gpu_power_watts_0`).
    Indexed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub metric_naming: MetricNaming,

    /// Emit per-GPU share/performance series from the algorithm sequences.
    #[serde(default)]
    pub per_worker_share_metrics: bool,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            debug: false,
            metric_naming: MetricNaming::default(),
            per_worker_share_metrics: false,
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    /// Parse `listen`; a bare `:port` binds every interface.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let listen = match self.listen.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{port}"),
            None => self.listen.clone(),
        };
        listen.parse::<SocketAddr>().map_err(|e| {
            ExporterError::Config(format!(
                "exporter.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    /// No timeout when absent.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Turn non-2xx upstream responses into scrape failures.
    #[serde(default)]
    pub reject_error_status: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            reject_error_status: false,
            user_agent: default_user_agent(),
        }
    }
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(ms) = self.timeout_ms {
            if !(1..=600_000).contains(&ms) {
                return Err(ExporterError::Config(
                    "upstream.timeout_ms must be between 1 and 600000".into(),
                ));
            }
        }
        if self.user_agent.trim().is_empty() {
            return Err(ExporterError::Config(
                "upstream.user_agent must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::APP_VERSION)
}
