//! Shared application state for the exporter.
//!
//! Everything here is immutable after startup: the validated config and the
//! upstream fetcher. Scrapes share no mutable state.

use std::sync::Arc;

use lolminer_core::error::Result;

use crate::config::ExporterConfig;
use crate::obs::BuildOptions;
use crate::transport::fetch::{Fetcher, HttpFetcher};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    fetcher: Arc<dyn Fetcher>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    build_options: BuildOptions,
}

impl AppState {
    /// Build application state with the reqwest-backed fetcher.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&cfg.upstream)?;
        Ok(Self::with_fetcher(cfg, Arc::new(fetcher)))
    }

    /// Build application state around an arbitrary fetcher.
    pub fn with_fetcher(cfg: ExporterConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let build_options = BuildOptions {
            naming: cfg.exporter.metric_naming,
            per_worker_share_metrics: cfg.exporter.per_worker_share_metrics,
        };

        Self {
            inner: Arc::new(AppStateInner { cfg, build_options }),
            fetcher,
        }
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn build_options(&self) -> BuildOptions {
        self.inner.build_options
    }

    pub fn fetcher(&self) -> Arc<dyn Fetcher> {
        Arc::clone(&self.fetcher)
    }
}
