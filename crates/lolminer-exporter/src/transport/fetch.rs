//! Upstream fetch (one GET per scrape, no retry).
//!
//! `Fetcher` is the seam between the request handler and the network so the
//! pipeline can be driven by a canned body in tests.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method};

use lolminer_core::error::{ExporterError, Result};

use crate::config::UpstreamSection;
use crate::transport::target::ScrapeTarget;

/// Fetches the raw status document of a target.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, target: &ScrapeTarget) -> Result<Bytes>;
}

/// reqwest-backed fetcher. The client is pooled and shared by all requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    reject_error_status: bool,
}

impl HttpFetcher {
    pub fn new(cfg: &UpstreamSection) -> Result<Self> {
        let mut builder = Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(timeout) = cfg.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ExporterError::Config(format!("http client build failed: {e}")))?;

        Ok(Self {
            client,
            reject_error_status: cfg.reject_error_status,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, target: &ScrapeTarget) -> Result<Bytes> {
        let request = self
            .client
            .request(Method::GET, target.url().clone())
            .build()
            .map_err(|e| ExporterError::FetchRequest(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ExporterError::FetchTransport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if self.reject_error_status {
                return Err(ExporterError::UpstreamStatus(status.as_u16()));
            }
            tracing::debug!(target_url = %target, status = status.as_u16(), "upstream returned non-success status, decoding body anyway");
        }

        response
            .bytes()
            .await
            .map_err(|e| ExporterError::FetchBody(e.to_string()))
    }
}
