//! Inbound HTTP handlers.
//!
//! `/metrics?target=<addr>` runs one scrape:
//! resolve target -> fetch -> decode -> build registry -> encode.
//! The first failing stage ends the request with a plain-text error; a failed
//! scrape never emits partial metrics. Every other path serves the banner.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, Registry, TextEncoder};

use lolminer_core::{
    decode_document,
    error::{ErrorClass, ExporterError, Result},
};

use crate::app_state::AppState;
use crate::error::ScrapeFailure;
use crate::obs::build_registry;
use crate::transport::target::ScrapeTarget;

/// `GET /metrics?target=...`
///
/// Query pairs are taken raw so repeated or unknown keys never reject the
/// request; the first `target` wins.
pub async fn scrape(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let raw_target = params
        .into_iter()
        .find(|(k, _)| k == "target")
        .map(|(_, v)| v)
        .unwrap_or_default();

    tracing::debug!(target_addr = %raw_target, "scrape request");

    match run_scrape(&state, &raw_target).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            log_failure(&raw_target, &e);
            ScrapeFailure(e).into_response()
        }
    }
}

/// Run the scrape pipeline for one raw target and return the encoded exposition.
pub async fn run_scrape(state: &AppState, raw_target: &str) -> Result<Vec<u8>> {
    let target = ScrapeTarget::resolve(raw_target)?;

    let raw = state.fetcher().fetch(&target).await?;
    tracing::debug!(target_url = %target, bytes = raw.len(), "scraped target");

    let doc = decode_document(&raw)?;
    let registry = build_registry(&doc, &state.build_options())?;
    encode(&registry)
}

fn encode(registry: &Registry) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buf)
        .map_err(|e| ExporterError::Encode(e.to_string()))?;
    Ok(buf)
}

fn log_failure(raw_target: &str, e: &ExporterError) {
    let class = e.class().as_str();
    match e.class() {
        ErrorClass::ClientInput => {
            tracing::debug!(target_addr = %raw_target, class, error = %e, "scrape rejected")
        }
        ErrorClass::Upstream => {
            tracing::warn!(target_addr = %raw_target, class, error = %e, "scrape failed")
        }
        ErrorClass::Internal => {
            tracing::error!(target_addr = %raw_target, class, error = %e, "scrape failed")
        }
    }
}

/// Any path other than `/metrics`.
pub async fn banner() -> String {
    format!(
        "{} version {}.\n\nUsage: /metrics?target=<target>.\n",
        crate::APP_NAME,
        crate::APP_VERSION
    )
}
