//! Axum router wiring.
//!
//! `/metrics` runs a scrape (any method); every other path serves the banner.

use axum::{routing::any, Router};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", any(transport::http::scrape))
        .fallback(transport::http::banner)
        .with_state(state)
}
