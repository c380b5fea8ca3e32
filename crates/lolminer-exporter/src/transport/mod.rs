//! Transport layer (inbound HTTP, outbound scrape).
//!
//! Exposes the `/metrics` handler, the target resolver, and the upstream
//! fetcher it drives.

pub mod fetch;
pub mod http;
pub mod target;
