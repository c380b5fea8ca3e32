//! lolMiner exporter library entry.
//!
//! This crate wires target resolution, the upstream fetcher, and the
//! registry builder into a per-request scrape handler. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod router;
pub mod transport;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
