//! lolminer core: the upstream document schema and the shared error surface.
//!
//! This crate defines the JSON contract consumed from the miner and the error
//! type every stage of a scrape reports through. It intentionally carries no
//! transport or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed upstream payloads surface as `ExporterError::Decode` so the
//! exporter never crashes on a misbehaving miner.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod schema;

/// Shared result type.
pub use error::{ErrorClass, ExporterError, Result};
pub use schema::{decode_document, MetricDocument};
