//! Request-scoped Prometheus registries.
//!
//! `registry` turns an ordered list of series into a fresh `prometheus`
//! registry; `translate` derives that list from a decoded miner document.
//! Nothing here is global: every scrape builds and drops its own registry.

pub mod registry;
pub mod translate;

pub use registry::{Labels, RegistryBuilder, SeriesKind, SeriesRecord, SeriesValue};
pub use translate::{build_registry, BuildOptions, NAMESPACE};
