//! Top-level facade crate for the lolMiner exporter.
//!
//! Re-exports the schema/error core and the exporter library so users can depend on a single crate.

pub mod core {
    pub use lolminer_core::*;
}

pub mod exporter {
    pub use lolminer_exporter::*;
}
