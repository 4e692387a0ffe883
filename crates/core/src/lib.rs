//! wafermap-core
//!
//! Core library for turning per-die test records into wafer maps and yield
//! statistics.
//!
//! This crate covers the whole pipeline short of the command line: parsing
//! pipe-delimited part-result records, aggregating them into a sparse
//! coordinate grid with bounding-box and counter tracking, computing yield,
//! rendering the grid as raster or character maps, and converting raw
//! instrumentation dumps into the intermediate CSV.
//!
//! All substantive logic lives here so it is fully testable and reusable
//! from multiple frontends.

pub mod convert;
pub mod grid;
pub mod layout;
pub mod record;
pub mod render;
pub mod report;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
