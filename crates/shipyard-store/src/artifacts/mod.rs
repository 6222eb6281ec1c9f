//! Build artifact selection
//!
//! A build-info directory holds one snapshot per past compilation. Every
//! call rescans it and picks the most recently modified file; nothing is
//! cached between calls.

pub mod selector;
pub mod snapshot;

pub use selector::{extract_unit, latest_snapshot, list_units, ExtractedUnit};
pub use snapshot::BuildSnapshot;
