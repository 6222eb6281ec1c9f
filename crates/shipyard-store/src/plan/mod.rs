//! Deploy plan loading
//!
//! The plan is the descriptor set: units in deployment order plus the
//! post-deploy wiring steps. The document model lives in
//! `shipyard_core::model::plan`; this module reads and validates it.

pub mod parser;

pub use parser::{parse_plan_file, parse_plan_str, validate_plan};
