//! Command orchestration layer.
//!
//! One module per pipeline stage; `engine_command` dispatches to them.

pub mod check;
pub mod deploy;
pub mod engine_command;
pub mod verify;
pub mod wire;
