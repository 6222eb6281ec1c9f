//! Shipyard Engine - Orchestration layer
//!
//! Coordinates the pure sequencing and wiring logic in `shipyard-core` with
//! the ledger, plan and artifact stores in `shipyard-store`.

pub mod commands;

pub use commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult, VerifySources, Workspace,
};
