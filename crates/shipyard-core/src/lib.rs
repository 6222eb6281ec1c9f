//! Shipyard Core - deployment orchestration kernel
//!
//! This crate holds the parts of Shipyard with real invariants and no I/O:
//! - Domain model (units, arguments, deployment records, ledger, wiring, plan)
//! - Ledger merge
//! - Resolve-or-fail argument resolution
//! - Deployment sequencer and post-deploy wiring engine
//! - Error and logging facilities shared by every other crate
//!
//! Talking to a chain is delegated to a [`ChainClient`] implementation.

pub mod chain;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod resolve;
pub mod sequencer;
pub mod wiring;

pub use shipyard_core_types::schema;

// Re-export commonly used types
pub use chain::{ChainClient, ChainError};
pub use errors::{ExError, ExErrorKind, Result, ShipyardError, Stage};
pub use model::{
    merge, Address, ArgSpec, ArgValue, DeployPlan, DeploymentRecord, Ledger, UnitDescriptor,
    WiringInstruction,
};
pub use sequencer::{check_sequence, sequence, DeployEvent, SequenceOptions, SequenceReport};
pub use wiring::{wire, WiringEvent, WiringReport};
