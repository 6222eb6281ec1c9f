//! Domain model: units, arguments, deployment records, the ledger, wiring
//! instructions and the deploy plan that ties them together.

pub mod address;
pub mod args;
pub mod ledger;
pub mod plan;
pub mod record;
pub mod unit;
pub mod wiring;

pub use address::{parse_address, Address, AddressError};
pub use args::{ArgSpec, ArgValue, DeployerField, UnitRef};
pub use ledger::{merge, Ledger};
pub use plan::DeployPlan;
pub use record::DeploymentRecord;
pub use unit::UnitDescriptor;
pub use wiring::WiringInstruction;
