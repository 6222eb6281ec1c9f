use serde::{Deserialize, Serialize};

use crate::model::address::Address;
use crate::model::args::ArgValue;

/// Confirmed deployment of one unit, as stored in the ledger
///
/// Only created after the chain confirmed the deployment; `args` holds the
/// constructor arguments exactly as they were sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub address: Address,
    #[serde(default)]
    pub args: Vec<ArgValue>,
}

impl DeploymentRecord {
    pub fn new(address: Address, args: Vec<ArgValue>) -> Self {
        Self { address, args }
    }
}
