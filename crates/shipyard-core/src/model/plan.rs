use serde::{Deserialize, Serialize};

use crate::model::unit::UnitDescriptor;
use crate::model::wiring::WiringInstruction;

/// Current plan schema version
pub const PLAN_SCHEMA_VERSION: u32 = 0;

/// Unit descriptor set plus the wiring steps to run after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPlan {
    pub schema_version: u32,

    /// Units in deployment order
    pub units: Vec<UnitDescriptor>,

    #[serde(default)]
    pub wiring: Vec<WiringInstruction>,
}

impl DeployPlan {
    pub fn new(units: Vec<UnitDescriptor>) -> Self {
        Self {
            schema_version: PLAN_SCHEMA_VERSION,
            units,
            wiring: Vec::new(),
        }
    }

    pub fn with_wiring(mut self, wiring: Vec<WiringInstruction>) -> Self {
        self.wiring = wiring;
        self
    }

    pub fn unit(&self, name: &str) -> Option<&UnitDescriptor> {
        self.units.iter().find(|u| u.name == name)
    }
}
