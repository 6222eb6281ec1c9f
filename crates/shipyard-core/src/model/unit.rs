use serde::{Deserialize, Serialize};

use crate::model::args::ArgSpec;

/// Declarative description of one deployable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    /// Logical name, also the ledger key
    pub name: String,

    /// Build artifact to deploy; defaults to the unit name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,

    /// Ordered constructor arguments
    #[serde(default)]
    pub args: Vec<ArgSpec>,
}

impl UnitDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artifact: None,
            args: Vec::new(),
        }
    }

    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    pub fn artifact(&self) -> &str {
        self.artifact.as_deref().unwrap_or(&self.name)
    }

    /// Units referenced by this descriptor's constructor arguments
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.args.iter().filter_map(ArgSpec::dependency)
    }
}
