use serde::{Deserialize, Serialize};

use crate::model::args::ArgSpec;

/// One post-deploy setter call against an already deployed unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringInstruction {
    /// Unit whose setter is called
    pub target: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<ArgSpec>,
}

impl WiringInstruction {
    pub fn new(target: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            method: method.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }
}
