//! Boundary to the chain
//!
//! Every call is a blocking submit-and-confirm operation: a method returns
//! only once the transaction is confirmed, or with an error if it was not.
//! Timeouts, signing and network selection belong to the implementation.

use thiserror::Error;

use crate::model::{Address, ArgValue};

/// Failure reported by a `ChainClient`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ChainError {
    pub message: String,
}

impl ChainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait ChainClient {
    /// Address of the signing account
    fn deployer(&mut self) -> Result<Address, ChainError>;

    /// Deploy `artifact` with the given constructor arguments and return the
    /// confirmed address
    fn deploy(&mut self, artifact: &str, args: &[ArgValue]) -> Result<Address, ChainError>;

    /// Call a state-changing method on a deployed unit and wait for confirmation
    fn call(&mut self, target: &Address, method: &str, args: &[ArgValue])
        -> Result<(), ChainError>;
}
