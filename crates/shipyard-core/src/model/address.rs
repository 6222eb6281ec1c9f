//! On-chain account address
//!
//! Accepts the same inputs as the usual EVM tooling: 40 hex digits with an
//! optional `0x` prefix. Single-case input is taken as-is; mixed-case input
//! must carry a valid EIP-55 checksum. Stored and displayed checksummed.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::errors::{ExError, ShipyardError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("expected 40 hex digits, found {0}")]
    Length(usize),
    #[error("contains non-hex characters")]
    NonHex,
    #[error("mixed-case address has an invalid checksum")]
    BadChecksum,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(input: &str) -> std::result::Result<Self, AddressError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        if digits.len() != 40 {
            return Err(AddressError::Length(digits.len()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::NonHex);
        }

        let raw = alloy_primitives::Address::from_str(digits).map_err(|_| AddressError::NonHex)?;
        let checksummed = raw.to_checksum(None);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && &checksummed[2..] != digits {
            return Err(AddressError::BadChecksum);
        }

        Ok(Self(checksummed))
    }

    /// Checksummed `0x`-prefixed form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parse an operator-supplied address, mapping failures to `InvalidAddress`
pub fn parse_address(input: &str) -> crate::errors::Result<Address> {
    Address::parse(input).map_err(|e| {
        ExError::from(ShipyardError::InvalidAddress {
            input: input.to_string(),
            reason: e.to_string(),
        })
    })
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
