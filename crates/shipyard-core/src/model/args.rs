//! Constructor and setter arguments
//!
//! `ArgSpec` is what a plan declares; `ArgValue` is the concrete value sent to
//! the chain and written to the ledger.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::model::address::Address;

/// Largest integer a JSON reader backed by IEEE doubles holds exactly
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Concrete argument value
///
/// Floating point numbers are not representable. `Int` only ever holds
/// integers within `±MAX_SAFE_INTEGER`; anything wider is carried as a
/// decimal string in `Text`. Build integers through `From` or
/// [`ArgValue::integer`] to keep that form canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Canonical form of an integer: `Int` when JSON-safe, else a decimal string
    pub fn integer(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(v) if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&v) => ArgValue::Int(v),
            _ => ArgValue::Text(value.to_string()),
        }
    }

    /// Decimal-string form of a 256-bit integer
    pub fn decimal(value: U256) -> Self {
        ArgValue::Text(value.to_string())
    }

    pub fn address(address: &Address) -> Self {
        ArgValue::Text(address.as_str().to_string())
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Text(s) => write!(f, "{:?}", s),
            ArgValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArgValue::Bool(b) => serializer.serialize_bool(*b),
            ArgValue::Int(i) if i.unsigned_abs() <= MAX_SAFE_INTEGER.unsigned_abs() => {
                serializer.serialize_i64(*i)
            }
            ArgValue::Int(i) => serializer.serialize_str(&i.to_string()),
            ArgValue::Text(s) => serializer.serialize_str(s),
            ArgValue::List(items) => items.serialize(serializer),
        }
    }
}

/// Wire shape accepted on input, before integers are canonicalized
#[derive(Deserialize)]
#[serde(untagged)]
enum RawArgValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    List(Vec<ArgValue>),
}

impl<'de> Deserialize<'de> for ArgValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawArgValue::deserialize(deserializer)? {
            RawArgValue::Bool(b) => ArgValue::Bool(b),
            RawArgValue::Int(i) => ArgValue::from(i),
            RawArgValue::Uint(u) => ArgValue::from(u),
            RawArgValue::Text(s) => ArgValue::Text(s),
            RawArgValue::List(items) => ArgValue::List(items),
        })
    }
}

/// Symbolic `<Unit>.address` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitRef {
    unit: String,
}

impl UnitRef {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl TryFrom<String> for UnitRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.split_once('.') {
            Some((unit, "address")) if !unit.trim().is_empty() => Ok(Self::new(unit.trim())),
            Some((_, field)) if field != "address" => Err(format!(
                "reference '{}' selects unsupported field '{}'; only '.address' is available",
                value, field
            )),
            _ => Err(format!(
                "reference '{}' must have the form <Unit>.address",
                value
            )),
        }
    }
}

impl From<UnitRef> for String {
    fn from(value: UnitRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.address", self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployerField {
    Address,
}

/// Declared argument, resolved to an `ArgValue` right before the call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgSpec {
    /// Address of another unit
    Ref {
        #[serde(rename = "ref")]
        reference: UnitRef,
    },
    /// Address of the signing account
    Deployer { deployer: DeployerField },
    /// Ether amount in decimal notation, sent as wei
    Ether { ether: String },
    Literal(ArgValue),
}

impl ArgSpec {
    pub fn unit_ref(unit: impl Into<String>) -> Self {
        ArgSpec::Ref {
            reference: UnitRef::new(unit),
        }
    }

    pub fn literal(value: impl Into<ArgValue>) -> Self {
        ArgSpec::Literal(value.into())
    }

    /// Unit this argument depends on, if any
    pub fn dependency(&self) -> Option<&str> {
        match self {
            ArgSpec::Ref { reference } => Some(reference.unit()),
            _ => None,
        }
    }
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgSpec::Ref { reference } => write!(f, "{}", reference),
            ArgSpec::Deployer { .. } => f.write_str("deployer.address"),
            ArgSpec::Ether { ether } => write!(f, "{} ether", ether),
            ArgSpec::Literal(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::integer(i128::from(value))
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        ArgValue::integer(i128::from(value))
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}
