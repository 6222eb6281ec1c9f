//! Resolve-or-fail pass from declared arguments to concrete values
//!
//! A reference that has no known address is always an error. Nothing is
//! defaulted, so a deploy call is never issued with a placeholder.

use alloy_primitives::utils::parse_ether;
use alloy_primitives::U256;

use crate::errors::{ExError, Result, ShipyardError, Stage};
use crate::model::{Address, ArgSpec, ArgValue, Ledger};

/// Lookup of unit addresses
pub trait AddressBook {
    fn address_of(&self, unit: &str) -> Option<&Address>;
}

impl AddressBook for Ledger {
    fn address_of(&self, unit: &str) -> Option<&Address> {
        Ledger::address_of(self, unit)
    }
}

/// Records produced in the current run, backed by the preloaded ledger
///
/// Current-run records shadow ledger records of the same unit.
pub struct LayeredBook<'a> {
    pub current: &'a Ledger,
    pub base: &'a Ledger,
}

impl AddressBook for LayeredBook<'_> {
    fn address_of(&self, unit: &str) -> Option<&Address> {
        self.current
            .address_of(unit)
            .or_else(|| self.base.address_of(unit))
    }
}

/// Who is asking, for error context
pub struct ResolveScope<'a> {
    /// Unit being deployed or wired
    pub owner: &'a str,
    pub stage: Stage,
    /// Signing account address, when already known
    pub deployer: Option<&'a Address>,
}

/// Resolve every argument spec or fail on the first unresolved one
pub fn resolve_args(
    specs: &[ArgSpec],
    book: &dyn AddressBook,
    scope: &ResolveScope<'_>,
) -> Result<Vec<ArgValue>> {
    specs
        .iter()
        .map(|spec| resolve_arg(spec, book, scope))
        .collect()
}

fn resolve_arg(spec: &ArgSpec, book: &dyn AddressBook, scope: &ResolveScope<'_>) -> Result<ArgValue> {
    match spec {
        ArgSpec::Literal(value) => Ok(value.clone()),
        ArgSpec::Ref { reference } => book
            .address_of(reference.unit())
            .map(ArgValue::address)
            .ok_or_else(|| unresolved(scope, &reference.to_string())),
        ArgSpec::Deployer { .. } => scope
            .deployer
            .map(ArgValue::address)
            .ok_or_else(|| unresolved(scope, "deployer.address")),
        ArgSpec::Ether { ether } => parse_ether_amount(ether).map(ArgValue::decimal),
    }
}

fn unresolved(scope: &ResolveScope<'_>, reference: &str) -> ExError {
    ExError::from(ShipyardError::UnresolvedDependency {
        unit: scope.owner.to_string(),
        reference: reference.to_string(),
    })
    .with_stage(scope.stage)
    .with_op("resolve_args")
}

/// Whether any spec needs the signing account's address
pub fn needs_deployer(specs: &[ArgSpec]) -> bool {
    specs.iter().any(|s| matches!(s, ArgSpec::Deployer { .. }))
}

/// Parse a decimal ether amount into wei
pub fn parse_ether_amount(amount: &str) -> Result<U256> {
    parse_ether(amount).map_err(|e| {
        ExError::from(ShipyardError::InvalidPlan {
            reason: format!("invalid ether amount '{}': {}", amount, e),
        })
        .with_op("parse_ether")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::model::DeploymentRecord;

    fn addr(digit: char) -> Address {
        Address::parse(&format!("0x{}", digit.to_string().repeat(40))).unwrap()
    }

    fn scope<'a>(deployer: Option<&'a Address>) -> ResolveScope<'a> {
        ResolveScope {
            owner: "Vault",
            stage: Stage::Sequence,
            deployer,
        }
    }

    #[test]
    fn test_current_run_shadows_base() {
        let mut base = Ledger::new();
        base.insert("Token", DeploymentRecord::new(addr('1'), vec![]));
        let mut current = Ledger::new();
        current.insert("Token", DeploymentRecord::new(addr('2'), vec![]));

        let book = LayeredBook {
            current: &current,
            base: &base,
        };
        let args = resolve_args(&[ArgSpec::unit_ref("Token")], &book, &scope(None)).unwrap();

        assert_eq!(args, vec![ArgValue::address(&addr('2'))]);
    }

    #[test]
    fn test_missing_reference_is_unresolved_dependency() {
        let err = resolve_args(&[ArgSpec::unit_ref("Token")], &Ledger::new(), &scope(None))
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::UnresolvedDependency);
        assert_eq!(err.unit(), Some("Vault"));
        assert_eq!(err.stage(), Some(Stage::Sequence));
    }

    #[test]
    fn test_deployer_requires_known_address() {
        let spec = [ArgSpec::Deployer {
            deployer: crate::model::DeployerField::Address,
        }];
        assert!(needs_deployer(&spec));

        let err = resolve_args(&spec, &Ledger::new(), &scope(None)).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnresolvedDependency);

        let me = addr('9');
        let args = resolve_args(&spec, &Ledger::new(), &scope(Some(&me))).unwrap();
        assert_eq!(args, vec![ArgValue::address(&me)]);
    }

    #[test]
    fn test_ether_is_converted_to_wei_string() {
        let spec = [ArgSpec::Ether {
            ether: "0.1".to_string(),
        }];
        let args = resolve_args(&spec, &Ledger::new(), &scope(None)).unwrap();
        assert_eq!(args, vec![ArgValue::Text("100000000000000000".to_string())]);
    }

    #[test]
    fn test_bad_ether_amount_is_invalid_plan() {
        let err = parse_ether_amount("lots").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidPlan);
    }
}
