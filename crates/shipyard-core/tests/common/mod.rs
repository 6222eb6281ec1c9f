use shipyard_core::{Address, ArgValue, ChainClient, ChainError};

/// Build a valid address from a small number (all-digit hex, so the
/// checksummed form equals the input)
#[allow(dead_code)]
pub fn addr(n: u64) -> Address {
    Address::parse(&format!("0x{:040}", n)).unwrap()
}

/// A call observed by the scripted chain
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    Deploy {
        artifact: String,
        args: Vec<ArgValue>,
    },
    Setter {
        target: Address,
        method: String,
        args: Vec<ArgValue>,
    },
}

/// In-memory chain that hands out sequential addresses and can be told to
/// fail a specific artifact or method
#[allow(dead_code)]
pub struct ScriptedChain {
    next: u64,
    pub calls: Vec<Call>,
    pub fail_artifact: Option<String>,
    pub fail_method: Option<String>,
    pub deployer_lookups: usize,
}

#[allow(dead_code)]
impl ScriptedChain {
    pub fn new() -> Self {
        Self {
            next: 100,
            calls: Vec::new(),
            fail_artifact: None,
            fail_method: None,
            deployer_lookups: 0,
        }
    }

    pub fn failing_artifact(mut self, artifact: &str) -> Self {
        self.fail_artifact = Some(artifact.to_string());
        self
    }

    pub fn failing_method(mut self, method: &str) -> Self {
        self.fail_method = Some(method.to_string());
        self
    }

    pub fn deployed_artifacts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Deploy { artifact, .. } => Some(artifact.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn setter_methods(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Setter { method, .. } => Some(method.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ChainClient for ScriptedChain {
    fn deployer(&mut self) -> Result<Address, ChainError> {
        self.deployer_lookups += 1;
        Ok(addr(1))
    }

    fn deploy(&mut self, artifact: &str, args: &[ArgValue]) -> Result<Address, ChainError> {
        if self.fail_artifact.as_deref() == Some(artifact) {
            return Err(ChainError::new("execution reverted"));
        }
        self.calls.push(Call::Deploy {
            artifact: artifact.to_string(),
            args: args.to_vec(),
        });
        self.next += 1;
        Ok(addr(self.next))
    }

    fn call(&mut self, target: &Address, method: &str, args: &[ArgValue]) -> Result<(), ChainError> {
        if self.fail_method.as_deref() == Some(method) {
            return Err(ChainError::new("execution reverted"));
        }
        self.calls.push(Call::Setter {
            target: target.clone(),
            method: method.to_string(),
            args: args.to_vec(),
        });
        Ok(())
    }
}
