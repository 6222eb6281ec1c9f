use shipyard_core::{Address, ArgValue, ChainClient, ChainError};
use shipyard_engine::{VerifySources, Workspace};
use shipyard_store::{BundleOptions, LedgerFile};
use std::path::Path;

/// Sequential addresses so tests can predict what a deploy returns
#[allow(dead_code)]
pub fn addr(n: u64) -> Address {
    Address::parse(&format!("{:040}", n)).unwrap()
}

#[allow(dead_code)]
pub fn workspace(root: &Path) -> Workspace {
    Workspace {
        ledger: LedgerFile::new(root.join("deployments.json")),
        verify: VerifySources {
            build_info_dir: root.join("artifacts").join("build-info"),
            bundle: BundleOptions {
                output_dir: root.join("output"),
                ..BundleOptions::default()
            },
        },
    }
}

/// In-memory chain; addresses start at `first_address` and count up
#[allow(dead_code)]
pub struct FakeChain {
    next: u64,
    pub deployed: Vec<(String, Vec<ArgValue>)>,
    pub setters: Vec<(Address, String, Vec<ArgValue>)>,
    pub fail_deploy_of: Option<String>,
    pub fail_call_to: Option<String>,
}

#[allow(dead_code)]
impl FakeChain {
    pub fn starting_at(first_address: u64) -> Self {
        Self {
            next: first_address,
            deployed: Vec::new(),
            setters: Vec::new(),
            fail_deploy_of: None,
            fail_call_to: None,
        }
    }

    pub fn deployed_artifacts(&self) -> Vec<&str> {
        self.deployed.iter().map(|(a, _)| a.as_str()).collect()
    }
}

impl ChainClient for FakeChain {
    fn deployer(&mut self) -> Result<Address, ChainError> {
        Ok(addr(9))
    }

    fn deploy(&mut self, artifact: &str, args: &[ArgValue]) -> Result<Address, ChainError> {
        if self.fail_deploy_of.as_deref() == Some(artifact) {
            return Err(ChainError::new("insufficient funds for gas"));
        }
        let address = addr(self.next);
        self.next += 1;
        self.deployed.push((artifact.to_string(), args.to_vec()));
        Ok(address)
    }

    fn call(&mut self, target: &Address, method: &str, args: &[ArgValue]) -> Result<(), ChainError> {
        if self.fail_call_to.as_deref() == Some(method) {
            return Err(ChainError::new("execution reverted: Ownable"));
        }
        self.setters
            .push((target.clone(), method.to_string(), args.to_vec()));
        Ok(())
    }
}
