//! Chain client backed by an operator-supplied program
//!
//! Signing, network selection and confirmation waiting stay outside Shipyard.
//! The program is invoked once per operation:
//!
//! - `<cmd> deployer` prints the signing account's address
//! - `<cmd> deploy <artifact> <args-json>` prints the confirmed address as
//!   its last stdout line
//! - `<cmd> call <address> <method> <args-json>` returns once confirmed
//!
//! A non-zero exit status is a failed operation.

use shipyard_core::{Address, ArgValue, ChainClient, ChainError};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct CommandChain {
    program: String,
    base_args: Vec<String>,
}

impl CommandChain {
    /// Split `command_line` on whitespace into program and leading arguments
    pub fn from_command_line(command_line: &str) -> Result<Self, ChainError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ChainError::new("chain command is empty"))?;
        Ok(Self {
            program,
            base_args: parts.collect(),
        })
    }

    fn run(&self, args: &[&str]) -> Result<String, ChainError> {
        tracing::debug!(program = %self.program, op = args.first().copied(), "invoking chain command");
        let output = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .output()
            .map_err(|e| ChainError::new(format!("cannot run '{}': {}", self.program, e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!(target: "shipyard::chain", "{}", line);
        }

        if !output.status.success() {
            let detail = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no error output");
            return Err(ChainError::new(format!(
                "'{} {}' failed ({}): {}",
                self.program,
                args.first().copied().unwrap_or_default(),
                output.status,
                detail.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_for_address(&self, args: &[&str]) -> Result<Address, ChainError> {
        let stdout = self.run(args)?;
        let last = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| ChainError::new("chain command printed no address"))?;
        Address::parse(last)
            .map_err(|e| ChainError::new(format!("chain command printed '{}': {}", last, e)))
    }
}

fn args_json(args: &[ArgValue]) -> Result<String, ChainError> {
    serde_json::to_string(args).map_err(|e| ChainError::new(e.to_string()))
}

impl ChainClient for CommandChain {
    fn deployer(&mut self) -> Result<Address, ChainError> {
        self.run_for_address(&["deployer"])
    }

    fn deploy(&mut self, artifact: &str, args: &[ArgValue]) -> Result<Address, ChainError> {
        let json = args_json(args)?;
        self.run_for_address(&["deploy", artifact, &json])
    }

    fn call(&mut self, target: &Address, method: &str, args: &[ArgValue]) -> Result<(), ChainError> {
        let json = args_json(args)?;
        self.run(&["call", target.as_str(), method, &json])
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_is_split() {
        let chain = CommandChain::from_command_line("node scripts/chain.js --network helios")
            .unwrap();

        assert_eq!(chain.program, "node");
        assert_eq!(chain.base_args, vec!["scripts/chain.js", "--network", "helios"]);
    }

    #[test]
    fn test_empty_command_line_rejected() {
        assert!(CommandChain::from_command_line("   ").is_err());
    }

    #[test]
    fn test_args_are_passed_as_json() {
        let json = args_json(&[
            ArgValue::Text("0xabc".to_string()),
            ArgValue::Int(500),
            ArgValue::Bool(true),
        ])
        .unwrap();

        assert_eq!(json, r#"["0xabc",500,true]"#);
    }
}
