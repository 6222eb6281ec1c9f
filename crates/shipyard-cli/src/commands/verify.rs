//! Verify command: build the explorer verification bundle for one unit
//!
//! Usage: shipyard verify [--unit <UNIT>] [--address <ADDRESS>] [--json]
//!
//! Without `--unit` the compiled units are listed and the operator picks one
//! by number; without `--address` the address is read from stdin.

use clap::Args;
use shipyard_core::errors::{ExError, ExErrorKind, ShipyardError, Stage};
use shipyard_core::model::parse_address;
use shipyard_core::Result;
use shipyard_core_types::RunContext;
use shipyard_engine::commands::verify::{compiled_units, verify};
use shipyard_engine::VerifySources;
use shipyard_store::{BundleOptions, DEFAULT_EXPLORER_BASE};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::commands::print_json;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Directory of compiler build snapshots
    #[arg(long, env = "SHIPYARD_BUILD_INFO", default_value = "artifacts/build-info")]
    pub build_info: PathBuf,

    /// Output directory, cleared on every run
    #[arg(long, env = "SHIPYARD_OUTPUT", default_value = "output")]
    pub output: PathBuf,

    /// Block explorer base URL
    #[arg(long, env = "SHIPYARD_EXPLORER_URL", default_value = DEFAULT_EXPLORER_BASE)]
    pub explorer_url: String,

    /// Unit to verify (skips the menu)
    #[arg(long)]
    pub unit: Option<String>,

    /// Deployed address (skips the prompt)
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: VerifyArgs) -> Result<()> {
    let sources = VerifySources {
        build_info_dir: args.build_info,
        bundle: BundleOptions {
            output_dir: args.output,
            explorer_base: args.explorer_url,
        },
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    // Prompts go to stderr so --json output stays clean
    let mut prompt = io::stderr();

    let unit = match args.unit {
        Some(unit) => unit,
        None => {
            let units = compiled_units(&sources)?;
            select_unit(&units, &mut input, &mut prompt)?
        }
    };
    let address = match args.address {
        Some(address) => address,
        None => prompt_address(&unit, &mut input, &mut prompt)?,
    };

    let report = verify(&sources, &unit, &address, &RunContext::new())?;

    if args.json {
        return print_json(&report);
    }
    println!("wrote {}", report.input_path.display());
    println!("wrote {}", report.guide_path.display());
    println!("explorer: {}", report.explorer_url);
    Ok(())
}

fn read_answer(input: &mut dyn BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_stage(Stage::Selection)
            .with_op("read_stdin")
            .with_message(e.to_string())
    })?;
    Ok(line.trim().to_string())
}

fn prompt_error(e: io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_stage(Stage::Selection)
        .with_op("write_prompt")
        .with_message(e.to_string())
}

/// Show a 1-indexed menu and return the chosen unit
pub fn select_unit(units: &[String], input: &mut dyn BufRead, out: &mut dyn Write) -> Result<String> {
    if units.is_empty() {
        return Err(ExError::new(ExErrorKind::NoArtifactsFound)
            .with_stage(Stage::Selection)
            .with_op("select_unit")
            .with_message("the latest build snapshot compiles no units"));
    }

    writeln!(out, "Compiled units:").map_err(prompt_error)?;
    for (index, unit) in units.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, unit).map_err(prompt_error)?;
    }
    write!(out, "Select a unit to verify: ").map_err(prompt_error)?;
    out.flush().map_err(prompt_error)?;

    let answer = read_answer(input)?;
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=units.len()).contains(n))
        .map(|n| units[n - 1].clone())
        .ok_or_else(|| {
            ExError::from(ShipyardError::InvalidSelection {
                input: answer,
                choices: units.len(),
            })
            .with_op("select_unit")
        })
}

/// Ask for the deployed address of `unit` and validate its format
pub fn prompt_address(unit: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<String> {
    write!(out, "Deployed address of {}: ", unit).map_err(prompt_error)?;
    out.flush().map_err(prompt_error)?;

    let answer = read_answer(input)?;
    parse_address(&answer).map_err(|e| {
        e.with_stage(Stage::Selection)
            .with_op("prompt_address")
            .with_unit(unit.to_string())
    })?;
    Ok(answer)
}
