//! Deploy command
//!
//! Usage: shipyard deploy [--only <UNIT>]... [--redeploy] [--wire] [--json]

use clap::Args;
use shipyard_core::{DeployEvent, Result, SequenceOptions};
use shipyard_core_types::RunContext;
use shipyard_engine::commands::deploy::{deploy, DeployOutcome};
use shipyard_engine::commands::wire::wire_plan;

use crate::commands::wire::render_wiring;
use crate::commands::{print_json, ChainOpts, PlanOpts};

#[derive(Debug, Args)]
pub struct DeployArgs {
    #[command(flatten)]
    pub plan: PlanOpts,

    #[command(flatten)]
    pub chain: ChainOpts,

    /// Restrict the run to this unit (repeatable)
    #[arg(long = "only", value_name = "UNIT")]
    pub only: Vec<String>,

    /// Deploy selected units again even if the ledger already has them
    #[arg(long)]
    pub redeploy: bool,

    /// Run the plan's wiring steps after a successful deploy
    #[arg(long)]
    pub wire: bool,

    /// Print events as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DeployArgs) -> Result<()> {
    let plan = args.plan.load_plan()?;
    let ledger = args.plan.ledger_file();
    let mut chain = args.chain.open()?;
    let run = RunContext::new().with_label(args.plan.plan.display().to_string());
    let options = SequenceOptions {
        only: args.only,
        redeploy: args.redeploy,
    };

    let outcome = deploy(&plan, &ledger, &mut chain, &options, &run)?;
    render_deploy(&outcome, args.json)?;
    if let Some(err) = outcome.error {
        return Err(err);
    }

    if args.wire {
        let wired = wire_plan(&plan, &ledger, &mut chain, &run)?;
        render_wiring(&wired, args.json)?;
        if let Some(err) = wired.error {
            return Err(err);
        }
    }
    Ok(())
}

fn render_deploy(outcome: &DeployOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }
    for event in &outcome.events {
        match event {
            DeployEvent::Deployed {
                unit,
                artifact,
                address,
                ..
            } if unit == artifact => println!("deployed {} at {}", unit, address),
            DeployEvent::Deployed {
                unit,
                artifact,
                address,
                ..
            } => println!("deployed {} ({}) at {}", unit, artifact, address),
            DeployEvent::Reused {
                unit,
                address,
                args_changed: false,
            } => println!("reused   {} at {}", unit, address),
            DeployEvent::Reused { unit, address, .. } => println!(
                "reused   {} at {} (declared args differ; --redeploy to apply them)",
                unit, address
            ),
        }
    }
    Ok(())
}
