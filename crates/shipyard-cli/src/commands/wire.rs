//! Wire command
//!
//! Usage: shipyard wire [--json]

use clap::Args;
use shipyard_core::{Result, WiringEvent};
use shipyard_core_types::RunContext;
use shipyard_engine::commands::wire::{wire_plan, WireOutcome};

use crate::commands::{print_json, ChainOpts, PlanOpts};

#[derive(Debug, Args)]
pub struct WireArgs {
    #[command(flatten)]
    pub plan: PlanOpts,

    #[command(flatten)]
    pub chain: ChainOpts,

    /// Print events as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: WireArgs) -> Result<()> {
    let plan = args.plan.load_plan()?;
    let mut chain = args.chain.open()?;
    let run = RunContext::new().with_label(args.plan.plan.display().to_string());

    let outcome = wire_plan(&plan, &args.plan.ledger_file(), &mut chain, &run)?;
    render_wiring(&outcome, args.json)?;
    match outcome.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn render_wiring(outcome: &WireOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }
    for event in &outcome.events {
        let WiringEvent::Applied {
            target,
            method,
            args,
            ..
        } = event;
        let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
        println!("wired    {}.{}({})", target, method, rendered.join(", "));
    }
    Ok(())
}
