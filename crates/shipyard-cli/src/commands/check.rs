//! Check command: dry resolution, no chain needed
//!
//! Usage: shipyard check [--only <UNIT>]... [--redeploy] [--json]

use clap::Args;
use shipyard_core::sequencer::PlannedAction;
use shipyard_core::{Result, SequenceOptions};
use shipyard_engine::commands::check::check_plan;

use crate::commands::{print_json, PlanOpts};

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub plan: PlanOpts,

    #[arg(long = "only", value_name = "UNIT")]
    pub only: Vec<String>,

    #[arg(long)]
    pub redeploy: bool,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let plan = args.plan.load_plan()?;
    let options = SequenceOptions {
        only: args.only,
        redeploy: args.redeploy,
    };

    let outcome = check_plan(&plan, &args.plan.ledger_file(), &options)?;

    if args.json {
        return print_json(&outcome);
    }
    for (index, step) in outcome.steps.iter().enumerate() {
        let action = match step.action {
            PlannedAction::Deploy => "deploy",
            PlannedAction::Reuse => "reuse ",
        };
        println!(
            "{:>2}. {} {}({})",
            index + 1,
            action,
            step.unit,
            step.args.join(", ")
        );
    }
    println!("{} wiring step(s) resolve", outcome.wiring_steps);
    Ok(())
}
