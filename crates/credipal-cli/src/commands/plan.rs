use clap::Args;
use serde_json::Value;

use credipal_core::plan::{self, PayoffPlanInput};
use credipal_core::Assumptions;

use crate::input;

/// Arguments for the consolidated payoff plan
#[derive(Args)]
pub struct PlanArgs {
    /// Path to JSON/YAML file with a `debts` list
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_plan(
    args: PlanArgs,
    assumptions: Option<&Assumptions>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: PayoffPlanInput = input::load(args.input.as_deref(), assumptions, || {
        Err("--input <file.json> or stdin required for a payoff plan".into())
    })?;
    let result = plan::build_payoff_plan(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}
