use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use credipal_core::scenarios::{self, ScenarioInput, SensitivityInput};
use credipal_core::Assumptions;

use super::{set_opt, DebtFlags};
use crate::input;

/// Arguments for the current / optimistic / pessimistic comparison
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub debt: DebtFlags,

    /// Extra amount paid each month in the optimistic scenario
    #[arg(long)]
    pub extra: Option<Decimal>,
}

pub fn run_scenarios(
    args: ScenarioArgs,
    assumptions: Option<&Assumptions>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario_input: ScenarioInput = input::load(args.input.as_deref(), assumptions, || {
        let mut value = args.debt.to_value()?;
        set_opt(&mut value, "extra_payment", args.extra);
        Ok(value)
    })?;
    let result = scenarios::analyze_scenarios(&scenario_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the extra-payment sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub debt: DebtFlags,

    /// Smallest extra payment in the sweep
    #[arg(long, default_value = "0")]
    pub min_extra: Decimal,

    /// Largest extra payment in the sweep
    #[arg(long)]
    pub max_extra: Option<Decimal>,

    /// Increment between sweep points
    #[arg(long, default_value = "25")]
    pub step: Decimal,
}

pub fn run_sensitivity(
    args: SensitivityArgs,
    assumptions: Option<&Assumptions>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep_input: SensitivityInput = input::load(args.input.as_deref(), assumptions, || {
        let max_extra = args
            .max_extra
            .ok_or("--max-extra is required (or provide --input)")?;
        let mut value = args.debt.to_value()?;
        set_opt(&mut value, "min_extra", Some(args.min_extra));
        set_opt(&mut value, "max_extra", Some(max_extra));
        set_opt(&mut value, "step", Some(args.step));
        Ok(value)
    })?;
    let result = scenarios::extra_payment_sensitivity(&sweep_input)?;
    Ok(serde_json::to_value(result)?)
}
