use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use credipal_core::amortization::{self, ScheduleInput};
use credipal_core::types::{with_metadata, DebtFacts};
use credipal_core::Assumptions;

use super::{set_opt, DebtFlags};
use crate::input;

/// Arguments for the closed-form payoff solver
#[derive(Args)]
pub struct SolveArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub debt: DebtFlags,
}

pub fn run_solve(
    args: SolveArgs,
    assumptions: Option<&Assumptions>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let facts: DebtFacts = input::load(args.input.as_deref(), None, || args.debt.to_value())?;
    let projection = amortization::solve_facts(&facts)?;

    let defaults = Assumptions::default();
    let display = assumptions.unwrap_or(&defaults);
    let mut warnings = Vec::new();
    if projection.is_unpayable() {
        warnings.push(format!(
            "Payment does not cover monthly interest; months to payoff: {}",
            projection.display_months(display)
        ));
    }

    let output = with_metadata(
        "Closed-form amortization (monthly compounding)",
        &json!({
            "monthly_rate": facts.monthly_rate().to_string(),
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        projection,
    );
    Ok(serde_json::to_value(output)?)
}

/// Arguments for the month-by-month amortization table
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub debt: DebtFlags,

    /// Date of the first payment (YYYY-MM-DD); adds a payoff date
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_schedule(
    args: ScheduleArgs,
    assumptions: Option<&Assumptions>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = input::load(args.input.as_deref(), assumptions, || {
        let mut value = args.debt.to_value()?;
        set_opt(&mut value, "start_date", args.start_date);
        Ok(value)
    })?;
    let result = amortization::amortization_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the payment needed to clear a debt by a target month
#[derive(Args)]
pub struct RequiredPaymentArgs {
    /// Outstanding balance
    #[arg(long)]
    pub balance: Decimal,

    /// Annual interest rate in percent (18 = 18% APR)
    #[arg(long)]
    pub rate: Decimal,

    /// Target number of months
    #[arg(long)]
    pub months: u32,
}

pub fn run_required_payment(args: RequiredPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let facts = DebtFacts::new(args.balance, Decimal::ZERO, args.rate);
    facts.validate()?;
    let payment = amortization::required_payment(args.balance, facts.monthly_rate(), args.months)?;

    let output = with_metadata(
        "Level payment from the annuity formula, rounded up to the cent",
        &json!({
            "balance": args.balance.to_string(),
            "annual_rate_percent": args.rate.to_string(),
            "months": args.months,
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        json!({
            "required_payment": payment,
            "months": args.months,
        }),
    );
    Ok(serde_json::to_value(output)?)
}
