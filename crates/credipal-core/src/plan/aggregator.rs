use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assumptions::{self, Assumptions};
use crate::error::CredipalError;
use crate::types::*;
use crate::CredipalResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffPlanInput {
    pub debts: Vec<LabelledDebt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Assumptions>,
}

/// One row of the consolidated payoff plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffScheduleEntry {
    pub creditor_label: String,
    pub balance: Money,
    /// 0 when there is no payment to divide by
    pub months_to_payoff: u32,
    /// Rough estimate: a fraction of one year's interest on the balance
    pub interest_saved: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub schedule: Vec<PayoffScheduleEntry>,
    pub total_interest_saved: Money,
}

fn entry(index: usize, debt: &LabelledDebt, assumptions: &Assumptions) -> CredipalResult<PayoffScheduleEntry> {
    let facts = &debt.facts;
    facts.validate().map_err(|e| match e {
        CredipalError::InvalidInput { field, reason } => CredipalError::InvalidInput {
            field: format!("debts[{index}] ({}).{field}", debt.creditor_label),
            reason,
        },
        other => other,
    })?;

    let months_to_payoff = if facts.monthly_payment > Decimal::ZERO {
        (facts.balance / facts.monthly_payment)
            .ceil()
            .to_u32()
            .ok_or_else(|| CredipalError::InvalidInput {
                field: format!("debts[{index}] ({}).monthly_payment", debt.creditor_label),
                reason: "Payoff horizon is out of range".into(),
            })?
    } else {
        0
    };

    let interest_saved = round_money(
        facts.balance * (facts.annual_rate_percent / dec!(100)) * assumptions.interest_saved_factor,
    );

    Ok(PayoffScheduleEntry {
        creditor_label: debt.creditor_label.clone(),
        balance: facts.balance,
        months_to_payoff,
        interest_saved,
    })
}

/// Aggregate debts into a payoff plan using the default assumptions.
pub fn aggregate(debts: &[LabelledDebt]) -> CredipalResult<PayoffPlan> {
    aggregate_with(debts, &Assumptions::default())
}

/// Build one schedule entry per debt and total the estimated interest saved.
pub fn aggregate_with(debts: &[LabelledDebt], assumptions: &Assumptions) -> CredipalResult<PayoffPlan> {
    let schedule = debts
        .iter()
        .enumerate()
        .map(|(i, d)| entry(i, d, assumptions))
        .collect::<CredipalResult<Vec<_>>>()?;
    let total_interest_saved = schedule.iter().map(|e| e.interest_saved).sum();

    Ok(PayoffPlan {
        schedule,
        total_interest_saved,
    })
}

/// Payoff plan wrapped in the standard output envelope.
pub fn build_payoff_plan(input: &PayoffPlanInput) -> CredipalResult<ComputationOutput<PayoffPlan>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let assumptions = assumptions::resolve(input.assumptions.as_ref())?;

    let plan = aggregate_with(&input.debts, &assumptions)?;

    for e in &plan.schedule {
        if e.months_to_payoff == 0 && e.balance > Decimal::ZERO {
            warnings.push(format!(
                "{}: no monthly payment set; months to payoff is N/A",
                e.creditor_label
            ));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Consolidated payoff plan (balance / payment, half-year interest estimate)",
        &serde_json::json!({
            "num_debts": input.debts.len(),
            "interest_saved_factor": assumptions.interest_saved_factor.to_string(),
        }),
        warnings,
        elapsed,
        plan,
    ))
}
