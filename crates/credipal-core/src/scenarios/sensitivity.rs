use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::solver;
use crate::assumptions::{self, Assumptions};
use crate::error::CredipalError;
use crate::scenarios::comparator;
use crate::types::*;
use crate::CredipalResult;

const MAX_SWEEP_POINTS: usize = 1000;

/// Input for an extra-payment sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    #[serde(flatten)]
    pub facts: DebtFacts,
    pub min_extra: Money,
    pub max_extra: Money,
    pub step: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Assumptions>,
}

/// Projection at one extra-payment level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub extra_payment: Money,
    pub projection: PayoffProjection,
    pub months_saved: Option<u32>,
    pub interest_saved: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub current: PayoffProjection,
    pub points: Vec<SensitivityPoint>,
    /// Smallest swept extra payment that makes an unpayable debt pay off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_payable_extra: Option<Money>,
}

/// Generate the sweep values from min to max with step, always ending on max.
fn generate_sweep_values(input: &SensitivityInput) -> CredipalResult<Vec<Decimal>> {
    require_non_negative("min_extra", input.min_extra)?;
    if input.step <= Decimal::ZERO {
        return Err(CredipalError::InvalidInput {
            field: "step".into(),
            reason: "Step must be positive".into(),
        });
    }
    if input.min_extra > input.max_extra {
        return Err(CredipalError::InvalidInput {
            field: "min_extra".into(),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = input.min_extra;
    while current <= input.max_extra {
        if values.len() == MAX_SWEEP_POINTS {
            return Err(CredipalError::InvalidInput {
                field: "step".into(),
                reason: format!("Sweep exceeds {MAX_SWEEP_POINTS} points"),
            });
        }
        values.push(current);
        current += input.step;
    }
    if let Some(&last) = values.last() {
        if last < input.max_extra {
            values.push(input.max_extra);
        }
    }

    Ok(values)
}

/// Sweep extra monthly payments and report the savings at each level.
pub fn extra_payment_sensitivity(
    input: &SensitivityInput,
) -> CredipalResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    assumptions::resolve(input.assumptions.as_ref())?;
    input.facts.validate()?;

    let sweep = generate_sweep_values(input)?;
    let rate = input.facts.monthly_rate();
    let current = solver::solve(input.facts.balance, input.facts.monthly_payment, rate)?;

    let mut points = Vec::with_capacity(sweep.len());
    for extra in sweep {
        let projection = solver::solve(
            input.facts.balance,
            input.facts.monthly_payment + extra,
            rate,
        )?;
        let (months_saved, interest_saved) = comparator::savings(&current, &projection);
        points.push(SensitivityPoint {
            extra_payment: extra,
            projection,
            months_saved,
            interest_saved,
        });
    }

    let first_payable_extra = if current.is_unpayable() {
        let found = points
            .iter()
            .find(|p| !p.projection.is_unpayable())
            .map(|p| p.extra_payment);
        if found.is_none() {
            warnings.push("No swept extra payment makes this debt pay off".into());
        }
        found
    } else {
        None
    };

    let output = SensitivityOutput {
        current,
        points,
        first_payable_extra,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Extra-payment sensitivity sweep",
        &serde_json::json!({
            "min_extra": input.min_extra.to_string(),
            "max_extra": input.max_extra.to_string(),
            "step": input.step.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
