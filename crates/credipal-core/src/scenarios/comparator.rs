use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::solver;
use crate::assumptions::{self, Assumptions};
use crate::types::*;
use crate::CredipalResult;

/// Input for the current / optimistic / pessimistic comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(flatten)]
    pub facts: DebtFacts,
    /// Added on top of the monthly payment in the optimistic scenario
    #[serde(default)]
    pub extra_payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Assumptions>,
}

/// Paying more than the current payment every month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimisticScenario {
    pub projection: PayoffProjection,
    pub monthly_payment: Money,
    /// `None` when the current plan never pays off but this one does.
    pub months_saved: Option<u32>,
    /// `None` when the current plan never pays off but this one does.
    pub interest_saved: Option<Money>,
}

/// One missed payment on top of the current plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PessimisticScenario {
    pub projection: PayoffProjection,
    pub missed_interest: Money,
    pub estimated_late_fee: Money,
    pub cost_of_missed_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub extra_payment: Money,
    pub current: PayoffProjection,
    pub optimistic: OptimisticScenario,
    pub pessimistic: PessimisticScenario,
}

/// Months and interest saved by moving from `current` to `improved`.
pub(crate) fn savings(
    current: &PayoffProjection,
    improved: &PayoffProjection,
) -> (Option<u32>, Option<Money>) {
    match (current, improved) {
        (PayoffProjection::Finite(cur), PayoffProjection::Finite(imp)) => (
            Some(cur.months.saturating_sub(imp.months)),
            Some((cur.total_interest - imp.total_interest).max(Decimal::ZERO)),
        ),
        (PayoffProjection::Unpayable, PayoffProjection::Finite(_)) => (None, None),
        (_, PayoffProjection::Unpayable) => (Some(0), Some(Decimal::ZERO)),
    }
}

/// Compare scenarios using the default assumptions.
pub fn compare_scenarios(facts: &DebtFacts, extra_payment: Money) -> CredipalResult<ScenarioSet> {
    compare_scenarios_with(facts, extra_payment, &Assumptions::default())
}

/// Derive current, optimistic (extra payment) and pessimistic (one missed
/// payment) scenarios for a single debt.
pub fn compare_scenarios_with(
    facts: &DebtFacts,
    extra_payment: Money,
    assumptions: &Assumptions,
) -> CredipalResult<ScenarioSet> {
    facts.validate()?;
    require_non_negative("extra_payment", extra_payment)?;

    let rate = facts.monthly_rate();
    let current = solver::solve(facts.balance, facts.monthly_payment, rate)?;

    // Always solved on its own: extra payment can rescue an unpayable debt
    let optimistic_payment = facts.monthly_payment + extra_payment;
    let optimistic = solver::solve(facts.balance, optimistic_payment, rate)?;
    let (months_saved, interest_saved) = savings(&current, &optimistic);

    let missed_interest = round_money(facts.balance * rate);
    let estimated_late_fee = round_money(assumptions.late_fee(facts.monthly_payment));

    Ok(ScenarioSet {
        extra_payment,
        current,
        optimistic: OptimisticScenario {
            projection: optimistic,
            monthly_payment: optimistic_payment,
            months_saved,
            interest_saved,
        },
        pessimistic: PessimisticScenario {
            projection: current,
            missed_interest,
            estimated_late_fee,
            cost_of_missed_payment: missed_interest + estimated_late_fee,
        },
    })
}

/// Scenario comparison wrapped in the standard output envelope.
pub fn analyze_scenarios(input: &ScenarioInput) -> CredipalResult<ComputationOutput<ScenarioSet>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let assumptions = assumptions::resolve(input.assumptions.as_ref())?;

    let set = compare_scenarios_with(&input.facts, input.extra_payment, &assumptions)?;

    if set.current.is_unpayable() {
        warnings.push(format!(
            "Current payment of {} does not cover monthly interest; the debt never pays off",
            input.facts.monthly_payment
        ));
        if set.optimistic.projection.is_unpayable() {
            warnings.push("Extra payment is still not enough to start reducing the balance".into());
        }
    }
    if input.extra_payment.is_zero() {
        warnings.push("Extra payment is zero; optimistic scenario equals current".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Current / Optimistic / Pessimistic Payoff Scenarios",
        &serde_json::json!({
            "monthly_rate": input.facts.monthly_rate().to_string(),
            "extra_payment": input.extra_payment.to_string(),
            "late_fee_rate": assumptions.late_fee_rate.to_string(),
        }),
        warnings,
        elapsed,
        set,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn card() -> DebtFacts {
        DebtFacts::new(dec!(5000), dec!(200), dec!(18))
    }

    #[test]
    fn test_pessimistic_cost() {
        let set = compare_scenarios(&card(), dec!(100)).unwrap();
        // 5000 * 0.015 + 200 * 0.05 = 75 + 10
        assert_eq!(set.pessimistic.missed_interest, dec!(75));
        assert_eq!(set.pessimistic.estimated_late_fee, dec!(10));
        assert_eq!(set.pessimistic.cost_of_missed_payment, dec!(85));
        assert_eq!(set.pessimistic.projection, set.current);
    }

    #[test]
    fn test_zero_extra_degenerates() {
        let set = compare_scenarios(&card(), Decimal::ZERO).unwrap();
        assert_eq!(set.optimistic.projection, set.current);
        assert_eq!(set.optimistic.months_saved, Some(0));
        assert_eq!(set.optimistic.interest_saved, Some(Decimal::ZERO));
    }

    #[test]
    fn test_negative_extra_rejected() {
        assert!(compare_scenarios(&card(), dec!(-1)).is_err());
    }

    #[test]
    fn test_extra_rescues_unpayable() {
        let facts = DebtFacts::new(dec!(5000), dec!(75), dec!(18));
        let set = compare_scenarios(&facts, dec!(50)).unwrap();
        assert!(set.current.is_unpayable());
        assert!(!set.optimistic.projection.is_unpayable());
        assert_eq!(set.optimistic.months_saved, None);
        assert_eq!(set.optimistic.interest_saved, None);
    }

    #[test]
    fn test_both_unpayable() {
        let facts = DebtFacts::new(dec!(5000), dec!(50), dec!(18));
        let set = compare_scenarios(&facts, dec!(10)).unwrap();
        assert!(set.optimistic.projection.is_unpayable());
        assert_eq!(set.optimistic.months_saved, Some(0));
    }

    #[test]
    fn test_custom_late_fee() {
        let a = Assumptions {
            late_fee_rate: dec!(0.10),
            ..Default::default()
        };
        let set = compare_scenarios_with(&card(), dec!(0), &a).unwrap();
        assert_eq!(set.pessimistic.cost_of_missed_payment, dec!(95));
    }

    #[test]
    fn test_envelope_warnings() {
        let input = ScenarioInput {
            facts: DebtFacts::new(dec!(5000), dec!(75), dec!(18)),
            extra_payment: Decimal::ZERO,
            assumptions: None,
        };
        let out = analyze_scenarios(&input).unwrap();
        assert_eq!(out.warnings.len(), 3);
    }
}
