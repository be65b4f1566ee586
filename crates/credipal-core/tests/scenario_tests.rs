use credipal_core::scenarios::{self, ScenarioInput, SensitivityInput};
use credipal_core::types::{DebtFacts, PayoffProjection};
use credipal_core::Assumptions;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn card() -> DebtFacts {
    DebtFacts::new(dec!(5000), dec!(200), dec!(18))
}

// ===========================================================================
// Scenario comparison
// ===========================================================================

#[test]
fn test_extra_payment_shortens_payoff() {
    let set = scenarios::compare_scenarios(&card(), dec!(100)).unwrap();

    let current = set.current.months().unwrap();
    let optimistic = set.optimistic.projection.months().unwrap();
    assert!(optimistic < current);
    assert_eq!(set.optimistic.monthly_payment, dec!(300));
    assert_eq!(set.optimistic.months_saved, Some(current - optimistic));
    assert!(set.optimistic.months_saved.unwrap() > 0);
    assert!(set.optimistic.interest_saved.unwrap() > Decimal::ZERO);
    assert_eq!(
        set.optimistic.interest_saved.unwrap(),
        set.current.total_interest().unwrap() - set.optimistic.projection.total_interest().unwrap()
    );
}

#[test]
fn test_missed_payment_cost() {
    let set = scenarios::compare_scenarios(&card(), dec!(100)).unwrap();
    assert_eq!(set.pessimistic.cost_of_missed_payment, dec!(85));
}

#[test]
fn test_optimistic_never_worse_than_current() {
    for extra in [dec!(0), dec!(1), dec!(25), dec!(500), dec!(5000)] {
        let set = scenarios::compare_scenarios(&card(), extra).unwrap();
        assert!(set.optimistic.projection.months() <= set.current.months());
        assert!(set.optimistic.interest_saved.unwrap() >= Decimal::ZERO);
    }
}

#[test]
fn test_extra_payment_can_rescue_unpayable_debt() {
    let facts = DebtFacts::new(dec!(5000), dec!(75), dec!(18));
    let set = scenarios::compare_scenarios(&facts, dec!(125)).unwrap();
    assert_eq!(set.current, PayoffProjection::Unpayable);
    // 75 + 125 = 200, the same as the card above
    let rescued = scenarios::compare_scenarios(&card(), Decimal::ZERO).unwrap();
    assert_eq!(set.optimistic.projection, rescued.current);
    assert_eq!(set.optimistic.months_saved, None);
}

#[test]
fn test_compare_is_idempotent() {
    let a = scenarios::compare_scenarios(&card(), dec!(42.5)).unwrap();
    let b = scenarios::compare_scenarios(&card(), dec!(42.5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_analyze_from_json_with_assumptions() {
    let input: ScenarioInput = serde_json::from_value(serde_json::json!({
        "balance": "5000",
        "monthly_payment": "200",
        "annual_rate_percent": "18",
        "extra_payment": "100",
        "assumptions": { "late_fee_rate": "0.02" }
    }))
    .unwrap();
    let out = scenarios::analyze_scenarios(&input).unwrap();
    // 75 + 200 * 0.02
    assert_eq!(out.result.pessimistic.cost_of_missed_payment, dec!(79));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_analyze_rejects_bad_assumptions() {
    let input = ScenarioInput {
        facts: card(),
        extra_payment: dec!(100),
        assumptions: Some(Assumptions {
            late_fee_rate: dec!(-0.05),
            ..Default::default()
        }),
    };
    assert!(scenarios::analyze_scenarios(&input).is_err());
}

// ===========================================================================
// Extra-payment sensitivity
// ===========================================================================

#[test]
fn test_sensitivity_first_point_matches_compare() {
    let input = SensitivityInput {
        facts: card(),
        min_extra: dec!(100),
        max_extra: dec!(200),
        step: dec!(50),
        assumptions: None,
    };
    let out = scenarios::extra_payment_sensitivity(&input).unwrap();
    let set = scenarios::compare_scenarios(&card(), dec!(100)).unwrap();

    assert_eq!(out.result.points.len(), 3);
    assert_eq!(out.result.points[0].projection, set.optimistic.projection);
    assert_eq!(out.result.points[0].months_saved, set.optimistic.months_saved);
    assert_eq!(out.result.current, set.current);
}
