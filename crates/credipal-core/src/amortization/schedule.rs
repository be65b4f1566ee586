use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::solver;
use crate::assumptions::{self, Assumptions};
use crate::error::CredipalError;
use crate::types::*;
use crate::CredipalResult;

/// Input for a month-by-month amortization table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(flatten)]
    pub facts: DebtFacts,
    /// First payment month; enables `payoff_date` on the output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Assumptions>,
}

/// A single month in the amortization table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub month: u32,
    pub opening_balance: Money,
    pub interest: Money,
    pub principal: Money,
    pub payment: Money,
    pub closing_balance: Money,
}

/// Output of the amortization table builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub periods: Vec<AmortizationPeriod>,
    pub total_interest: Money,
    pub total_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
}

/// Build the month-by-month amortization table for one debt.
///
/// Interest is charged on the opening balance and rounded to cents each
/// month; the final month pays only what is left.
pub fn amortization_schedule(
    input: &ScheduleInput,
) -> CredipalResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let assumptions = assumptions::resolve(input.assumptions.as_ref())?;
    let facts = &input.facts;

    if solver::solve_facts(facts)?.is_unpayable() {
        return Err(CredipalError::FinancialImpossibility(format!(
            "A monthly payment of {} never covers the interest on {}",
            facts.monthly_payment, facts.balance
        )));
    }

    let rate = facts.monthly_rate();
    let mut periods = Vec::new();
    let mut balance = facts.balance;
    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;
    let mut month = 0u32;

    while balance > Decimal::ZERO {
        month += 1;
        if month > assumptions.max_schedule_months {
            debug!(month, max = assumptions.max_schedule_months, "schedule cap reached");
            return Err(CredipalError::InvalidInput {
                field: "monthly_payment".into(),
                reason: format!(
                    "Payoff takes longer than {} months; raise the payment or max_schedule_months",
                    assumptions.max_schedule_months
                ),
            });
        }

        let opening = balance;
        let interest = round_money(opening * rate);
        let payment = facts.monthly_payment.min(opening + interest);
        let principal = payment - interest;
        balance = opening - principal;

        total_interest += interest;
        total_payment += payment;

        periods.push(AmortizationPeriod {
            month,
            opening_balance: opening,
            interest,
            principal,
            payment,
            closing_balance: balance,
        });
    }

    let payoff_date = input.start_date.and_then(|d| {
        let date = d.checked_add_months(Months::new(month));
        if date.is_none() {
            warnings.push(format!("Payoff date out of range for start date {d}"));
        }
        date
    });

    if let Some(last) = periods.last() {
        if last.payment < facts.monthly_payment {
            warnings.push(format!(
                "Final payment in month {} is {} instead of {}",
                last.month, last.payment, facts.monthly_payment
            ));
        }
    }

    let output = AmortizationSchedule {
        periods,
        total_interest,
        total_payment,
        payoff_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization table (monthly compounding)",
        &serde_json::json!({
            "balance": facts.balance.to_string(),
            "monthly_payment": facts.monthly_payment.to_string(),
            "monthly_rate": rate.to_string(),
            "max_schedule_months": assumptions.max_schedule_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(balance: Decimal, payment: Decimal, apr: Decimal) -> ScheduleInput {
        ScheduleInput {
            facts: DebtFacts::new(balance, payment, apr),
            start_date: None,
            assumptions: None,
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let result = amortization_schedule(&input(dec!(1000), dec!(300), dec!(0))).unwrap();
        let sched = &result.result;
        assert_eq!(sched.periods.len(), 4);
        assert_eq!(sched.periods[0].principal, dec!(300));
        assert_eq!(sched.periods[3].payment, dec!(100));
        assert_eq!(sched.periods[3].closing_balance, Decimal::ZERO);
        assert_eq!(sched.total_interest, Decimal::ZERO);
        assert_eq!(sched.total_payment, dec!(1000));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_first_month_interest() {
        let result = amortization_schedule(&input(dec!(5000), dec!(200), dec!(18))).unwrap();
        let first = &result.result.periods[0];
        // 5000 * 0.015 = 75
        assert_eq!(first.interest, dec!(75));
        assert_eq!(first.principal, dec!(125));
        assert_eq!(first.closing_balance, dec!(4875));
    }

    #[test]
    fn test_balances_chain() {
        let result = amortization_schedule(&input(dec!(2500), dec!(180), dec!(22.9))).unwrap();
        let periods = &result.result.periods;
        for pair in periods.windows(2) {
            assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
        }
        let principal: Decimal = periods.iter().map(|p| p.principal).sum();
        assert_eq!(principal, dec!(2500));
    }

    #[test]
    fn test_payoff_date() {
        let mut inp = input(dec!(1000), dec!(300), dec!(0));
        inp.start_date = NaiveDate::from_ymd_opt(2026, 1, 31);
        let result = amortization_schedule(&inp).unwrap();
        // Four payments from Jan 31 land the payoff on May 31
        assert_eq!(result.result.payoff_date, NaiveDate::from_ymd_opt(2026, 5, 31));
    }

    #[test]
    fn test_unpayable_is_error() {
        let err = amortization_schedule(&input(dec!(5000), dec!(75), dec!(18))).unwrap_err();
        assert!(matches!(err, CredipalError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_schedule_cap() {
        let mut inp = input(dec!(1000), dec!(1), dec!(0));
        inp.assumptions = Some(Assumptions {
            max_schedule_months: 12,
            ..Default::default()
        });
        assert!(amortization_schedule(&inp).is_err());
    }

    #[test]
    fn test_zero_balance_empty_schedule() {
        let result = amortization_schedule(&input(dec!(0), dec!(100), dec!(18))).unwrap();
        assert!(result.result.periods.is_empty());
        assert_eq!(result.result.total_payment, Decimal::ZERO);
    }
}
