use rust_decimal::prelude::RoundingStrategy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::CredipalError;
use crate::CredipalResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.015 = 1.5% per month). Never as percentages.
pub type Rate = Decimal;

/// Round a monetary amount to cents, half away from zero.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Reject a negative value for the named field.
pub(crate) fn require_non_negative(field: &str, value: Decimal) -> CredipalResult<()> {
    if value < Decimal::ZERO {
        return Err(CredipalError::InvalidInput {
            field: field.into(),
            reason: format!("Must be non-negative (got {value})"),
        });
    }
    Ok(())
}

/// The facts of a single debt as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtFacts {
    pub balance: Money,
    pub monthly_payment: Money,
    /// Annual percentage rate, e.g. 18 for 18% APR
    pub annual_rate_percent: Decimal,
}

impl DebtFacts {
    pub fn new(balance: Money, monthly_payment: Money, annual_rate_percent: Decimal) -> Self {
        Self {
            balance,
            monthly_payment,
            annual_rate_percent,
        }
    }

    /// Periodic rate: APR / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_percent / dec!(100) / dec!(12)
    }

    pub fn validate(&self) -> CredipalResult<()> {
        require_non_negative("balance", self.balance)?;
        require_non_negative("monthly_payment", self.monthly_payment)?;
        require_non_negative("annual_rate_percent", self.annual_rate_percent)
    }
}

/// A debt carrying the creditor name it is displayed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledDebt {
    pub creditor_label: String,
    #[serde(flatten)]
    pub facts: DebtFacts,
}

/// Months, interest and total outlay for a debt that does pay off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub months: u32,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl PayoffResult {
    pub const ZERO: PayoffResult = PayoffResult {
        months: 0,
        total_interest: Decimal::ZERO,
        total_payment: Decimal::ZERO,
    };
}

/// Outcome of projecting a debt forward.
///
/// `Unpayable` means the payment never covers the accruing interest. It
/// carries no numbers so it cannot leak into further arithmetic; use
/// [`PayoffProjection::capped`] when a display layer insists on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffProjection {
    Finite(PayoffResult),
    Unpayable,
}

impl PayoffProjection {
    pub fn is_unpayable(&self) -> bool {
        matches!(self, PayoffProjection::Unpayable)
    }

    pub fn result(&self) -> Option<&PayoffResult> {
        match self {
            PayoffProjection::Finite(r) => Some(r),
            PayoffProjection::Unpayable => None,
        }
    }

    pub fn months(&self) -> Option<u32> {
        self.result().map(|r| r.months)
    }

    pub fn total_interest(&self) -> Option<Money> {
        self.result().map(|r| r.total_interest)
    }

    pub fn total_payment(&self) -> Option<Money> {
        self.result().map(|r| r.total_payment)
    }

    /// Legacy numeric form: unpayable debts become the month cap and the
    /// sentinel amount.
    pub fn capped(&self, assumptions: &Assumptions) -> PayoffResult {
        match self {
            PayoffProjection::Finite(r) => *r,
            PayoffProjection::Unpayable => PayoffResult {
                months: assumptions.display_month_cap,
                total_interest: assumptions.sentinel_amount,
                total_payment: assumptions.sentinel_amount,
            },
        }
    }

    /// Month count for display, "∞" when unpayable or beyond the cap.
    pub fn display_months(&self, assumptions: &Assumptions) -> String {
        match self.months() {
            Some(m) if m <= assumptions.display_month_cap => m.to_string(),
            _ => "∞".to_string(),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        let facts = DebtFacts::new(dec!(5000), dec!(200), dec!(18));
        assert_eq!(facts.monthly_rate(), dec!(0.015));
    }

    #[test]
    fn test_negative_fields_rejected() {
        assert!(DebtFacts::new(dec!(-1), dec!(200), dec!(18)).validate().is_err());
        assert!(DebtFacts::new(dec!(100), dec!(-1), dec!(18)).validate().is_err());
        assert!(DebtFacts::new(dec!(100), dec!(200), dec!(-0.1)).validate().is_err());
        assert!(DebtFacts::new(dec!(0), dec!(0), dec!(0)).validate().is_ok());
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.015)), dec!(1.02));
        assert_eq!(round_money(dec!(1.0049)), dec!(1.00));
    }

    #[test]
    fn test_display_months() {
        let a = Assumptions::default();
        let finite = PayoffProjection::Finite(PayoffResult {
            months: 32,
            total_interest: dec!(1400),
            total_payment: dec!(6400),
        });
        assert_eq!(finite.display_months(&a), "32");
        assert_eq!(PayoffProjection::Unpayable.display_months(&a), "∞");

        let long = PayoffProjection::Finite(PayoffResult {
            months: 1200,
            ..PayoffResult::ZERO
        });
        assert_eq!(long.display_months(&a), "∞");
    }

    #[test]
    fn test_capped_sentinel() {
        let a = Assumptions::default();
        let capped = PayoffProjection::Unpayable.capped(&a);
        assert_eq!(capped.months, 999);
        assert_eq!(capped.total_payment, dec!(999999));
        assert_eq!(capped.total_interest, dec!(999999));
    }

    #[test]
    fn test_projection_serde_tagging() {
        let json = serde_json::to_value(PayoffProjection::Unpayable).unwrap();
        assert_eq!(json, serde_json::json!({"status": "unpayable"}));

        let finite = PayoffProjection::Finite(PayoffResult::ZERO);
        let json = serde_json::to_value(finite).unwrap();
        assert_eq!(json["status"], "finite");
        assert_eq!(json["months"], 0);
    }

    #[test]
    fn test_labelled_debt_flattened() {
        let debt: LabelledDebt = serde_json::from_value(serde_json::json!({
            "creditor_label": "Visa",
            "balance": "1200",
            "monthly_payment": "100",
            "annual_rate_percent": "19.99"
        }))
        .unwrap();
        assert_eq!(debt.creditor_label, "Visa");
        assert_eq!(debt.facts.annual_rate_percent, dec!(19.99));
    }
}
