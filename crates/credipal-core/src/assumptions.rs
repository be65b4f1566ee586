use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CredipalError;
use crate::types::{require_non_negative, Money, Rate};
use crate::CredipalResult;

/// Product-level heuristics shared by every projection.
///
/// Every field has a default, so a partial JSON/YAML document only needs
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// Late fee charged on a missed payment, as a fraction of the payment.
    pub late_fee_rate: Rate,
    /// Share of one year's interest counted as saved in a payoff plan.
    pub interest_saved_factor: Rate,
    /// Month counts above this are shown as "∞".
    pub display_month_cap: u32,
    /// Amount shown in place of interest/payment for unpayable debts.
    pub sentinel_amount: Money,
    /// Longest month-by-month schedule that will be generated.
    pub max_schedule_months: u32,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            late_fee_rate: dec!(0.05),
            interest_saved_factor: dec!(0.5),
            display_month_cap: 999,
            sentinel_amount: dec!(999999),
            max_schedule_months: 600,
        }
    }
}

impl Assumptions {
    pub fn validate(&self) -> CredipalResult<()> {
        require_non_negative("late_fee_rate", self.late_fee_rate)?;
        require_non_negative("interest_saved_factor", self.interest_saved_factor)?;
        require_non_negative("sentinel_amount", self.sentinel_amount)?;
        if self.max_schedule_months == 0 {
            return Err(CredipalError::InvalidInput {
                field: "max_schedule_months".into(),
                reason: "Must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Parse assumptions from JSON and validate them.
    pub fn from_json(json: &str) -> CredipalResult<Self> {
        let assumptions: Assumptions = serde_json::from_str(json)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    pub fn late_fee(&self, monthly_payment: Money) -> Money {
        monthly_payment * self.late_fee_rate
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Deserialise an optional per-call override, falling back to defaults.
pub(crate) fn resolve(overrides: Option<&Assumptions>) -> CredipalResult<Assumptions> {
    let assumptions = overrides.cloned().unwrap_or_default();
    assumptions.validate()?;
    Ok(assumptions)
}
