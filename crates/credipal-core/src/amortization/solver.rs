use rust_decimal::prelude::{RoundingStrategy, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use tracing::{debug, trace};

use crate::error::CredipalError;
use crate::types::*;
use crate::CredipalResult;

/// Decimal places kept on the raw month count before taking the ceiling.
/// ln() round-off on an exact payoff month must not add a month.
const MONTHS_PRECISION_DP: u32 = 8;

fn to_months(raw: Decimal) -> CredipalResult<u32> {
    raw.ceil()
        .to_u32()
        .ok_or_else(|| CredipalError::InvalidInput {
            field: "monthly_payment".into(),
            reason: format!("Payoff horizon of {raw} months is out of range"),
        })
}

fn finite(balance: Money, monthly_payment: Money, months: u32) -> PayoffProjection {
    let total_payment = round_money(monthly_payment * Decimal::from(months));
    let total_interest = round_money((total_payment - balance).max(Decimal::ZERO));
    PayoffProjection::Finite(PayoffResult {
        months,
        total_interest,
        total_payment,
    })
}

/// Project a debt to payoff at a level monthly payment.
///
/// Returns [`PayoffProjection::Unpayable`] when the payment does not exceed
/// the interest accruing on the opening balance.
pub fn solve(
    balance: Money,
    monthly_payment: Money,
    monthly_rate: Rate,
) -> CredipalResult<PayoffProjection> {
    require_non_negative("balance", balance)?;
    require_non_negative("monthly_payment", monthly_payment)?;
    require_non_negative("monthly_rate", monthly_rate)?;

    trace!(%balance, %monthly_payment, %monthly_rate, "solving payoff");

    if balance.is_zero() {
        return Ok(PayoffProjection::Finite(PayoffResult::ZERO));
    }

    if monthly_rate.is_zero() {
        if monthly_payment.is_zero() {
            return Err(CredipalError::InvalidPayment {
                context: format!("zero monthly payment against a balance of {balance} at 0% interest"),
            });
        }
        let months = to_months(balance / monthly_payment)?;
        return Ok(PayoffProjection::Finite(PayoffResult {
            months,
            total_interest: Decimal::ZERO,
            total_payment: round_money(balance),
        }));
    }

    let monthly_interest = balance * monthly_rate;
    if monthly_payment <= monthly_interest {
        debug!(%balance, %monthly_payment, %monthly_interest, "payment does not cover interest; debt is unpayable");
        return Ok(PayoffProjection::Unpayable);
    }

    // n = -ln(1 - B*r/P) / ln(1 + r)
    let remaining = Decimal::ONE - monthly_interest / monthly_payment;
    let numerator = remaining.checked_ln().ok_or_else(|| CredipalError::InvalidInput {
        field: "monthly_payment".into(),
        reason: "Payment is too close to the accruing interest to project".into(),
    })?;
    let denominator = (Decimal::ONE + monthly_rate)
        .checked_ln()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| CredipalError::InvalidInput {
            field: "monthly_rate".into(),
            reason: "Rate is too small to project with logarithms".into(),
        })?;

    let raw_months = (-numerator / denominator).round_dp(MONTHS_PRECISION_DP);
    let months = to_months(raw_months)?;

    Ok(finite(balance, monthly_payment, months))
}

/// [`solve`] using the monthly rate derived from the debt's APR.
pub fn solve_facts(facts: &DebtFacts) -> CredipalResult<PayoffProjection> {
    facts.validate()?;
    solve(facts.balance, facts.monthly_payment, facts.monthly_rate())
}

/// Level payment that clears `balance` in exactly `months` months.
///
/// Rounded up to the next cent so the target horizon is actually met.
pub fn required_payment(balance: Money, monthly_rate: Rate, months: u32) -> CredipalResult<Money> {
    require_non_negative("balance", balance)?;
    require_non_negative("monthly_rate", monthly_rate)?;
    if months == 0 {
        return Err(CredipalError::InvalidInput {
            field: "months".into(),
            reason: "Number of months must be > 0".into(),
        });
    }

    let n = Decimal::from(months);
    let payment = if monthly_rate.is_zero() {
        balance / n
    } else {
        let factor = (Decimal::ONE + monthly_rate).powu(u64::from(months));
        let annuity_factor = (factor - Decimal::ONE) / (monthly_rate * factor);
        if annuity_factor.is_zero() {
            return Err(CredipalError::InvalidInput {
                field: "monthly_rate".into(),
                reason: "Annuity factor collapsed to zero".into(),
            });
        }
        balance / annuity_factor
    };

    Ok(payment.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity))
}
