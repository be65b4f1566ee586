pub mod amortization;
pub mod plan;
pub mod scenarios;

use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Debt facts shared by the single-debt commands
#[derive(Args)]
pub struct DebtFlags {
    /// Outstanding balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Annual interest rate in percent (18 = 18% APR)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

impl DebtFlags {
    /// Build a debt-facts JSON object, naming the first missing flag.
    pub fn to_value(&self) -> Result<Value, Box<dyn std::error::Error>> {
        let balance = self
            .balance
            .ok_or("--balance is required (or provide --input)")?;
        let payment = self
            .payment
            .ok_or("--payment is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;

        Ok(json!({
            "balance": balance,
            "monthly_payment": payment,
            "annual_rate_percent": rate,
        }))
    }
}

/// Insert an optional flag into a JSON object.
pub(crate) fn set_opt<T: serde::Serialize>(value: &mut Value, key: &str, field: Option<T>) {
    if let (Some(v), Value::Object(map)) = (field, value) {
        map.insert(key.into(), json!(v));
    }
}
