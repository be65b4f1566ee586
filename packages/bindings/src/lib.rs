use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use credipal_core::types::{DebtFacts, LabelledDebt};
use credipal_core::Assumptions;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_payoff(input_json: String) -> NapiResult<String> {
    let facts: DebtFacts = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credipal_core::amortization::solve_facts(&facts).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct RequiredPaymentRequest {
    balance: Decimal,
    annual_rate_percent: Decimal,
    months: u32,
}

#[napi]
pub fn required_payment(input_json: String) -> NapiResult<String> {
    let req: RequiredPaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let facts = DebtFacts::new(req.balance, Decimal::ZERO, req.annual_rate_percent);
    facts.validate().map_err(to_napi_error)?;
    let payment =
        credipal_core::amortization::required_payment(req.balance, facts.monthly_rate(), req.months)
            .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "required_payment": payment, "months": req.months }))
        .map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: credipal_core::amortization::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credipal_core::amortization::amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let input: credipal_core::scenarios::ScenarioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credipal_core::scenarios::analyze_scenarios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn extra_payment_sensitivity(input_json: String) -> NapiResult<String> {
    let input: credipal_core::scenarios::SensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        credipal_core::scenarios::extra_payment_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payoff plan
// ---------------------------------------------------------------------------

#[napi]
pub fn build_payoff_plan(input_json: String) -> NapiResult<String> {
    let input: credipal_core::plan::PayoffPlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = credipal_core::plan::build_payoff_plan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare schedule without the envelope, for the plan generator.
#[napi]
pub fn aggregate_debts(debts_json: String) -> NapiResult<String> {
    let debts: Vec<LabelledDebt> = serde_json::from_str(&debts_json).map_err(to_napi_error)?;
    let plan = credipal_core::plan::aggregate(&debts).map_err(to_napi_error)?;
    serde_json::to_string(&plan).map_err(to_napi_error)
}

#[napi]
pub fn default_assumptions() -> NapiResult<String> {
    serde_json::to_string(&Assumptions::default()).map_err(to_napi_error)
}
