use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let input: amortize_core::amortization::loan::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        amortize_core::amortization::payment::calculate_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: amortize_core::amortization::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortize_core::amortization::schedule::build_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Financing metrics
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_cost(input_json: String) -> NapiResult<String> {
    let input: amortize_core::metrics::cost::LoanCostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        amortize_core::metrics::cost::calculate_loan_cost(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn property_position(input_json: String) -> NapiResult<String> {
    let input: amortize_core::metrics::property::PropertyPositionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortize_core::metrics::property::calculate_property_position(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn break_even(input_json: String) -> NapiResult<String> {
    let input: amortize_core::metrics::break_even::BreakEvenInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        amortize_core::metrics::break_even::calculate_break_even(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
