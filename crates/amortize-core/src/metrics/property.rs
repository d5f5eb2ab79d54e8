use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AmortizeError;
use crate::types::*;
use crate::AmortizeResult;

/// LTV above which lenders typically require mortgage insurance.
const HIGH_LTV_PERCENT: Percent = dec!(80);

/// Input for a property's financing position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyPositionInput {
    pub property_value: Money,
    pub loan_balance: Money,
}

/// Loan-to-value and equity for a financed property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyPositionOutput {
    pub loan_to_value_percent: Percent,
    pub equity: Money,
}

/// Loan amount as a percentage of property value, rounded to 2 dp.
///
/// A zero or negative property value yields 0 rather than an error.
pub fn calculate_loan_to_value_ratio(
    loan_amount: Money,
    property_value: Money,
) -> AmortizeResult<Percent> {
    if property_value <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let ratio = checked_div(loan_amount, property_value, "loan-to-value ratio")?;
    Ok(round_money(checked_mul(ratio, dec!(100), "loan-to-value ratio")?))
}

/// Property value less the outstanding loan; negative when underwater.
pub fn calculate_equity(property_value: Money, loan_balance: Money) -> AmortizeResult<Money> {
    Ok(round_money(checked_sub(property_value, loan_balance, "equity")?))
}

/// LTV and equity wrapped in the standard computation envelope.
pub fn calculate_property_position(
    input: &PropertyPositionInput,
) -> AmortizeResult<ComputationOutput<PropertyPositionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.loan_balance < Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "loan_balance".into(),
            reason: "Loan balance cannot be negative".into(),
        });
    }

    let loan_to_value_percent =
        calculate_loan_to_value_ratio(input.loan_balance, input.property_value)?;
    let equity = calculate_equity(input.property_value, input.loan_balance)?;

    if input.property_value <= Decimal::ZERO {
        warnings.push("Property value is not positive; LTV reported as 0".into());
    } else if loan_to_value_percent > HIGH_LTV_PERCENT {
        warnings.push(format!(
            "LTV of {loan_to_value_percent}% exceeds {HIGH_LTV_PERCENT}%"
        ));
    }
    if equity < Decimal::ZERO {
        warnings.push(format!("Negative equity: loan exceeds property value by {}", -equity));
    }

    let output = PropertyPositionOutput {
        loan_to_value_percent,
        equity,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan-to-value and equity",
        input,
        warnings,
        elapsed,
        output,
    ))
}
