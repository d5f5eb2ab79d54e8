use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AmortizeError;
use crate::types::{checked_add, checked_div, checked_mul, Money, Rate};
use crate::AmortizeResult;

/// Compound growth factor (1 + rate)^nper, erroring instead of overflowing.
pub fn compound_factor(rate: Rate, nper: u32) -> AmortizeResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            AmortizeError::FinancialImpossibility(format!(
                "(1 + {rate})^{nper} overflows decimal precision"
            ))
        })
}

/// Payment (PMT). Cash paid out is negative, matching spreadsheet conventions.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> AmortizeResult<Money> {
    if nper == 0 {
        return Err(AmortizeError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        let total = checked_add(present_value, future_value, "PMT balance")?;
        return Ok(-total / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let annuity_factor = checked_div(factor - Decimal::ONE, rate, "PMT annuity factor")?;
    let grown = checked_mul(present_value, factor, "PMT compounded balance")?;
    let owed = checked_add(grown, future_value, "PMT compounded balance")?;

    Ok(-checked_div(owed, annuity_factor, "PMT annuity factor")?)
}
