use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortizeError;
use crate::AmortizeResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Rates and ratios expressed as percentages (3.5 = 3.5%).
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Decimal places carried by every reported monetary amount.
pub const MONEY_DP: u32 = 2;

/// Smallest reportable amount of money.
pub const ONE_CENT: Money = dec!(0.01);

/// Months in a year; loans accrue and pay monthly.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Round to whole cents, half away from zero.
pub fn round_money(value: Decimal) -> Money {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an annual percentage (3.5 = 3.5%) into a monthly decimal rate.
pub fn annual_percent_to_monthly_rate(annual_percent: Percent) -> Rate {
    annual_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

fn overflow(context: &str) -> AmortizeError {
    AmortizeError::FinancialImpossibility(format!("{context} overflows decimal precision"))
}

/// `lhs * rhs`, or `FinancialImpossibility` when the product does not fit.
pub fn checked_mul(lhs: Decimal, rhs: Decimal, context: &str) -> AmortizeResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow(context))
}

/// `lhs / rhs`. Callers rule out a zero divisor first.
pub fn checked_div(lhs: Decimal, rhs: Decimal, context: &str) -> AmortizeResult<Decimal> {
    if rhs.is_zero() {
        return Err(AmortizeError::DivisionByZero {
            context: context.into(),
        });
    }
    lhs.checked_div(rhs).ok_or_else(|| overflow(context))
}

pub fn checked_add(lhs: Decimal, rhs: Decimal, context: &str) -> AmortizeResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| overflow(context))
}

pub fn checked_sub(lhs: Decimal, rhs: Decimal, context: &str) -> AmortizeResult<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| overflow(context))
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

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn test_monthly_rate_from_percent() {
        assert_eq!(annual_percent_to_monthly_rate(dec!(3)), dec!(0.0025));
        assert!(annual_percent_to_monthly_rate(Decimal::ZERO).is_zero());
    }

    #[test]
    fn test_checked_ops_report_overflow() {
        assert_eq!(checked_mul(dec!(2), dec!(3), "x").unwrap(), dec!(6));
        assert!(matches!(
            checked_mul(Decimal::MAX, dec!(2), "x"),
            Err(AmortizeError::FinancialImpossibility(_))
        ));
        assert!(matches!(
            checked_div(dec!(1e20), dec!(1e-10), "x"),
            Err(AmortizeError::FinancialImpossibility(_))
        ));
        assert!(matches!(
            checked_div(dec!(1), Decimal::ZERO, "x"),
            Err(AmortizeError::DivisionByZero { .. })
        ));
        assert!(checked_add(Decimal::MAX, Decimal::ONE, "x").is_err());
        assert!(checked_sub(Decimal::MIN, Decimal::ONE, "x").is_err());
    }
}
