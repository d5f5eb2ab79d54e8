use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AmortizeError;
use crate::types::*;
use crate::AmortizeResult;

/// Input for flat-payment loan cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCostInput {
    pub principal: Money,
    pub monthly_payment: Money,
    pub term_years: u32,
}

/// Flat-payment loan cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCostOutput {
    pub total_loan_cost: Money,
    pub total_interest_paid: Money,
}

/// Monthly payment times every month of the term.
///
/// Assumes the loan runs its full term; extra payments that retire the loan
/// early are not reflected. Use the schedule summary for the actual total.
pub fn calculate_total_loan_cost(monthly_payment: Money, term_years: u32) -> AmortizeResult<Money> {
    let months = u64::from(term_years) * u64::from(MONTHS_PER_YEAR);
    let total = checked_mul(monthly_payment, Decimal::from(months), "total loan cost")?;
    Ok(round_money(total))
}

/// Interest portion of a total loan cost.
pub fn calculate_total_interest_paid(total_loan_cost: Money, principal: Money) -> AmortizeResult<Money> {
    Ok(round_money(checked_sub(total_loan_cost, principal, "total interest paid")?))
}

/// Flat total cost and interest wrapped in the standard computation envelope.
pub fn calculate_loan_cost(
    input: &LoanCostInput,
) -> AmortizeResult<ComputationOutput<LoanCostOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.term_years == 0 {
        return Err(AmortizeError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    if input.monthly_payment < Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment cannot be negative".into(),
        });
    }
    if input.principal < Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }

    let total_loan_cost = calculate_total_loan_cost(input.monthly_payment, input.term_years)?;
    let total_interest_paid = calculate_total_interest_paid(total_loan_cost, input.principal)?;

    if total_interest_paid < Decimal::ZERO {
        warnings.push(format!(
            "Payments over the term ({total_loan_cost}) do not cover the principal ({})",
            input.principal
        ));
    }

    let output = LoanCostOutput {
        total_loan_cost,
        total_interest_paid,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat monthly payment over full term",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_loan_cost() {
        // 1264.81 * 360 = 455331.60
        assert_eq!(calculate_total_loan_cost(dec!(1264.81), 30).unwrap(), dec!(455331.60));
    }

    #[test]
    fn test_total_interest_paid() {
        assert_eq!(
            calculate_total_interest_paid(dec!(455331.60), dec!(300000)).unwrap(),
            dec!(155331.60)
        );
    }

    #[test]
    fn test_envelope() {
        let input = LoanCostInput {
            principal: dec!(100000),
            monthly_payment: dec!(739.69),
            term_years: 15,
        };
        let out = calculate_loan_cost(&input).unwrap();
        assert_eq!(out.result.total_loan_cost, dec!(133144.20));
        assert_eq!(out.result.total_interest_paid, dec!(33144.20));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_underpaying_loan_warns() {
        let input = LoanCostInput {
            principal: dec!(10000),
            monthly_payment: dec!(100),
            term_years: 1,
        };
        let out = calculate_loan_cost(&input).unwrap();
        assert_eq!(out.result.total_interest_paid, dec!(-8800));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_cost_overflow_is_an_error() {
        assert!(matches!(
            calculate_total_loan_cost(dec!(1e27), 30),
            Err(AmortizeError::FinancialImpossibility(_))
        ));
        let input = LoanCostInput {
            principal: dec!(1000),
            monthly_payment: dec!(1e27),
            term_years: 30,
        };
        assert!(calculate_loan_cost(&input).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = LoanCostInput {
            principal: dec!(1000),
            monthly_payment: dec!(100),
            term_years: 0,
        };
        assert!(calculate_loan_cost(&input).is_err());
        input.term_years = 1;
        input.monthly_payment = dec!(-1);
        assert!(calculate_loan_cost(&input).is_err());
    }
}
