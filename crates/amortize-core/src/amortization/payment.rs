use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::loan::LoanTerms;
use crate::time_value;
use crate::types::*;
use crate::AmortizeResult;

/// Output of the monthly payment calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPaymentOutput {
    /// Fixed monthly payment, rounded to cents
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    /// Monthly decimal rate applied to the outstanding balance
    pub monthly_rate: Rate,
}

/// Fixed monthly payment that fully repays `terms` over its term, rounded to cents.
///
/// Uses the annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)`, falling back to
/// straight division `P / n` for interest-free loans.
///
/// If rounding leaves the payment at or below the first period's interest, the
/// loan could never amortize, so the payment becomes that interest plus one cent.
pub fn monthly_payment(terms: &LoanTerms) -> AmortizeResult<Money> {
    terms.validate()?;
    let rate = terms.monthly_rate();
    let payment = round_money(-time_value::pmt(
        rate,
        terms.number_of_payments(),
        terms.principal,
        Decimal::ZERO,
    )?);

    let first_interest = round_money(checked_mul(terms.principal, rate, "first period interest")?);
    if payment <= first_interest {
        let raised = checked_add(first_interest, ONE_CENT, "minimum payment")?;
        debug!(
            rounded = %payment,
            first_interest = %first_interest,
            raised = %raised,
            "rounded payment does not reduce principal"
        );
        return Ok(raised);
    }
    Ok(payment)
}

/// Convenience form of [`monthly_payment`] taking the loan terms positionally.
pub fn calculate_monthly_payment(
    principal: Money,
    annual_interest_rate_percent: Percent,
    term_years: u32,
) -> AmortizeResult<Money> {
    monthly_payment(&LoanTerms::new(
        principal,
        annual_interest_rate_percent,
        term_years,
    ))
}

/// Monthly payment wrapped in the standard computation envelope.
pub fn calculate_payment(
    terms: &LoanTerms,
) -> AmortizeResult<ComputationOutput<MonthlyPaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment = monthly_payment(terms)?;
    if terms.annual_interest_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payment is principal divided evenly over the term".into());
    }

    let output = MonthlyPaymentOutput {
        monthly_payment: payment,
        number_of_payments: terms.number_of_payments(),
        monthly_rate: terms.monthly_rate(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity payment",
        terms,
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
    fn test_thirty_year_mortgage() {
        let payment = calculate_monthly_payment(dec!(300000), dec!(3.0), 30).unwrap();
        assert_eq!(payment, dec!(1264.81));
    }

    #[test]
    fn test_fifteen_year_loan() {
        // 100k at 4% over 180 months ≈ 739.69
        let payment = calculate_monthly_payment(dec!(100000), dec!(4.0), 15).unwrap();
        assert_eq!(payment, dec!(739.69));
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let payment = calculate_monthly_payment(dec!(12000), Decimal::ZERO, 1).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_zero_rate_rounds_to_cents() {
        // 10000 / 36 = 277.777...
        let payment = calculate_monthly_payment(dec!(10000), Decimal::ZERO, 3).unwrap();
        assert_eq!(payment, dec!(277.78));
    }

    #[test]
    fn test_payment_always_reduces_principal() {
        // Exact payment is about 25.0035, which rounds down to the 25.00 of interest
        let payment = calculate_monthly_payment(dec!(1000), dec!(30), 30).unwrap();
        assert_eq!(payment, dec!(25.01));

        // 0.01 over 360 interest-free months rounds to zero
        let payment = calculate_monthly_payment(dec!(0.01), Decimal::ZERO, 30).unwrap();
        assert_eq!(payment, dec!(0.01));
    }

    #[test]
    fn test_overflowing_principal_is_an_error() {
        assert!(matches!(
            calculate_monthly_payment(dec!(1e28), dec!(12), 30),
            Err(crate::AmortizeError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_invalid_terms_rejected() {
        assert!(calculate_monthly_payment(dec!(-5), dec!(3), 30).is_err());
        assert!(calculate_monthly_payment(dec!(1000), dec!(3), 0).is_err());
        assert!(calculate_monthly_payment(dec!(1000), dec!(-1), 30).is_err());
    }

    #[test]
    fn test_envelope_warns_on_zero_rate() {
        let out = calculate_payment(&LoanTerms::new(dec!(1200), Decimal::ZERO, 1)).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(100));
        assert_eq!(out.result.number_of_payments, 12);
        assert_eq!(out.warnings.len(), 1);
    }
}
