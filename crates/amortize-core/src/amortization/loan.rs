use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortizeError;
use crate::types::{
    annual_percent_to_monthly_rate, Money, Percent, Rate, MONEY_DP, MONTHS_PER_YEAR,
};
use crate::AmortizeResult;

/// Longest supported term. Keeps schedules small and their dates inside the calendar.
pub const MAX_TERM_YEARS: u32 = 100;

/// Terms of a fixed-rate, fully amortizing loan paid monthly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual nominal rate as a percentage (3.5 means 3.5%).
    pub annual_interest_rate_percent: Percent,
    /// Length of the loan in whole years.
    pub term_years: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_interest_rate_percent: Percent, term_years: u32) -> Self {
        Self {
            principal,
            annual_interest_rate_percent,
            term_years,
        }
    }

    /// Reject terms the payment formula cannot handle.
    pub fn validate(&self) -> AmortizeResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(AmortizeError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.principal.normalize().scale() > MONEY_DP {
            return Err(AmortizeError::InvalidInput {
                field: "principal".into(),
                reason: format!("Principal must be a whole number of cents, got {}", self.principal),
            });
        }
        if self.annual_interest_rate_percent < Decimal::ZERO {
            return Err(AmortizeError::InvalidInput {
                field: "annual_interest_rate_percent".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.term_years == 0 {
            return Err(AmortizeError::InvalidInput {
                field: "term_years".into(),
                reason: "Term must be at least 1 year".into(),
            });
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(AmortizeError::InvalidInput {
                field: "term_years".into(),
                reason: format!("Term cannot exceed {MAX_TERM_YEARS} years"),
            });
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> Rate {
        annual_percent_to_monthly_rate(self.annual_interest_rate_percent)
    }

    /// Total number of scheduled monthly payments.
    pub fn number_of_payments(&self) -> u32 {
        self.term_years.saturating_mul(MONTHS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_terms() {
        let terms = LoanTerms::new(dec!(300000), dec!(3.0), 30);
        assert!(terms.validate().is_ok());
        assert_eq!(terms.number_of_payments(), 360);
        assert_eq!(terms.monthly_rate(), dec!(0.0025));
    }

    #[test]
    fn test_zero_principal_rejected() {
        let terms = LoanTerms::new(Decimal::ZERO, dec!(3.0), 30);
        match terms.validate() {
            Err(AmortizeError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let terms = LoanTerms::new(dec!(1000), dec!(-0.5), 10);
        assert!(terms.validate().is_err());
    }

    #[test]
    fn test_zero_term_rejected() {
        let terms = LoanTerms::new(dec!(1000), dec!(4), 0);
        assert!(terms.validate().is_err());
    }

    #[test]
    fn test_term_beyond_limit_rejected() {
        assert!(LoanTerms::new(dec!(1000), Decimal::ZERO, MAX_TERM_YEARS).validate().is_ok());
        match LoanTerms::new(dec!(1000), Decimal::ZERO, 300_000_000).validate() {
            Err(AmortizeError::InvalidInput { field, .. }) => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_cent_principal_rejected() {
        assert!(LoanTerms::new(dec!(1000.005), dec!(5), 10).validate().is_err());
        // Trailing zeros are still whole cents
        assert!(LoanTerms::new(dec!(1000.500), dec!(5), 10).validate().is_ok());
    }

    #[test]
    fn test_zero_rate_allowed() {
        let terms = LoanTerms::new(dec!(1000), Decimal::ZERO, 1);
        assert!(terms.validate().is_ok());
        assert!(terms.monthly_rate().is_zero());
    }
}
