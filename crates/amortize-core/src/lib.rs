//! Fixed-rate loan amortization and financing metrics with decimal precision.
//!
//! ```
//! use amortize_core::amortization::payment::calculate_monthly_payment;
//! use rust_decimal_macros::dec;
//!
//! let payment = calculate_monthly_payment(dec!(300000), dec!(3.0), 30).unwrap();
//! assert_eq!(payment, dec!(1264.81));
//! ```

pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use error::AmortizeError;
pub use types::*;

/// Standard result type for all amortize operations
pub type AmortizeResult<T> = Result<T, AmortizeError>;
