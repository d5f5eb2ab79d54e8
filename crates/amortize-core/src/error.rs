use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortizeError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Additional payment for period {payment_number} is outside the loan term (1..={max})")]
    AdditionalPaymentOutOfRange { payment_number: u32, max: u32 },

    #[error("Duplicate additional payment for period {payment_number}")]
    DuplicateAdditionalPayment { payment_number: u32 },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AmortizeError {
    fn from(e: serde_json::Error) -> Self {
        AmortizeError::SerializationError(e.to_string())
    }
}
