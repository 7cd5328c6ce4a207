use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortError {
    #[error("Unsupported payment frequency: {frequency} payments per year (expected 12, 26, or 52)")]
    UnsupportedFrequency { frequency: u32 },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Non-amortizing loan: payment {payment} does not exceed first-period interest {first_period_interest}"
    )]
    NonAmortizing {
        payment: Decimal,
        first_period_interest: Decimal,
    },

    #[error("Degenerate division in {context}: zero-rate inputs must take the straight-line branch")]
    DivisionDegenerate { context: String },
}
