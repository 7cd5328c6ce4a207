pub mod engine;
pub mod error;
pub mod loan;
pub mod schedule;
pub mod types;

#[cfg(feature = "compare")]
pub mod compare;

pub use error::AmortError;
pub use loan::{Loan, LoanRecord};
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortResult<T> = Result<T, AmortError>;
