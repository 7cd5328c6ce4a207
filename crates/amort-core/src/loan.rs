//! The Loan value type: nominal rate parameters plus the derived
//! per-period effective rate.
//!
//! A `Loan` carries no balance and no schedule state; it only describes
//! the rate environment. The effective rate is derived from the nominal
//! triple and recomputed whenever a setter changes one of its inputs, so
//! it can never be stale.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::AmortError;
use crate::types::{PaymentFrequency, Rate};
use crate::AmortResult;

/// A fixed-rate installment loan.
///
/// Immutable for the duration of an analysis; the rate setters exist for
/// what-if reuse of the same value across scenarios and atomically
/// recompute [`effective_rate`](Loan::effective_rate).
#[derive(Debug, Clone, Serialize)]
pub struct Loan {
    name: String,
    nominal_rate: Rate,
    compounding_frequency: u32,
    payment_frequency: PaymentFrequency,
    effective_rate: Rate,
}

impl Loan {
    /// Construct a loan from its nominal parameters.
    ///
    /// `payments_per_year` must be 12, 26, or 52; anything else fails with
    /// [`AmortError::UnsupportedFrequency`]. A zero `compounding_frequency`
    /// or a nominal rate at or below -100% per compounding period is
    /// rejected as invalid input.
    pub fn new(
        name: impl Into<String>,
        nominal_rate: Rate,
        compounding_frequency: u32,
        payments_per_year: u32,
    ) -> AmortResult<Self> {
        let payment_frequency = PaymentFrequency::try_from(payments_per_year)?;
        if compounding_frequency == 0 {
            return Err(AmortError::InvalidInput {
                field: "compounding_frequency".into(),
                reason: "must be a positive number of compoundings per year".into(),
            });
        }
        let effective_rate =
            derive_effective_rate(nominal_rate, compounding_frequency, payment_frequency)?;
        Ok(Self {
            name: name.into(),
            nominal_rate,
            compounding_frequency,
            payment_frequency,
            effective_rate,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Annual nominal interest rate (0 = interest-free).
    pub fn nominal_rate(&self) -> Rate {
        self.nominal_rate
    }

    /// Times interest compounds per year.
    pub fn compounding_frequency(&self) -> u32 {
        self.compounding_frequency
    }

    pub fn payment_frequency(&self) -> PaymentFrequency {
        self.payment_frequency
    }

    /// Effective per-period rate: `(1 + r/n_r)^(n_r/n_p) - 1`.
    ///
    /// Always consistent with the current nominal triple.
    pub fn effective_rate(&self) -> Rate {
        self.effective_rate
    }

    /// Change the nominal rate, recomputing the effective rate.
    pub fn set_nominal_rate(&mut self, nominal_rate: Rate) -> AmortResult<()> {
        self.effective_rate =
            derive_effective_rate(nominal_rate, self.compounding_frequency, self.payment_frequency)?;
        self.nominal_rate = nominal_rate;
        Ok(())
    }

    /// Change the compounding frequency, recomputing the effective rate.
    pub fn set_compounding_frequency(&mut self, compounding_frequency: u32) -> AmortResult<()> {
        if compounding_frequency == 0 {
            return Err(AmortError::InvalidInput {
                field: "compounding_frequency".into(),
                reason: "must be a positive number of compoundings per year".into(),
            });
        }
        self.effective_rate =
            derive_effective_rate(self.nominal_rate, compounding_frequency, self.payment_frequency)?;
        self.compounding_frequency = compounding_frequency;
        Ok(())
    }

    /// Change the payment frequency, recomputing the effective rate.
    pub fn set_payment_frequency(&mut self, payments_per_year: u32) -> AmortResult<()> {
        let payment_frequency = PaymentFrequency::try_from(payments_per_year)?;
        self.effective_rate =
            derive_effective_rate(self.nominal_rate, self.compounding_frequency, payment_frequency)?;
        self.payment_frequency = payment_frequency;
        Ok(())
    }
}

/// `i = (1 + r/n_r)^(n_r/n_p) - 1`, with the zero-rate case short-circuited
/// so an interest-free loan yields exactly zero.
fn derive_effective_rate(
    nominal_rate: Rate,
    compounding_frequency: u32,
    payment_frequency: PaymentFrequency,
) -> AmortResult<Rate> {
    if nominal_rate.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let n_r = Decimal::from(compounding_frequency);
    let n_p = Decimal::from(payment_frequency.per_year());
    let base = Decimal::ONE + nominal_rate / n_r;
    if base <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: "nominal_rate".into(),
            reason: "rate per compounding period must exceed -100%".into(),
        });
    }
    let grown = base
        .checked_powd(n_r / n_p)
        .ok_or_else(|| AmortError::DivisionDegenerate {
            context: "effective rate exponentiation".into(),
        })?;
    Ok(grown - Decimal::ONE)
}

/// One row of the tabular loan parameter source.
///
/// Column names match the CSV header the CLI reads; `into_loan` applies
/// the same validation as [`Loan::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub name: String,
    pub nominal_rate: Rate,
    pub compounding_frequency: u32,
    pub payment_frequency: u32,
}

impl LoanRecord {
    pub fn into_loan(self) -> AmortResult<Loan> {
        Loan::new(
            self.name,
            self.nominal_rate,
            self.compounding_frequency,
            self.payment_frequency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn effective_rate_matches_reference_mortgage() {
        // 2.29% compounded semi-annually, paid weekly
        let loan = Loan::new("My Mortgage", dec!(0.0229), 2, 52).unwrap();
        let expected = dec!(0.000437978);
        assert!((loan.effective_rate() - expected).abs() < dec!(0.000000001));
    }

    #[test]
    fn effective_rate_equals_periodic_rate_when_frequencies_match() {
        // r/12 exactly when compounding and payment cadence coincide
        let loan = Loan::new("Car", dec!(0.05), 12, 12).unwrap();
        let expected = dec!(0.05) / dec!(12);
        assert!((loan.effective_rate() - expected).abs() < dec!(0.000000000001));
    }

    #[test]
    fn zero_rate_loan_has_exactly_zero_effective_rate() {
        let loan = Loan::new("Family", Decimal::ZERO, 1, 12).unwrap();
        assert_eq!(loan.effective_rate(), Decimal::ZERO);
    }

    #[test]
    fn rejects_unsupported_payment_frequency() {
        let err = Loan::new("Odd", dec!(0.05), 12, 7).unwrap_err();
        assert!(matches!(err, AmortError::UnsupportedFrequency { frequency: 7 }));
    }

    #[test]
    fn rejects_zero_compounding_frequency() {
        let err = Loan::new("Odd", dec!(0.05), 0, 12).unwrap_err();
        assert!(matches!(err, AmortError::InvalidInput { .. }));
    }

    #[test]
    fn setters_keep_effective_rate_consistent() {
        let mut loan = Loan::new("WhatIf", dec!(0.0229), 2, 52).unwrap();
        let weekly = loan.effective_rate();

        loan.set_payment_frequency(12).unwrap();
        let monthly = loan.effective_rate();
        assert!(monthly > weekly);

        loan.set_nominal_rate(dec!(0.03)).unwrap();
        assert!(loan.effective_rate() > monthly);

        loan.set_compounding_frequency(12).unwrap();
        let fresh = Loan::new("WhatIf", dec!(0.03), 12, 12).unwrap();
        assert_eq!(loan.effective_rate(), fresh.effective_rate());
    }

    #[test]
    fn failed_setter_leaves_loan_unchanged() {
        let mut loan = Loan::new("WhatIf", dec!(0.0229), 2, 52).unwrap();
        let before = loan.effective_rate();
        assert!(loan.set_payment_frequency(7).is_err());
        assert_eq!(loan.payment_frequency(), PaymentFrequency::Weekly);
        assert_eq!(loan.effective_rate(), before);
    }

    #[test]
    fn record_converts_into_loan() {
        let record = LoanRecord {
            name: "My Mortgage".into(),
            nominal_rate: dec!(0.0229),
            compounding_frequency: 2,
            payment_frequency: 52,
        };
        let loan = record.into_loan().unwrap();
        assert_eq!(loan.name(), "My Mortgage");
        assert_eq!(loan.payment_frequency(), PaymentFrequency::Weekly);
    }
}
