//! The amortization engine: closed-form annuity formulas over a loan's
//! effective per-period rate.
//!
//! Every function is pure given the loan and its arguments, fails fast on
//! bad input, and branches explicitly to the straight-line form when the
//! effective rate is exactly zero instead of dividing by it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::AmortError;
use crate::loan::Loan;
use crate::types::Money;
use crate::AmortResult;

/// Guard against numeric noise pushing an exact payment count over the
/// next integer before the ceiling is taken.
const COUNT_CEIL_EPSILON: Decimal = dec!(0.000000001);

/// Periodic payment that retires `principal` in `num_payments` payments.
///
/// `Pn = P0 * i * (1+i)^n / ((1+i)^n - 1)`, or `P0 / n` straight-line when
/// the effective rate is zero.
pub fn payment(loan: &Loan, principal: Money, num_payments: u32) -> AmortResult<Money> {
    require_non_negative(principal, "principal")?;
    if num_payments == 0 {
        return Err(AmortError::InvalidInput {
            field: "num_payments".into(),
            reason: "must be a positive number of payments".into(),
        });
    }

    let i = loan.effective_rate();
    if i.is_zero() {
        return Ok(principal / Decimal::from(num_payments));
    }

    let growth = growth_factor(i, num_payments, "num_payments")?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(AmortError::DivisionDegenerate {
            context: "payment annuity factor".into(),
        });
    }
    Ok(principal * i * growth / denominator)
}

/// Number of payments of `payment` needed to retire `principal`, rounded
/// up (the final payment is partial).
///
/// `n = ceil(-ln(1 - P0*i/Pn) / ln(1+i))`. The payment must exceed the
/// interest accrued in the first period or the balance never shrinks;
/// that case is rejected as [`AmortError::NonAmortizing`] before any
/// logarithm is taken.
pub fn payment_count(loan: &Loan, principal: Money, payment: Money) -> AmortResult<u32> {
    require_non_negative(principal, "principal")?;
    require_positive(payment, "payment")?;
    if principal.is_zero() {
        return Ok(0);
    }

    let i = loan.effective_rate();
    if i.is_zero() {
        return ceil_count(principal / payment);
    }

    let first_period_interest = principal * i;
    if payment <= first_period_interest {
        return Err(AmortError::NonAmortizing {
            payment,
            first_period_interest,
        });
    }

    let numerator = -ln_positive(
        Decimal::ONE - first_period_interest / payment,
        "payment count numerator",
    )?;
    let denominator = ln_positive(Decimal::ONE + i, "payment count denominator")?;
    ceil_count(numerator / denominator)
}

/// Maximum principal that `num_payments` payments of `payment` can retire.
///
/// `P0 = Pn/i * (1 - (1+i)^-Np)`, or `Pn * Np` when the effective rate is
/// zero.
pub fn max_principal(loan: &Loan, payment: Money, num_payments: u32) -> AmortResult<Money> {
    require_positive(payment, "payment")?;
    if num_payments == 0 {
        return Err(AmortError::InvalidInput {
            field: "num_payments".into(),
            reason: "must be a positive number of payments".into(),
        });
    }

    let i = loan.effective_rate();
    if i.is_zero() {
        return Ok(payment * Decimal::from(num_payments));
    }

    let discount = (Decimal::ONE + i)
        .checked_powi(-i64::from(num_payments))
        .ok_or_else(|| AmortError::InvalidInput {
            field: "num_payments".into(),
            reason: format!("{num_payments} periods overflow the decimal range"),
        })?;
    Ok(payment / i * (Decimal::ONE - discount))
}

/// Balance remaining after `payments_made` payments of `payment`.
///
/// `Pr = P0*(1+i)^Np - (Pn/i)*((1+i)^Np - 1)`, or `P0 - Pn*Np` when the
/// effective rate is zero. This closed form is the authoritative balance;
/// the burn-down simulation calls it once per period rather than keeping
/// a running subtraction, so floating drift never accumulates. Past the
/// payoff point the value goes negative, exactly as the formula does.
pub fn remaining_balance(
    loan: &Loan,
    principal: Money,
    payment: Money,
    payments_made: u32,
) -> AmortResult<Money> {
    require_non_negative(principal, "principal")?;
    require_positive(payment, "payment")?;

    let i = loan.effective_rate();
    let np = Decimal::from(payments_made);
    if i.is_zero() {
        return Ok(principal - payment * np);
    }

    let growth = growth_factor(i, payments_made, "payments_made")?;
    Ok(principal * growth - payment / i * (growth - Decimal::ONE))
}

/// Number of payments of `payment` that move the balance from
/// `from_balance` down to `to_balance`, rounded up.
///
/// `n = ceil((ln(1 - P1*i/Pn) - ln(1 - P0*i/Pn)) / ln(1+i))`. The
/// non-amortizing precondition applies to both balances.
pub fn partial_payment_count(
    loan: &Loan,
    from_balance: Money,
    to_balance: Money,
    payment: Money,
) -> AmortResult<u32> {
    require_non_negative(from_balance, "from_balance")?;
    require_non_negative(to_balance, "to_balance")?;
    require_positive(payment, "payment")?;
    if to_balance > from_balance {
        return Err(AmortError::InvalidInput {
            field: "to_balance".into(),
            reason: "must not exceed from_balance".into(),
        });
    }
    if from_balance == to_balance {
        return Ok(0);
    }

    let i = loan.effective_rate();
    if i.is_zero() {
        return ceil_count((from_balance - to_balance) / payment);
    }

    for balance in [from_balance, to_balance] {
        let interest = balance * i;
        if payment <= interest {
            return Err(AmortError::NonAmortizing {
                payment,
                first_period_interest: interest,
            });
        }
    }

    let upper = ln_positive(
        Decimal::ONE - to_balance * i / payment,
        "partial payment count to-balance term",
    )?;
    let lower = ln_positive(
        Decimal::ONE - from_balance * i / payment,
        "partial payment count from-balance term",
    )?;
    let denominator = ln_positive(Decimal::ONE + i, "partial payment count denominator")?;
    ceil_count((upper - lower) / denominator)
}

/// `(1+i)^n`, with overflow surfaced as a typed error rather than a
/// rust_decimal panic for absurdly large period counts.
fn growth_factor(i: Decimal, periods: u32, field: &str) -> AmortResult<Decimal> {
    (Decimal::ONE + i)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| AmortError::InvalidInput {
            field: field.into(),
            reason: format!("{periods} periods overflow the decimal range"),
        })
}

fn require_positive(value: Decimal, field: &str) -> AmortResult<()> {
    if value <= Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: field.into(),
            reason: "must be positive".into(),
        });
    }
    Ok(())
}

fn require_non_negative(value: Decimal, field: &str) -> AmortResult<()> {
    if value < Decimal::ZERO {
        return Err(AmortError::InvalidInput {
            field: field.into(),
            reason: "must not be negative".into(),
        });
    }
    Ok(())
}

fn ln_positive(value: Decimal, context: &str) -> AmortResult<Decimal> {
    if value <= Decimal::ZERO {
        return Err(AmortError::DivisionDegenerate {
            context: context.into(),
        });
    }
    value
        .checked_ln()
        .ok_or_else(|| AmortError::DivisionDegenerate {
            context: context.into(),
        })
}

fn ceil_count(fractional: Decimal) -> AmortResult<u32> {
    let count = (fractional - COUNT_CEIL_EPSILON).ceil();
    count.to_u32().ok_or_else(|| AmortError::InvalidInput {
        field: "payment_count".into(),
        reason: format!("computed payment count {count} is out of range"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mortgage() -> Loan {
        // 2.29% compounded semi-annually, weekly payments
        Loan::new("My Mortgage", dec!(0.0229), 2, 52).unwrap()
    }

    fn car_loan() -> Loan {
        Loan::new("Car", dec!(0.05), 12, 12).unwrap()
    }

    fn interest_free() -> Loan {
        Loan::new("Family", Decimal::ZERO, 1, 12).unwrap()
    }

    #[test]
    fn payment_matches_reference_mortgage() {
        let pymt = payment(&mortgage(), dec!(255675), 681).unwrap();
        assert!((pymt - dec!(434.291372980)).abs() < dec!(0.000001));
    }

    #[test]
    fn payment_count_round_trips_through_payment() {
        let loan = car_loan();
        let pymt = payment(&loan, dec!(200000), 360).unwrap();
        assert_eq!(payment_count(&loan, dec!(200000), pymt).unwrap(), 360);

        let loan = mortgage();
        let pymt = payment(&loan, dec!(255675), 681).unwrap();
        assert_eq!(payment_count(&loan, dec!(255675), pymt).unwrap(), 681);
    }

    #[test]
    fn payment_count_rounds_partial_final_payment_up() {
        let loan = mortgage();
        assert_eq!(payment_count(&loan, dec!(255675), dec!(700)).unwrap(), 399);
    }

    #[test]
    fn payment_count_is_monotone_in_payment() {
        let loan = mortgage();
        let n700 = payment_count(&loan, dec!(255675), dec!(700)).unwrap();
        let n800 = payment_count(&loan, dec!(255675), dec!(800)).unwrap();
        let n900 = payment_count(&loan, dec!(255675), dec!(900)).unwrap();
        assert_eq!((n700, n800, n900), (399, 345, 304));
        assert!(n700 > n800 && n800 > n900);
    }

    #[test]
    fn non_amortizing_payment_is_rejected() {
        let loan = mortgage();
        let first_period_interest = dec!(255675) * loan.effective_rate();
        let err = payment_count(&loan, dec!(255675), first_period_interest).unwrap_err();
        assert!(matches!(err, AmortError::NonAmortizing { .. }));

        // One cent above the accrual amortizes, however slowly
        let slow = first_period_interest + dec!(0.01);
        assert!(payment_count(&loan, dec!(255675), slow).is_ok());
    }

    #[test]
    fn remaining_balance_of_exact_payment_is_zero() {
        let loan = mortgage();
        let principal = dec!(255675);
        let pymt = payment(&loan, principal, 681).unwrap();
        let residual = remaining_balance(&loan, principal, pymt, 681).unwrap();
        assert!(residual.abs() < principal * dec!(0.000001));
    }

    #[test]
    fn remaining_balance_after_zero_payments_is_the_principal() {
        let loan = mortgage();
        assert_eq!(
            remaining_balance(&loan, dec!(255675), dec!(700), 0).unwrap(),
            dec!(255675)
        );
    }

    #[test]
    fn max_principal_inverts_payment() {
        let loan = car_loan();
        let pymt = payment(&loan, dec!(200000), 360).unwrap();
        let back = max_principal(&loan, pymt, 360).unwrap();
        assert!((back - dec!(200000)).abs() < dec!(0.000001));
    }

    #[test]
    fn partial_payment_count_to_half_balance() {
        let loan = mortgage();
        let n = partial_payment_count(&loan, dec!(255675), dec!(127837.50), dec!(700)).unwrap();
        assert_eq!(n, 208);
    }

    #[test]
    fn partial_payment_count_checks_both_balances() {
        let loan = mortgage();
        // Payment covers interest at the target balance but not the start
        let payment = dec!(255675) * loan.effective_rate();
        let err = partial_payment_count(&loan, dec!(255675), dec!(1000), payment).unwrap_err();
        assert!(matches!(err, AmortError::NonAmortizing { .. }));
    }

    #[test]
    fn zero_rate_degenerates_to_straight_line() {
        let loan = interest_free();
        assert_eq!(payment(&loan, dec!(1200), 12).unwrap(), dec!(100));
        assert_eq!(payment_count(&loan, dec!(1000), dec!(300)).unwrap(), 4);
        assert_eq!(max_principal(&loan, dec!(250), 48).unwrap(), dec!(12000));
        assert_eq!(
            remaining_balance(&loan, dec!(1200), dec!(100), 5).unwrap(),
            dec!(700)
        );
        assert_eq!(
            partial_payment_count(&loan, dec!(1000), dec!(400), dec!(250)).unwrap(),
            3
        );
    }

    #[test]
    fn zero_principal_needs_no_payments() {
        let loan = mortgage();
        assert_eq!(payment_count(&loan, Decimal::ZERO, dec!(500)).unwrap(), 0);
    }

    #[test]
    fn absurd_period_counts_error_instead_of_overflowing() {
        let loan = mortgage();
        assert!(matches!(
            payment(&loan, dec!(1000), u32::MAX).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
        assert!(matches!(
            remaining_balance(&loan, dec!(1000), dec!(50), 2_000_000_000).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
        assert!(matches!(
            max_principal(&loan, dec!(50), u32::MAX).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
    }

    #[test]
    fn invalid_arguments_fail_fast() {
        let loan = mortgage();
        assert!(matches!(
            payment(&loan, dec!(-1), 12).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
        assert!(matches!(
            payment(&loan, dec!(1000), 0).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
        assert!(matches!(
            payment_count(&loan, dec!(1000), Decimal::ZERO).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
        assert!(matches!(
            max_principal(&loan, dec!(500), 0).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
        assert!(matches!(
            partial_payment_count(&loan, dec!(100), dec!(200), dec!(50)).unwrap_err(),
            AmortError::InvalidInput { .. }
        ));
    }
}
