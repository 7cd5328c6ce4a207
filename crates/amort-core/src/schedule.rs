//! Period-by-period burn-down of a loan balance.
//!
//! The simulation re-derives each period's remainder from the closed-form
//! balance in [`engine::remaining_balance`] instead of subtracting payments
//! from a running total, so the schedule stays consistent with the formulas
//! to the cent however many periods it runs.
//!
//! Accounting is cumulative: `principal_paid` and `interest_paid` in each
//! row are running totals, matching row 0 starting at zero. The final
//! period's payment is capped at the true payoff (remaining balance plus
//! one period of accrued interest), so the last remainder is exactly zero
//! and cumulative principal equals the starting principal exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::engine;
use crate::loan::Loan;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::AmortResult;

/// One period of the burn-down. Period 0 is the state before any payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnDownRow {
    /// Payment number, 0-indexed state row.
    pub period: u32,
    /// Amount actually paid this period (0 for period 0; the final period
    /// may be less than the regular payment).
    pub payment: Money,
    /// Balance remaining after this period's payment.
    pub remainder: Money,
    /// Cumulative principal retired through this period.
    pub principal_paid: Money,
    /// Cumulative interest paid through this period.
    pub interest_paid: Money,
}

/// Full burn-down of a loan at a fixed regular payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnDownOutput {
    /// Rows 0..=num_payments; row 0 holds the starting balance.
    pub rows: Vec<BurnDownRow>,
    /// Payments until payoff, final partial payment included.
    pub num_payments: u32,
    /// The capped final payment (equals the regular payment when the loan
    /// pays off exactly).
    pub final_payment: Money,
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
}

/// Simulate the burn-down of `principal` at a regular `payment`.
///
/// Fails with the same errors as [`engine::payment_count`]: invalid
/// arguments or a payment that never amortizes the balance.
pub fn burn_down(
    loan: &Loan,
    principal: Money,
    payment: Money,
) -> AmortResult<ComputationOutput<BurnDownOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let num_payments = engine::payment_count(loan, principal, payment)?;
    let i = loan.effective_rate();

    let mut rows = Vec::with_capacity(num_payments as usize + 1);
    rows.push(BurnDownRow {
        period: 0,
        payment: Decimal::ZERO,
        remainder: principal,
        principal_paid: Decimal::ZERO,
        interest_paid: Decimal::ZERO,
    });

    let mut principal_paid = Decimal::ZERO;
    let mut interest_paid = Decimal::ZERO;
    let mut previous = principal;
    let mut final_payment = Decimal::ZERO;

    for period in 1..=num_payments {
        let (paid, principal_step, interest_step, remainder) = if period == num_payments {
            // Payoff: settle the outstanding balance plus one period of
            // accrued interest instead of collecting the full payment.
            let interest_step = previous * i;
            (previous + interest_step, previous, interest_step, Decimal::ZERO)
        } else {
            let remainder = engine::remaining_balance(loan, principal, payment, period)?;
            let principal_step = previous - remainder;
            (payment, principal_step, payment - principal_step, remainder)
        };

        principal_paid += principal_step;
        interest_paid += interest_step;
        rows.push(BurnDownRow {
            period,
            payment: paid,
            remainder,
            principal_paid,
            interest_paid,
        });
        previous = remainder;
        final_payment = paid;
    }

    if num_payments > 0 && (payment - final_payment).abs() > dec!(0.01) {
        warnings.push(format!(
            "final payment {final_payment:.2} is partial (regular payment {payment:.2})"
        ));
    }

    let assumptions = serde_json::json!({
        "loan": loan,
        "principal": principal,
        "regular_payment": payment,
    });
    let result = BurnDownOutput {
        rows,
        num_payments,
        final_payment,
        total_principal_paid: principal_paid,
        total_interest_paid: interest_paid,
    };
    Ok(with_metadata(
        "Closed-form annuity remainder per period; cumulative principal/interest; final payment capped at payoff",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}
