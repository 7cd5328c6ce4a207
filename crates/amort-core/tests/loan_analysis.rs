//! End-to-end analysis of the reference mortgage: loan construction,
//! closed-form engine, burn-down simulation, and scenario comparison all
//! telling the same story.

use amort_core::compare::{compare_scenarios, ScenarioSpec};
use amort_core::{engine, schedule, Loan, LoanRecord, PaymentFrequency};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn mortgage_analysis_end_to_end() {
    let loan = LoanRecord {
        name: "My Mortgage".into(),
        nominal_rate: dec!(0.0229),
        compounding_frequency: 2,
        payment_frequency: 52,
    }
    .into_loan()
    .unwrap();
    assert_eq!(loan.payment_frequency(), PaymentFrequency::Weekly);

    let principal = dec!(255675);

    // Closed-form payment for a 681-week payoff
    let payment = engine::payment(&loan, principal, 681).unwrap();
    assert!((payment - dec!(434.2914)).abs() < dec!(0.0001));

    // Inverting the payment recovers the payoff horizon
    assert_eq!(engine::payment_count(&loan, principal, payment).unwrap(), 681);

    // Borrowing capacity at that payment matches the principal
    let capacity = engine::max_principal(&loan, payment, 681).unwrap();
    assert!((capacity - principal).abs() < dec!(0.01));

    // Midpoint balance from the closed form agrees with the simulation
    let halfway = engine::remaining_balance(&loan, principal, payment, 340).unwrap();
    let burn = schedule::burn_down(&loan, principal, payment).unwrap().result;
    assert!((burn.rows[340].remainder - halfway).abs() < dec!(0.01));

    // The simulation retires the principal exactly
    assert_eq!(burn.total_principal_paid, principal);
    assert_eq!(burn.rows.last().unwrap().remainder, Decimal::ZERO);

    // Paying $700 instead of ~$434 roughly halves the payoff horizon
    let faster = ScenarioSpec {
        label: "pay 700".into(),
        principal,
        payment: dec!(700),
    };
    let baseline = ScenarioSpec {
        label: "pay closed-form".into(),
        principal,
        payment,
    };
    let report = compare_scenarios(&loan, &faster, &baseline).unwrap().result;
    assert_eq!(report.scenario_a.num_payments, 399);
    assert_eq!(report.scenario_b.num_payments, 681);
    assert_eq!(report.payments_saved, 282);
    assert!(report.interest_saved > Decimal::ZERO);

    // Partial payment count to the halfway balance agrees with the rows
    let to_half = engine::partial_payment_count(&loan, principal, principal / dec!(2), dec!(700))
        .unwrap();
    let burn_700 = schedule::burn_down(&loan, principal, dec!(700)).unwrap().result;
    assert!(burn_700.rows[to_half as usize].remainder <= principal / dec!(2));
    assert!(burn_700.rows[(to_half - 1) as usize].remainder > principal / dec!(2));
}

#[test]
fn what_if_rate_changes_flow_through_the_engine() {
    let mut loan = Loan::new("WhatIf", dec!(0.0229), 2, 52).unwrap();
    let weekly_payment = engine::payment(&loan, dec!(255675), 681).unwrap();

    loan.set_nominal_rate(dec!(0.0329)).unwrap();
    let costlier = engine::payment(&loan, dec!(255675), 681).unwrap();
    assert!(costlier > weekly_payment);

    loan.set_nominal_rate(Decimal::ZERO).unwrap();
    assert_eq!(
        engine::payment(&loan, dec!(255675), 681).unwrap(),
        dec!(255675) / dec!(681)
    );
}
