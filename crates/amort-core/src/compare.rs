//! Scenario comparison: interest and time savings between two payment
//! scenarios against the same rate environment.
//!
//! Pure aggregation over two burn-downs; no new math.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::Loan;
use crate::schedule;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::AmortResult;

/// One payment scenario to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub label: String,
    pub principal: Money,
    pub payment: Money,
}

/// Summary of a single scenario's burn-down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub label: String,
    pub principal: Money,
    pub payment: Money,
    pub num_payments: u32,
    pub final_payment: Money,
    pub total_interest_paid: Money,
    /// Payoff duration in years at the loan's payment frequency.
    pub years: Decimal,
}

/// Savings of scenario A relative to scenario B.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub effective_rate: Rate,
    pub scenario_a: ScenarioSummary,
    pub scenario_b: ScenarioSummary,
    /// `b - a`: positive means scenario A pays less interest.
    pub interest_saved: Money,
    /// `b - a`: positive means scenario A finishes in fewer payments.
    pub payments_saved: i64,
    pub years_saved: Decimal,
}

/// Compare two payment scenarios under the same loan.
pub fn compare_scenarios(
    loan: &Loan,
    a: &ScenarioSpec,
    b: &ScenarioSpec,
) -> AmortResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let burn_a = schedule::burn_down(loan, a.principal, a.payment)?;
    let burn_b = schedule::burn_down(loan, b.principal, b.payment)?;
    warnings.extend(burn_a.warnings);
    warnings.extend(burn_b.warnings);

    let per_year = Decimal::from(loan.payment_frequency().per_year());
    let summarize = |spec: &ScenarioSpec, out: &schedule::BurnDownOutput| ScenarioSummary {
        label: spec.label.clone(),
        principal: spec.principal,
        payment: spec.payment,
        num_payments: out.num_payments,
        final_payment: out.final_payment,
        total_interest_paid: out.total_interest_paid,
        years: Decimal::from(out.num_payments) / per_year,
    };
    let scenario_a = summarize(a, &burn_a.result);
    let scenario_b = summarize(b, &burn_b.result);

    let result = ComparisonOutput {
        effective_rate: loan.effective_rate(),
        interest_saved: scenario_b.total_interest_paid - scenario_a.total_interest_paid,
        payments_saved: i64::from(scenario_b.num_payments) - i64::from(scenario_a.num_payments),
        years_saved: scenario_b.years - scenario_a.years,
        scenario_a,
        scenario_b,
    };

    let assumptions = serde_json::json!({
        "loan": loan,
        "scenario_a": a,
        "scenario_b": b,
    });
    Ok(with_metadata(
        "Burn-down of both scenarios; savings reported as scenario B minus scenario A",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}
