use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use amort_core::compare::{compare_scenarios, ScenarioSpec};
use amort_core::LoanRecord;

use super::loan_args::LoanArgs;
use crate::input;

/// Arguments for the two-scenario savings report
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Principal for scenario A
    #[arg(long)]
    pub principal_a: Option<Decimal>,

    /// Regular payment for scenario A
    #[arg(long)]
    pub payment_a: Option<Decimal>,

    /// Principal for scenario B (defaults to scenario A's principal)
    #[arg(long)]
    pub principal_b: Option<Decimal>,

    /// Regular payment for scenario B
    #[arg(long)]
    pub payment_b: Option<Decimal>,

    /// Label for scenario A
    #[arg(long, default_value = "scenario A")]
    pub label_a: String,

    /// Label for scenario B
    #[arg(long, default_value = "scenario B")]
    pub label_b: String,

    /// Path to a JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// JSON input shape for `amort compare --input`.
#[derive(Deserialize)]
struct CompareInput {
    loan: LoanRecord,
    scenario_a: ScenarioSpec,
    scenario_b: ScenarioSpec,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (loan, a, b) = if let Some(ref path) = args.input {
        let spec: CompareInput = input::file::read_json(path)?;
        (spec.loan.into_loan()?, spec.scenario_a, spec.scenario_b)
    } else if let Some(data) = input::stdin::read_piped()? {
        let spec: CompareInput = serde_json::from_value(data)?;
        (spec.loan.into_loan()?, spec.scenario_a, spec.scenario_b)
    } else {
        let loan = args.loan.resolve()?;
        let principal_a = args
            .principal_a
            .ok_or("--principal-a is required (or provide --input)")?;
        let payment_a = args
            .payment_a
            .ok_or("--payment-a is required (or provide --input)")?;
        let payment_b = args
            .payment_b
            .ok_or("--payment-b is required (or provide --input)")?;
        let a = ScenarioSpec {
            label: args.label_a,
            principal: principal_a,
            payment: payment_a,
        };
        let b = ScenarioSpec {
            label: args.label_b,
            principal: args.principal_b.unwrap_or(principal_a),
            payment: payment_b,
        };
        (loan, a, b)
    };

    let report = compare_scenarios(&loan, &a, &b)?;
    Ok(serde_json::to_value(report)?)
}
