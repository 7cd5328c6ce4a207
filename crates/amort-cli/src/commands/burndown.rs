use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use amort_core::schedule;
use amort_core::{LoanRecord, Money};

use super::loan_args::LoanArgs;
use crate::input;

/// Arguments for the burn-down schedule
#[derive(Args)]
pub struct BurndownArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Starting principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Regular payment amount
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Path to a JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Report totals only, without the per-period rows
    #[arg(long)]
    pub summary: bool,
}

/// JSON input shape for `amort burndown --input`.
#[derive(Deserialize)]
struct BurndownInput {
    loan: LoanRecord,
    principal: Money,
    payment: Money,
}

pub fn run_burndown(args: BurndownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (loan, principal, payment) = if let Some(ref path) = args.input {
        let spec: BurndownInput = input::file::read_json(path)?;
        (spec.loan.into_loan()?, spec.principal, spec.payment)
    } else if let Some(data) = input::stdin::read_piped()? {
        let spec: BurndownInput = serde_json::from_value(data)?;
        (spec.loan.into_loan()?, spec.principal, spec.payment)
    } else {
        let loan = args.loan.resolve()?;
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let payment = args
            .payment
            .ok_or("--payment is required (or provide --input)")?;
        (loan, principal, payment)
    };

    let output = schedule::burn_down(&loan, principal, payment)?;
    let mut value = serde_json::to_value(output)?;
    if args.summary {
        if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
            result.remove("rows");
        }
    }
    Ok(value)
}
