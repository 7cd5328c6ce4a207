use clap::Args;
use serde_json::Value;

use crate::input;

/// Arguments for listing a loan parameter table
#[derive(Args)]
pub struct LoansArgs {
    /// Path to the loan table CSV
    #[arg(long)]
    pub loans: String,
}

/// List every loan in the table with its derived effective rate.
///
/// Construction is the validation: a row with an unsupported payment
/// frequency or a bad rate fails the whole listing with the row's name
/// in the error.
pub fn run_loans(args: LoansArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = input::loans_csv::read_loans(&args.loans)?;
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let loan = record
            .clone()
            .into_loan()
            .map_err(|e| format!("loan '{}': {}", record.name, e))?;
        rows.push(serde_json::json!({
            "name": loan.name(),
            "nominal_rate": loan.nominal_rate(),
            "compounding_frequency": loan.compounding_frequency(),
            "payment_frequency": loan.payment_frequency().per_year(),
            "cadence": loan.payment_frequency().label(),
            "effective_rate": loan.effective_rate(),
        }));
    }
    Ok(Value::Array(rows))
}
