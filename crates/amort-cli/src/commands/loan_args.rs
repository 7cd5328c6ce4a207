use clap::Args;
use rust_decimal::Decimal;

use amort_core::Loan;

use crate::input;

/// Loan selection flags shared by every analysis subcommand: either the
/// rate parameters inline, or a row picked from a loan table CSV.
#[derive(Args)]
pub struct LoanArgs {
    /// Label for an inline loan scenario
    #[arg(long, default_value = "scenario")]
    pub name: String,

    /// Annual nominal interest rate (e.g. 0.0229 for 2.29%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Times interest compounds per year
    #[arg(long, default_value = "12")]
    pub compounding: u32,

    /// Payments per year: 12 (monthly), 26 (bi-weekly), or 52 (weekly)
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Path to a loan table CSV (name,nominal_rate,compounding_frequency,payment_frequency)
    #[arg(long)]
    pub loans: Option<String>,

    /// Name of the loan to pick from the --loans table
    #[arg(long)]
    pub loan: Option<String>,
}

impl LoanArgs {
    pub fn resolve(&self) -> Result<Loan, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.loans {
            let name = self
                .loan
                .as_deref()
                .ok_or("--loan NAME is required with --loans")?;
            let records = input::loans_csv::read_loans(path)?;
            let record = records
                .into_iter()
                .find(|r| r.name == name)
                .ok_or_else(|| format!("no loan named '{name}' in {path}"))?;
            Ok(record.into_loan()?)
        } else {
            let rate = self
                .rate
                .ok_or("--rate is required (or provide --loans/--loan)")?;
            let frequency = self
                .frequency
                .ok_or("--frequency is required (or provide --loans/--loan)")?;
            Ok(Loan::new(self.name.clone(), rate, self.compounding, frequency)?)
        }
    }
}
