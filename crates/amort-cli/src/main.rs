mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::burndown::BurndownArgs;
use commands::compare::CompareArgs;
use commands::engine::{BalanceArgs, MaxPrincipalArgs, PaymentArgs, PaymentCountArgs};
use commands::interactive::InteractiveArgs;
use commands::loans::LoansArgs;

/// Fixed-rate loan amortization analytics
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Fixed-rate loan amortization analytics",
    long_about = "A CLI for analyzing fixed-rate installment loans with decimal precision. \
                  Computes periodic payments, payoff horizons, borrowing capacity, \
                  remaining balances, period-by-period burn-downs, and scenario \
                  comparisons."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Periodic payment for a principal and payoff horizon
    Payment(PaymentArgs),
    /// Number of payments until payoff (or until a target balance)
    PaymentCount(PaymentCountArgs),
    /// Maximum borrowable principal for a payment and horizon
    MaxPrincipal(MaxPrincipalArgs),
    /// Remaining balance after a number of payments
    Balance(BalanceArgs),
    /// Full period-by-period burn-down schedule
    Burndown(BurndownArgs),
    /// Interest and time savings between two payment scenarios
    Compare(CompareArgs),
    /// List and validate a loan parameter table
    Loans(LoansArgs),
    /// Interactive numbered-menu analysis loop
    Interactive(InteractiveArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::engine::run_payment(args),
        Commands::PaymentCount(args) => commands::engine::run_payment_count(args),
        Commands::MaxPrincipal(args) => commands::engine::run_max_principal(args),
        Commands::Balance(args) => commands::engine::run_balance(args),
        Commands::Burndown(args) => commands::burndown::run_burndown(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Loans(args) => commands::loans::run_loans(args),
        Commands::Interactive(args) => {
            match commands::interactive::run_interactive(args, &cli.output) {
                Ok(()) => process::exit(0),
                Err(e) => {
                    eprintln!("{}: {}", "error".red().bold(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
