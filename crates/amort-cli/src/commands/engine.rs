use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amort_core::engine;

use super::loan_args::LoanArgs;

/// Arguments for the periodic payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Starting principal
    #[arg(long)]
    pub principal: Decimal,

    /// Number of payments until payoff
    #[arg(long)]
    pub payments: u32,
}

/// Arguments for the payment count calculation
#[derive(Args)]
pub struct PaymentCountArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Starting principal
    #[arg(long)]
    pub principal: Decimal,

    /// Regular payment amount
    #[arg(long)]
    pub payment: Decimal,

    /// Count payments down to this balance instead of full payoff
    #[arg(long)]
    pub to_balance: Option<Decimal>,
}

/// Arguments for the maximum principal calculation
#[derive(Args)]
pub struct MaxPrincipalArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Regular payment amount
    #[arg(long)]
    pub payment: Decimal,

    /// Number of payments available
    #[arg(long)]
    pub payments: u32,
}

/// Arguments for the remaining balance calculation
#[derive(Args)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Starting principal
    #[arg(long)]
    pub principal: Decimal,

    /// Regular payment amount
    #[arg(long)]
    pub payment: Decimal,

    /// Number of payments already made
    #[arg(long)]
    pub made: u32,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let payment = engine::payment(&loan, args.principal, args.payments)?;
    Ok(serde_json::json!({
        "loan": loan.name(),
        "effective_rate": loan.effective_rate(),
        "principal": args.principal,
        "num_payments": args.payments,
        "payment": payment,
    }))
}

pub fn run_payment_count(args: PaymentCountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let num_payments = match args.to_balance {
        Some(target) => {
            engine::partial_payment_count(&loan, args.principal, target, args.payment)?
        }
        None => engine::payment_count(&loan, args.principal, args.payment)?,
    };
    let per_year = Decimal::from(loan.payment_frequency().per_year());
    Ok(serde_json::json!({
        "loan": loan.name(),
        "effective_rate": loan.effective_rate(),
        "principal": args.principal,
        "regular_payment": args.payment,
        "to_balance": args.to_balance,
        "num_payments": num_payments,
        "years": Decimal::from(num_payments) / per_year,
    }))
}

pub fn run_max_principal(args: MaxPrincipalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let max_principal = engine::max_principal(&loan, args.payment, args.payments)?;
    Ok(serde_json::json!({
        "loan": loan.name(),
        "effective_rate": loan.effective_rate(),
        "regular_payment": args.payment,
        "num_payments": args.payments,
        "max_principal": max_principal,
    }))
}

pub fn run_balance(args: BalanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let remaining_balance =
        engine::remaining_balance(&loan, args.principal, args.payment, args.made)?;
    Ok(serde_json::json!({
        "loan": loan.name(),
        "effective_rate": loan.effective_rate(),
        "principal": args.principal,
        "regular_payment": args.payment,
        "payments_made": args.made,
        "remaining_balance": remaining_balance,
    }))
}
