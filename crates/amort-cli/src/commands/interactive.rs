//! Interactive numbered-menu loop.
//!
//! A thin prompt layer over the library: it collects numbers, calls the
//! engine, and prints through the shared output formatters. Engine errors
//! are printed and the loop re-prompts; nothing in the core ever prints
//! or terminates the process.

use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

use amort_core::compare::{compare_scenarios, ScenarioSpec};
use amort_core::{schedule, Loan, LoanRecord};

use crate::{output, OutputFormat};

/// Arguments for the interactive loop
#[derive(Args)]
pub struct InteractiveArgs {
    /// Loan table CSV to offer in the menu
    #[arg(long)]
    pub loans: Option<String>,
}

/// The numbered menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Quit,
    Help,
    ListLoans,
    BurnDown,
    Compare,
}

impl TryFrom<u32> for MenuAction {
    type Error = u32;

    fn try_from(choice: u32) -> Result<Self, Self::Error> {
        match choice {
            0 => Ok(MenuAction::Quit),
            1 => Ok(MenuAction::Help),
            2 => Ok(MenuAction::ListLoans),
            3 => Ok(MenuAction::BurnDown),
            4 => Ok(MenuAction::Compare),
            other => Err(other),
        }
    }
}

pub fn run_interactive(
    args: InteractiveArgs,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = match args.loans {
        Some(ref path) => crate::input::loans_csv::read_loans(path)?,
        None => Vec::new(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print_help();

    loop {
        let Some(line) = prompt(&mut lines, "amort> ")? else {
            break;
        };
        let choice: u32 = match line.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("enter a number between 0 and 4");
                continue;
            }
        };
        let action = match MenuAction::try_from(choice) {
            Ok(action) => action,
            Err(other) => {
                eprintln!("unknown action {other}; enter a number between 0 and 4");
                continue;
            }
        };

        match action {
            MenuAction::Quit => {
                println!("Goodbye!");
                break;
            }
            MenuAction::Help => print_help(),
            MenuAction::ListLoans => {
                if records.is_empty() {
                    eprintln!("no loan table loaded; start with --loans <csv>");
                } else {
                    for (idx, record) in records.iter().enumerate() {
                        println!(
                            "{:>3}. {} (rate {}, {} payments/yr)",
                            idx + 1,
                            record.name,
                            record.nominal_rate,
                            record.payment_frequency
                        );
                    }
                }
            }
            MenuAction::BurnDown => match run_burn_down(&mut lines, &records, format) {
                Ok(()) => {}
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            },
            MenuAction::Compare => match run_compare(&mut lines, &records, format) {
                Ok(()) => {}
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            },
        }
    }

    Ok(())
}

fn print_help() {
    println!("Actions:");
    println!("  0  quit");
    println!("  1  help");
    println!("  2  list loans");
    println!("  3  burn-down analysis");
    println!("  4  compare two payment scenarios");
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

/// Print a prompt and read one line; None on end of input.
fn prompt(lines: &mut Lines<'_>, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn prompt_decimal(lines: &mut Lines<'_>, label: &str) -> Result<Decimal, Box<dyn std::error::Error>> {
    let line = prompt(lines, label)?.ok_or("unexpected end of input")?;
    Ok(line.trim().parse()?)
}

fn prompt_u32(lines: &mut Lines<'_>, label: &str) -> Result<u32, Box<dyn std::error::Error>> {
    let line = prompt(lines, label)?.ok_or("unexpected end of input")?;
    Ok(line.trim().parse()?)
}

/// Pick a loan from the table by number, or build one from prompted
/// parameters when no table is loaded.
fn select_loan(
    lines: &mut Lines<'_>,
    records: &[LoanRecord],
) -> Result<Loan, Box<dyn std::error::Error>> {
    if records.is_empty() {
        let rate = prompt_decimal(lines, "annual nominal rate (e.g. 0.0229): ")?;
        let compounding = prompt_u32(lines, "compoundings per year: ")?;
        let frequency = prompt_u32(lines, "payments per year (12/26/52): ")?;
        return Ok(Loan::new("scenario", rate, compounding, frequency)?);
    }

    for (idx, record) in records.iter().enumerate() {
        println!("{:>3}. {}", idx + 1, record.name);
    }
    let pick = prompt_u32(lines, "loan #: ")? as usize;
    let record = records
        .get(pick.wrapping_sub(1))
        .ok_or_else(|| format!("no loan #{pick}"))?;
    Ok(record.clone().into_loan()?)
}

fn run_burn_down(
    lines: &mut Lines<'_>,
    records: &[LoanRecord],
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let loan = select_loan(lines, records)?;
    let principal = prompt_decimal(lines, "starting principal: ")?;
    let payment = prompt_decimal(lines, "regular payment: ")?;
    let report = schedule::burn_down(&loan, principal, payment)?;
    output::format_output(format, &serde_json::to_value(report)?);
    Ok(())
}

fn run_compare(
    lines: &mut Lines<'_>,
    records: &[LoanRecord],
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let loan = select_loan(lines, records)?;
    let principal = prompt_decimal(lines, "starting principal: ")?;
    let payment_a = prompt_decimal(lines, "scenario A payment: ")?;
    let payment_b = prompt_decimal(lines, "scenario B payment: ")?;
    let a = ScenarioSpec {
        label: "scenario A".into(),
        principal,
        payment: payment_a,
    };
    let b = ScenarioSpec {
        label: "scenario B".into(),
        principal,
        payment: payment_b,
    };
    let report = compare_scenarios(&loan, &a, &b)?;
    output::format_output(format, &serde_json::to_value(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_actions_map_from_their_numbers() {
        assert_eq!(MenuAction::try_from(0).unwrap(), MenuAction::Quit);
        assert_eq!(MenuAction::try_from(1).unwrap(), MenuAction::Help);
        assert_eq!(MenuAction::try_from(2).unwrap(), MenuAction::ListLoans);
        assert_eq!(MenuAction::try_from(3).unwrap(), MenuAction::BurnDown);
        assert_eq!(MenuAction::try_from(4).unwrap(), MenuAction::Compare);
    }

    #[test]
    fn out_of_range_choices_are_rejected() {
        assert_eq!(MenuAction::try_from(5), Err(5));
        assert_eq!(MenuAction::try_from(99), Err(99));
    }
}
