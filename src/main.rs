//! # withholding CLI entry point
//!
//! Prints the paycheck comparison table for an annual income, or the full
//! calculation results as JSON.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use withholding_engine::config::{Province, TaxTables};
use withholding_engine::models::DEFAULT_PAY_PERIODS;
use withholding_engine::report::{build_rows, render_table};

/// Compare Canadian payroll withholdings and net pay across provinces.
#[derive(Parser, Debug)]
#[command(name = "withholding", version, about, long_about = None)]
struct Cli {
    /// Gross annual income in dollars.
    #[arg(short, long, default_value = "200000", allow_negative_numbers = true)]
    income: Decimal,

    /// Province code to include (ON, AB, BC). Repeat for several; defaults to all.
    #[arg(short, long = "province")]
    provinces: Vec<String>,

    /// Number of pay periods per year.
    #[arg(long, default_value_t = DEFAULT_PAY_PERIODS)]
    pay_periods: u32,

    /// Print the results, including audit trails, as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::from(1)
        }
    }
}

/// The single stderr line reported for a failed run.
fn error_message(err: &anyhow::Error) -> String {
    format!("error: {err:#}")
}

fn run(cli: &Cli) -> Result<()> {
    let provinces = if cli.provinces.is_empty() {
        Province::ALL.to_vec()
    } else {
        cli.provinces
            .iter()
            .map(|code| code.parse::<Province>())
            .collect::<Result<Vec<_>, _>>()?
    };

    tracing::info!(
        income = %cli.income,
        pay_periods = cli.pay_periods,
        provinces = provinces.len(),
        "Calculating withholdings"
    );

    let tables = TaxTables::canada_2024();
    let results = build_rows(cli.income, cli.pay_periods, &provinces, tables)
        .with_context(|| format!("Failed to calculate withholdings for ${}", cli.income))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&results).context("Failed to serialize results")?;
        println!("{}", json);
    } else {
        print!("{}", render_table(cli.income, &results));
    }

    Ok(())
}
