//! SACCO Calculator CLI
//!
//! Command-line interface for SACCO and MMF return projections. Values not
//! given as flags are prompted for interactively.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sacco_calculator::batch::{load_scenarios, run_scenarios, write_outcomes};
use sacco_calculator::input::{
    parse_amount, parse_days, parse_rate, MmfRequest, SaccoRequest, ValidationResult,
    MMF_MAX_RATE_PERCENT, SACCO_MAX_RATE_PERCENT,
};
use sacco_calculator::rates::{resolve_rate, source_for};
use sacco_calculator::report::{maturity_date, mmf_breakdown, render_table, sacco_breakdown, ReportConfig};
use sacco_calculator::{MmfResult, SaccoResult};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// SACCO and money market fund returns calculator
#[derive(Parser)]
#[command(name = "sacco_calculator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Currency label printed in front of amounts
    #[arg(long, default_value = "KES", global = true)]
    currency: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// One-year SACCO projection with simple annual interest
    Sacco {
        /// Initial principal
        #[arg(long)]
        principal: Option<f64>,
        /// Contribution paid each month
        #[arg(long)]
        monthly: Option<f64>,
        /// Annual interest rate in percent (0-100)
        #[arg(long)]
        rate: Option<f64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Money market fund projection with daily compounding
    Mmf {
        /// Amount invested
        #[arg(long)]
        principal: Option<f64>,
        /// Number of days invested
        #[arg(long)]
        days: Option<i64>,
        /// Annual rate in percent (0-50); looked up if omitted, prompted if missing or out of range
        #[arg(long)]
        rate: Option<f64>,
        /// First day of the holding period (YYYY-MM-DD), to show the maturity date
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the SACCO and MMF calculators one after the other
    All,

    /// Evaluate every scenario in a CSV file
    Batch {
        /// Scenario file (kind,principal,monthly_contribution,days_invested,annual_rate_percent)
        input: PathBuf,
        /// Output CSV path (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Ask for a value until `parse` accepts it
fn prompt<T>(label: &str, parse: impl Fn(&str) -> ValidationResult<T>) -> Result<T> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}: ", label);
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("input closed while waiting for {}", label.to_lowercase());
        }

        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(e) => println!("Invalid input: {}. Please try again.", e),
        }
    }
}

fn section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn sacco_request(principal: Option<f64>, monthly: Option<f64>, rate: Option<f64>) -> Result<SaccoRequest> {
    let principal = match principal {
        Some(p) => p,
        None => prompt("Enter principal amount", |s| parse_amount("principal", s))?,
    };
    let monthly = match monthly {
        Some(m) => m,
        None => prompt("Enter monthly contribution", |s| parse_amount("monthly contribution", s))?,
    };
    let rate = match rate {
        Some(r) => r,
        None => prompt("Enter annual interest rate (%)", |s| {
            parse_rate("annual interest rate", s, SACCO_MAX_RATE_PERCENT)
        })?,
    };
    Ok(SaccoRequest::new(principal, monthly, rate))
}

fn mmf_request(principal: Option<f64>, days: Option<i64>, rate: Option<f64>) -> Result<MmfRequest> {
    if rate.is_none() {
        println!("Attempting to fetch latest MMF rate...");
    }
    let source = source_for(rate);
    let rate = resolve_rate(source.as_ref(), || {
        prompt("Enter MMF annual interest rate (%)", |s| {
            parse_rate("MMF annual rate", s, MMF_MAX_RATE_PERCENT)
        })
    })?;
    println!("Using MMF annual rate: {:.2}%", rate);

    let principal = match principal {
        Some(p) => p,
        None => prompt("Enter MMF investment amount", |s| parse_amount("investment amount", s))?,
    };
    let days = match days {
        Some(d) => d,
        None => i64::from(prompt("Enter number of days invested", parse_days)?),
    };
    Ok(MmfRequest::new(principal, days, rate))
}

fn print_sacco(result: &SaccoResult, config: &ReportConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render_table("SACCO CALCULATION RESULTS (After 1 Year)", &sacco_breakdown(result, config)));
    }
    Ok(())
}

fn print_mmf(result: &MmfResult, config: &ReportConfig, start_date: Option<NaiveDate>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    print!("{}", render_table("MMF CALCULATION RESULTS", &mmf_breakdown(result, config)));
    if let Some(start) = start_date {
        match maturity_date(start, result.days_invested) {
            Some(date) => println!("Matures on: {}", date.format("%Y-%m-%d")),
            None => println!("Maturity date is out of range"),
        }
    }
    Ok(())
}

fn run_batch(input: &Path, output: Option<&Path>) -> Result<()> {
    let scenarios = load_scenarios(input)
        .with_context(|| format!("Failed to load scenarios from {}", input.display()))?;
    let outcomes = run_scenarios(&scenarios);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_outcomes(file, &outcomes)?;
            println!("Output written to {}", path.display());
        }
        None => write_outcomes(io::stdout().lock(), &outcomes)?,
    }

    let rejected = outcomes.iter().filter(|o| o.result.is_err()).count();
    if rejected > 0 {
        eprintln!("{} of {} scenarios were rejected", rejected, outcomes.len());
    }
    Ok(())
}

fn run_all(config: &ReportConfig) -> Result<()> {
    println!("SACCO Financial Calculator v{}", env!("CARGO_PKG_VERSION"));

    section("SECTION 1: SACCO INTEREST CALCULATION");
    let sacco = sacco_request(None, None, None)?.calculate()?;
    print_sacco(&sacco, config, false)?;

    section("SECTION 2: MONEY MARKET FUND (MMF) CALCULATION");
    let mmf = mmf_request(None, None, None)?.calculate()?;
    print_mmf(&mmf, config, None, false)?;

    section("Financial calculations completed successfully!");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ReportConfig::with_currency(cli.currency);

    match cli.command.unwrap_or(Commands::All) {
        Commands::Sacco { principal, monthly, rate, json } => {
            let result = sacco_request(principal, monthly, rate)?.calculate()?;
            print_sacco(&result, &config, json)?;
        }

        Commands::Mmf { principal, days, rate, start_date, json } => {
            let result = mmf_request(principal, days, rate)?.calculate()?;
            print_mmf(&result, &config, start_date, json)?;
        }

        Commands::All => run_all(&config)?,

        Commands::Batch { input, output } => run_batch(&input, output.as_deref())?,
    }

    Ok(())
}
