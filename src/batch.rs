//! Batch evaluation of calculation scenarios from CSV
//!
//! Input columns: `kind,principal,monthly_contribution,days_invested,annual_rate_percent`.
//! Columns a kind does not use may be left blank. Each row is validated on its
//! own, so one bad row is reported in the output instead of aborting the run.

use crate::calculator::{MmfResult, SaccoResult};
use crate::input::{MmfRequest, SaccoRequest, ValidationError};
use csv::{Reader, Writer};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}: unknown scenario kind '{kind}' (expected 'sacco' or 'mmf')")]
    UnknownKind { row: usize, kind: String },

    #[error("row {row}: missing {column}")]
    MissingColumn { row: usize, column: &'static str },
}

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    principal: Option<f64>,
    monthly_contribution: Option<f64>,
    days_invested: Option<i64>,
    annual_rate_percent: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self, row: usize) -> Result<Scenario, BatchError> {
        let require = |value: Option<f64>, column: &'static str| {
            value.ok_or(BatchError::MissingColumn { row, column })
        };

        let kind = self.kind.trim().to_ascii_lowercase();
        let request = match kind.as_str() {
            "sacco" => ScenarioRequest::Sacco(SaccoRequest::new(
                require(self.principal, "principal")?,
                require(self.monthly_contribution, "monthly_contribution")?,
                require(self.annual_rate_percent, "annual_rate_percent")?,
            )),
            "mmf" => ScenarioRequest::Mmf(MmfRequest::new(
                require(self.principal, "principal")?,
                self.days_invested
                    .ok_or(BatchError::MissingColumn { row, column: "days_invested" })?,
                require(self.annual_rate_percent, "annual_rate_percent")?,
            )),
            _ => return Err(BatchError::UnknownKind { row, kind: self.kind }),
        };

        Ok(Scenario { row, request })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScenarioRequest {
    Sacco(SaccoRequest),
    Mmf(MmfRequest),
}

/// One input row, numbered from 1 after the header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub row: usize,
    pub request: ScenarioRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScenarioResult {
    Sacco(SaccoResult),
    Mmf(MmfResult),
}

impl ScenarioResult {
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioResult::Sacco(_) => "sacco",
            ScenarioResult::Mmf(_) => "mmf",
        }
    }

    /// Amount interest is earned on: total contributions or the MMF principal
    pub fn base(&self) -> f64 {
        match self {
            ScenarioResult::Sacco(r) => r.total_contributions,
            ScenarioResult::Mmf(r) => r.principal,
        }
    }

    pub fn interest_earned(&self) -> f64 {
        match self {
            ScenarioResult::Sacco(r) => r.interest_earned,
            ScenarioResult::Mmf(r) => r.interest_earned,
        }
    }

    pub fn final_amount(&self) -> f64 {
        match self {
            ScenarioResult::Sacco(r) => r.final_amount,
            ScenarioResult::Mmf(r) => r.final_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub row: usize,
    pub kind: &'static str,
    pub result: Result<ScenarioResult, ValidationError>,
}

impl Scenario {
    pub fn run(&self) -> ScenarioOutcome {
        let (kind, result) = match self.request {
            ScenarioRequest::Sacco(req) => ("sacco", req.calculate().map(ScenarioResult::Sacco)),
            ScenarioRequest::Mmf(req) => ("mmf", req.calculate().map(ScenarioResult::Mmf)),
        };
        ScenarioOutcome { row: self.row, kind, result }
    }
}

/// Load scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, BatchError> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, BatchError> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>, BatchError> {
    let mut scenarios = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario(i + 1)?);
    }
    Ok(scenarios)
}

/// Evaluate every scenario in parallel, preserving input order
pub fn run_scenarios(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    let outcomes: Vec<ScenarioOutcome> = scenarios.par_iter().map(Scenario::run).collect();
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!("evaluated {} scenarios ({} rejected)", outcomes.len(), failed);
    outcomes
}

/// Output CSV row
#[derive(Debug, Serialize)]
struct OutcomeRow<'a> {
    row: usize,
    kind: &'a str,
    total_base: Option<f64>,
    interest_earned: Option<f64>,
    final_amount: Option<f64>,
    error: Option<String>,
}

/// Write outcomes as CSV: `row,kind,total_base,interest_earned,final_amount,error`
pub fn write_outcomes<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> Result<(), BatchError> {
    let mut csv_writer = Writer::from_writer(writer);
    for outcome in outcomes {
        let row = match &outcome.result {
            Ok(result) => OutcomeRow {
                row: outcome.row,
                kind: outcome.kind,
                total_base: Some(result.base()),
                interest_earned: Some(result.interest_earned()),
                final_amount: Some(result.final_amount()),
                error: None,
            },
            Err(e) => OutcomeRow {
                row: outcome.row,
                kind: outcome.kind,
                total_base: None,
                interest_earned: None,
                final_amount: None,
                error: Some(e.to_string()),
            },
        };
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
