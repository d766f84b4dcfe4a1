//! Evaluate a file of loans in parallel
//!
//! Usage: batch_loans <input.csv> <output.csv>
//!
//! Input columns: id,principal,annual_rate,term_months,extra_monthly,extra_annual,extra_one_time
//! (the extra columns may be left empty). Each output row carries the level
//! payment, the payoff with and without extras, or the reason the row failed.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use csv::{Reader, Writer};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use fincalc::amortization::{compare_payoff, ExtraPayments, LoanTerms, PayoffComparison};
use fincalc::CalcResult;

#[derive(Parser, Debug)]
#[command(name = "batch_loans", about = "Amortize every loan in a CSV file")]
struct Cli {
    input: PathBuf,
    output: PathBuf,
}

#[derive(Debug, Deserialize)]
struct LoanRow {
    id: String,
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    #[serde(default)]
    extra_monthly: Option<f64>,
    #[serde(default)]
    extra_annual: Option<f64>,
    #[serde(default)]
    extra_one_time: Option<f64>,
}

impl LoanRow {
    fn evaluate(&self) -> CalcResult<PayoffComparison> {
        let terms = LoanTerms::new(self.principal, self.annual_rate, self.term_months);
        let extras = ExtraPayments {
            monthly: self.extra_monthly.unwrap_or(0.0),
            annual: self.extra_annual.unwrap_or(0.0),
            one_time: self.extra_one_time.unwrap_or(0.0),
        };
        compare_payoff(&terms, &extras, None)
    }
}

#[derive(Debug, Default, Serialize)]
struct ResultRow {
    id: String,
    monthly_payment: Option<f64>,
    periods: Option<u32>,
    total_interest: Option<f64>,
    accelerated_periods: Option<u32>,
    months_saved: Option<u32>,
    interest_saved: Option<f64>,
    error: Option<String>,
}

impl ResultRow {
    fn from_outcome(id: &str, outcome: CalcResult<PayoffComparison>) -> Self {
        match outcome {
            Ok(cmp) => ResultRow {
                id: id.to_string(),
                monthly_payment: Some(round_cents(cmp.monthly_payment)),
                periods: Some(cmp.original.periods),
                total_interest: Some(round_cents(cmp.original.total_interest)),
                accelerated_periods: Some(cmp.accelerated.periods),
                months_saved: Some(cmp.months_saved),
                interest_saved: Some(round_cents(cmp.interest_saved)),
                error: None,
            },
            Err(err) => ResultRow {
                id: id.to_string(),
                error: Some(err.to_string()),
                ..Default::default()
            },
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn read_loans(path: &Path) -> Result<Vec<LoanRow>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut loans = Vec::new();
    for (idx, record) in reader.deserialize().enumerate() {
        // Header is line 1
        let row: LoanRow = record.with_context(|| format!("parsing line {}", idx + 2))?;
        loans.push(row);
    }
    Ok(loans)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let loans = read_loans(&cli.input)?;
    info!("loaded {} loans in {:?}", loans.len(), start.elapsed());

    let results: Vec<ResultRow> = loans
        .par_iter()
        .map(|loan| ResultRow::from_outcome(&loan.id, loan.evaluate()))
        .collect();

    let failed = results.iter().filter(|r| r.error.is_some()).count();

    let mut writer = Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for row in &results {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "Evaluated {} loans ({} failed) in {:?}; results written to {}",
        results.len(),
        failed,
        start.elapsed(),
        cli.output.display()
    );
    Ok(())
}
