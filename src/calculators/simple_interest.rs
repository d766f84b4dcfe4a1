//! Simple (non-compounding) interest

use serde::{Deserialize, Serialize};

use crate::error::CalcResult;
use crate::validation::ValidationReport;

/// Fractions of a year shorter than this are dropped from the yearly rows
const PARTIAL_YEAR_EPSILON: f64 = 1e-9;

const MAX_YEARS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestInputs {
    pub principal: f64,
    pub annual_rate_percent: f64,
    /// Fractional years allowed (2.5 = two and a half years)
    pub years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestYear {
    pub year: u32,
    /// 1.0 for a full year, less for the final partial year
    pub fraction: f64,
    pub interest: f64,
    pub cumulative_interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub interest: f64,
    pub ending_balance: f64,
    pub years: Vec<SimpleInterestYear>,
}

impl SimpleInterestInputs {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require_positive("Principal", self.principal);
        report.require_non_negative("Interest rate", self.annual_rate_percent);
        report.warn_above(self.annual_rate_percent, 20.0, "Interest rate above 20% is unusually high");
        report.require_positive("Time period", self.years);
        if self.years > MAX_YEARS {
            report.error(format!("Time period cannot exceed {MAX_YEARS} years"));
        }
        report.warn_above(self.years, 50.0, "Time periods over 50 years are unusual");
        report
    }

    /// `I = P·r·t`
    pub fn compute(&self) -> CalcResult<SimpleInterestResult> {
        self.validate().into_result()?;

        let yearly_interest = self.principal * self.annual_rate_percent / 100.0;
        let whole_years = self.years.floor() as u32;
        let remainder = self.years - whole_years as f64;

        let mut fractions: Vec<f64> = vec![1.0; whole_years as usize];
        if remainder > PARTIAL_YEAR_EPSILON {
            fractions.push(remainder);
        }

        let mut cumulative_interest = 0.0;
        let years = fractions
            .into_iter()
            .enumerate()
            .map(|(idx, fraction)| {
                let interest = yearly_interest * fraction;
                cumulative_interest += interest;
                SimpleInterestYear {
                    year: idx as u32 + 1,
                    fraction,
                    interest,
                    cumulative_interest,
                    balance: self.principal + cumulative_interest,
                }
            })
            .collect();

        let interest = yearly_interest * self.years;
        Ok(SimpleInterestResult {
            interest,
            ending_balance: self.principal + interest,
            years,
        })
    }
}
