//! Compound growth of an initial amount plus regular contributions
//!
//! The balance is stepped month by month. Each month grows by the effective
//! monthly factor of the chosen compounding frequency, `(1 + r/m)^(m/12)`, so
//! annual, quarterly, monthly and daily compounding all reach the textbook
//! balance at the end of each year.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CalcResult;
use crate::validation::ValidationReport;

const MAX_YEARS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionFrequency {
    Monthly,
    Annually,
}

/// Whether contributions land before or after the period's growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionTiming {
    Beginning,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compounding {
    Annually,
    Quarterly,
    Monthly,
    Daily,
}

impl Compounding {
    pub fn periods_per_year(self) -> f64 {
        match self {
            Compounding::Annually => 1.0,
            Compounding::Quarterly => 4.0,
            Compounding::Monthly => 12.0,
            Compounding::Daily => 365.0,
        }
    }

    /// Growth factor for one month at `annual_rate` (decimal)
    fn monthly_factor(self, annual_rate: f64) -> f64 {
        let m = self.periods_per_year();
        (1.0 + annual_rate / m).powf(m / 12.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInputs {
    pub initial_amount: f64,
    pub contribution: f64,
    pub contribution_frequency: ContributionFrequency,
    pub contribution_timing: ContributionTiming,
    pub annual_return_percent: f64,
    pub compounding: Compounding,
    pub years: u32,
    /// Deflate the ending balance to today's dollars
    pub inflation_rate_percent: Option<f64>,
}

impl Default for InvestmentInputs {
    fn default() -> Self {
        Self {
            initial_amount: 10_000.0,
            contribution: 500.0,
            contribution_frequency: ContributionFrequency::Monthly,
            contribution_timing: ContributionTiming::End,
            annual_return_percent: 7.0,
            compounding: Compounding::Monthly,
            years: 20,
            inflation_rate_percent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentYear {
    pub year: u32,
    pub contributions: f64,
    pub interest: f64,
    pub balance: f64,
    /// Balance in today's dollars, when an inflation rate was given
    pub real_balance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub ending_balance: f64,
    /// Initial amount plus every contribution
    pub total_contributions: f64,
    pub total_interest: f64,
    pub inflation_adjusted_balance: Option<f64>,
    pub years: Vec<InvestmentYear>,
}

impl InvestmentInputs {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.require_non_negative("Initial investment", self.initial_amount);
        report.require_non_negative("Contribution", self.contribution);
        if self.initial_amount == 0.0 && self.contribution == 0.0 {
            report.error("Enter an initial investment or a regular contribution");
        }
        report.require_non_negative("Annual return", self.annual_return_percent);
        report.warn_above(
            self.annual_return_percent,
            15.0,
            "Returns above 15% a year are optimistic for long-term investing",
        );
        if self.years == 0 {
            report.error("Investment period must be at least 1 year");
        } else if self.years > MAX_YEARS {
            report.error(format!("Investment period cannot exceed {MAX_YEARS} years"));
        }
        if let Some(inflation) = self.inflation_rate_percent {
            report.require_non_negative("Inflation rate", inflation);
            report.warn_above(inflation, 10.0, "Inflation above 10% a year is unusual over long periods");
        }
        report
    }

    fn contribution_for_month(&self, month_of_year: u32) -> f64 {
        match (self.contribution_frequency, self.contribution_timing) {
            (ContributionFrequency::Monthly, _) => self.contribution,
            (ContributionFrequency::Annually, ContributionTiming::Beginning) if month_of_year == 1 => {
                self.contribution
            }
            (ContributionFrequency::Annually, ContributionTiming::End) if month_of_year == 12 => {
                self.contribution
            }
            _ => 0.0,
        }
    }

    pub fn compute(&self) -> CalcResult<InvestmentResult> {
        self.validate().into_result()?;

        let factor = self.compounding.monthly_factor(self.annual_return_percent / 100.0);
        let inflation = self.inflation_rate_percent.map(|p| 1.0 + p / 100.0);

        let mut balance = self.initial_amount;
        let mut total_contributions = self.initial_amount;
        let mut rows = Vec::with_capacity(self.years as usize);

        for year in 1..=self.years {
            let start = balance;
            let mut contributed = 0.0;

            for month in 1..=12 {
                let deposit = self.contribution_for_month(month);
                contributed += deposit;
                balance = match self.contribution_timing {
                    ContributionTiming::Beginning => (balance + deposit) * factor,
                    ContributionTiming::End => balance * factor + deposit,
                };
            }

            total_contributions += contributed;
            rows.push(InvestmentYear {
                year,
                contributions: contributed,
                interest: balance - start - contributed,
                balance,
                real_balance: inflation.map(|f| balance / f.powi(year as i32)),
            });
        }

        debug!(
            "investment: {} years, {:.2} contributed, {:.2} ending balance",
            self.years, total_contributions, balance
        );

        Ok(InvestmentResult {
            ending_balance: balance,
            total_contributions,
            total_interest: balance - total_contributions,
            inflation_adjusted_balance: inflation.map(|f| balance / f.powi(self.years as i32)),
            years: rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn lump_only(compounding: Compounding) -> InvestmentInputs {
        InvestmentInputs {
            initial_amount: 10_000.0,
            contribution: 0.0,
            annual_return_percent: 7.0,
            compounding,
            years: 10,
            ..InvestmentInputs::default()
        }
    }

    #[test]
    fn test_annual_compounding_lump_sum() {
        let result = lump_only(Compounding::Annually).compute().unwrap();
        assert_abs_diff_eq!(result.ending_balance, 10_000.0 * 1.07f64.powi(10), epsilon = 1e-6);
        assert_abs_diff_eq!(result.total_interest, result.ending_balance - 10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compounding_frequencies() {
        let quarterly = lump_only(Compounding::Quarterly).compute().unwrap();
        let daily = lump_only(Compounding::Daily).compute().unwrap();

        assert_abs_diff_eq!(quarterly.ending_balance, 10_000.0 * 1.0175f64.powi(40), epsilon = 1e-6);
        assert_abs_diff_eq!(
            daily.ending_balance,
            10_000.0 * (1.0 + 0.07 / 365.0f64).powf(3650.0),
            epsilon = 1e-6
        );
        assert!(daily.ending_balance > quarterly.ending_balance);
    }

    #[test]
    fn test_monthly_contributions_match_annuity() {
        let end = InvestmentInputs {
            initial_amount: 0.0,
            contribution: 100.0,
            annual_return_percent: 6.0,
            years: 10,
            ..InvestmentInputs::default()
        };
        let fv = 100.0 * (1.005f64.powi(120) - 1.0) / 0.005;

        let result = end.compute().unwrap();
        assert_abs_diff_eq!(result.ending_balance, fv, epsilon = 1e-6);
        assert_abs_diff_eq!(result.total_contributions, 12_000.0, epsilon = 1e-9);

        let beginning = InvestmentInputs {
            contribution_timing: ContributionTiming::Beginning,
            ..end
        };
        let result = beginning.compute().unwrap();
        assert_abs_diff_eq!(result.ending_balance, fv * 1.005, epsilon = 1e-6);
    }

    #[test]
    fn test_annual_contributions() {
        let inputs = InvestmentInputs {
            initial_amount: 0.0,
            contribution: 1_000.0,
            contribution_frequency: ContributionFrequency::Annually,
            compounding: Compounding::Annually,
            annual_return_percent: 5.0,
            years: 3,
            ..InvestmentInputs::default()
        };
        let result = inputs.compute().unwrap();
        assert_abs_diff_eq!(result.ending_balance, 1_000.0 * (1.05 * 1.05 + 1.05 + 1.0), epsilon = 1e-6);
        assert_eq!(result.years.len(), 3);
        assert_abs_diff_eq!(result.years[0].interest, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inflation_adjustment() {
        let inputs = InvestmentInputs {
            inflation_rate_percent: Some(3.0),
            ..lump_only(Compounding::Annually)
        };
        let result = inputs.compute().unwrap();
        let real = result.inflation_adjusted_balance.unwrap();

        assert_abs_diff_eq!(real, result.ending_balance / 1.03f64.powi(10), epsilon = 1e-6);
        assert_eq!(result.years[9].real_balance, Some(real));
        assert!(lump_only(Compounding::Annually).compute().unwrap().inflation_adjusted_balance.is_none());
    }

    #[test]
    fn test_rejects_empty_investment() {
        let inputs = InvestmentInputs {
            initial_amount: 0.0,
            contribution: 0.0,
            ..InvestmentInputs::default()
        };
        assert!(inputs.validate().has_errors());
        assert!(inputs.compute().is_err());
    }
}
