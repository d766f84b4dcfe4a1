//! Traditional against Roth IRA
//!
//! Both accounts start from the same balance and grow at the same return.
//! Traditional contributions go in pre-tax and the whole balance is taxed at
//! withdrawal; Roth contributions are the after-tax equivalent of the same
//! outlay and come out tax free.

use serde::{Deserialize, Serialize};

use crate::error::CalcResult;
use crate::scenario::{Comparison, Side};
use crate::validation::ValidationReport;

/// 2025 contribution limit under age 50
pub const IRA_CONTRIBUTION_LIMIT: f64 = 7_000.0;

const MAX_YEARS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IraKind {
    Traditional,
    Roth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IraInputs {
    pub current_balance: f64,
    pub annual_contribution: f64,
    pub annual_return_percent: f64,
    pub years: u32,
    pub current_tax_rate_percent: f64,
    pub retirement_tax_rate_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IraYear {
    pub year: u32,
    pub traditional_balance: f64,
    pub roth_balance: f64,
    pub traditional_after_tax: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IraAccount {
    pub kind: IraKind,
    pub balance: f64,
    pub annual_contribution: f64,
    pub total_contributions: f64,
    pub growth: f64,
    pub tax_at_withdrawal: f64,
    pub after_tax_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IraResult {
    pub traditional: IraAccount,
    pub roth: IraAccount,
    pub better: IraKind,
    /// Gap between the two after-tax values
    pub advantage: f64,
    pub years: Vec<IraYear>,
}

/// `B(1+r)^y + C·((1+r)^y − 1)/r`, contributions at year end; `B + C·y` at r = 0
pub fn ira_future_value(balance: f64, annual_contribution: f64, annual_return_percent: f64, years: u32) -> f64 {
    let r = annual_return_percent / 100.0;
    let y = years as i32;
    if r == 0.0 {
        return balance + annual_contribution * years as f64;
    }
    let growth = (1.0 + r).powi(y);
    balance * growth + annual_contribution * (growth - 1.0) / r
}

impl IraInputs {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.require_non_negative("Current balance", self.current_balance);
        report.require_non_negative("Annual contribution", self.annual_contribution);
        report.warn_above(
            self.annual_contribution,
            IRA_CONTRIBUTION_LIMIT,
            "Annual contribution exceeds the $7,000 IRA limit ($8,000 at age 50 and over)",
        );
        if self.current_balance == 0.0 && self.annual_contribution == 0.0 {
            report.error("Enter a current balance or an annual contribution");
        }
        report.require_non_negative("Annual return", self.annual_return_percent);
        report.warn_above(
            self.annual_return_percent,
            12.0,
            "Returns above 12% a year are optimistic for retirement planning",
        );
        if self.years == 0 {
            report.error("Years until retirement must be at least 1");
        } else if self.years > MAX_YEARS {
            report.error(format!("Years until retirement cannot exceed {MAX_YEARS}"));
        }
        report.require_range("Current tax rate", self.current_tax_rate_percent, 0.0, 100.0);
        report.require_range("Retirement tax rate", self.retirement_tax_rate_percent, 0.0, 100.0);
        report
    }

    fn roth_contribution(&self) -> f64 {
        self.annual_contribution * (1.0 - self.current_tax_rate_percent / 100.0)
    }

    fn account(&self, kind: IraKind) -> IraAccount {
        let (annual_contribution, tax_rate) = match kind {
            IraKind::Traditional => (self.annual_contribution, self.retirement_tax_rate_percent / 100.0),
            IraKind::Roth => (self.roth_contribution(), 0.0),
        };
        let balance = ira_future_value(
            self.current_balance,
            annual_contribution,
            self.annual_return_percent,
            self.years,
        );
        let total_contributions = self.current_balance + annual_contribution * self.years as f64;
        let tax_at_withdrawal = balance * tax_rate;

        IraAccount {
            kind,
            balance,
            annual_contribution,
            total_contributions,
            growth: balance - total_contributions,
            tax_at_withdrawal,
            after_tax_value: balance - tax_at_withdrawal,
        }
    }

    pub fn compute(&self) -> CalcResult<IraResult> {
        self.validate().into_result()?;

        let traditional = self.account(IraKind::Traditional);
        let roth = self.account(IraKind::Roth);

        // Both values fall on the same date, so the break-even slot carries the horizon
        let verdict = Comparison::between(
            ("Traditional", traditional.after_tax_value),
            ("Roth", roth.after_tax_value),
            Side::Second,
            self.years,
        );
        let better = match verdict.better {
            Side::First => IraKind::Traditional,
            Side::Second => IraKind::Roth,
        };

        let retirement_keep = 1.0 - self.retirement_tax_rate_percent / 100.0;
        let roth_contribution = self.roth_contribution();
        let years = (1..=self.years)
            .map(|year| {
                let traditional_balance = ira_future_value(
                    self.current_balance,
                    self.annual_contribution,
                    self.annual_return_percent,
                    year,
                );
                IraYear {
                    year,
                    traditional_balance,
                    roth_balance: ira_future_value(
                        self.current_balance,
                        roth_contribution,
                        self.annual_return_percent,
                        year,
                    ),
                    traditional_after_tax: traditional_balance * retirement_keep,
                }
            })
            .collect();

        Ok(IraResult {
            traditional,
            roth,
            better,
            advantage: verdict.difference,
            years,
        })
    }
}
