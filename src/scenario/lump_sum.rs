//! Lump sum payout against a lifetime pension with COLA

use serde::{Deserialize, Serialize};

use super::comparison::{cumulative_at, ensure_age, Comparison, Side};
use crate::annuity::{break_even_age, future_value_lump_sum, GrowingAnnuity};
use crate::error::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpSumVsPension {
    pub lump_sum: f64,
    pub monthly_pension: f64,
    /// Annual cost-of-living adjustment (percent)
    pub cola_percent: f64,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    /// Rate used to bring pension payments back to today (percent)
    pub discount_rate_percent: f64,
    /// Return earned on the lump sum if invested (percent)
    pub investment_return_percent: f64,
}

/// One year of the pension against the invested lump sum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSumYear {
    pub age: u32,
    pub pension_payment: f64,
    pub cumulative_pension: f64,
    /// Lump sum invested and drawn down by the same income as the pension
    pub lump_sum_balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSumOutcome {
    pub present_value: f64,
    /// Lump sum left invested untouched until life expectancy
    pub future_value: f64,
    /// First age at which drawing the pension income empties the lump sum
    pub depleted_at_age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionOutcome {
    pub present_value: f64,
    pub total_received: f64,
    pub first_year_income: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSumComparison {
    pub lump_sum: LumpSumOutcome,
    pub pension: PensionOutcome,
    pub comparison: Comparison,
    pub years: Vec<LumpSumYear>,
}

impl LumpSumVsPension {
    fn check(&self) -> CalcResult<u32> {
        ensure_positive("lump sum", self.lump_sum)?;
        ensure_positive("monthly pension", self.monthly_pension)?;
        ensure_non_negative("COLA", self.cola_percent)?;
        ensure_non_negative("discount rate", self.discount_rate_percent)?;
        ensure_non_negative("investment return", self.investment_return_percent)?;
        ensure_age("life expectancy", self.life_expectancy)?;
        if self.life_expectancy <= self.retirement_age {
            return Err(CalcError::invalid("life expectancy", "must be after the retirement age"));
        }
        Ok(self.life_expectancy - self.retirement_age)
    }

    /// Value both options and find when the pension catches up
    pub fn compare(&self) -> CalcResult<LumpSumComparison> {
        let years = self.check()?;

        let annual = self.monthly_pension * 12.0;
        let annuity = GrowingAnnuity::new(
            annual,
            years,
            self.discount_rate_percent / 100.0,
            self.cola_percent / 100.0,
        );

        let growth = 1.0 + self.investment_return_percent / 100.0;
        let mut rows = Vec::with_capacity(years as usize);
        let mut cumulative = 0.0;
        let mut balance = self.lump_sum;
        let mut depleted_at_age = None;

        for k in 0..years {
            let age = self.retirement_age + k;
            let payment = annuity.payment_at(k);
            cumulative += payment;

            balance = balance * growth - payment;
            if balance <= 0.0 {
                balance = 0.0;
                depleted_at_age.get_or_insert(age);
            }

            rows.push(LumpSumYear {
                age,
                pension_payment: payment,
                cumulative_pension: cumulative,
                lump_sum_balance: balance,
            });
        }

        let cumulative_by_age: Vec<f64> = rows.iter().map(|r| r.cumulative_pension).collect();
        let break_even = break_even_age(
            self.retirement_age,
            self.life_expectancy,
            |_| self.lump_sum,
            |age| cumulative_at(&cumulative_by_age, self.retirement_age, age),
        );

        let lump_sum = LumpSumOutcome {
            present_value: self.lump_sum,
            future_value: future_value_lump_sum(
                self.lump_sum,
                self.investment_return_percent,
                years as f64,
            ),
            depleted_at_age,
        };
        let pension = PensionOutcome {
            present_value: annuity.present_value(),
            total_received: annuity.total_received(),
            first_year_income: annual,
        };

        let comparison = Comparison::between(
            ("Lump sum", lump_sum.present_value),
            ("Pension", pension.present_value),
            Side::First,
            break_even,
        );

        Ok(LumpSumComparison {
            lump_sum,
            pension,
            comparison,
            years: rows,
        })
    }
}

pub fn compare_lump_sum_vs_pension(inputs: &LumpSumVsPension) -> CalcResult<LumpSumComparison> {
    inputs.compare()
}
