//! Single-life pension against a joint-and-survivor election
//!
//! The joint option pays less while both are alive but keeps paying the
//! spouse after the primary dies. Each projected year falls in exactly one
//! [`Regime`]; the COLA always compounds from the benefit start date, so a
//! survivor benefit that begins in year 20 already carries 20 years of COLA.

use serde::{Deserialize, Serialize};

use super::comparison::{cumulative_at, discount_factor, ensure_age, Comparison, Side};
use crate::annuity::break_even_age;
use crate::error::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivorOptions {
    /// Monthly benefit under the single-life option
    pub single_life_monthly: f64,
    /// Monthly benefit under the joint option while both are alive
    pub joint_monthly: f64,
    /// Share of the joint benefit the spouse keeps (percent)
    pub survivor_percent: f64,
    /// Joint benefit rises to the single-life amount if the spouse dies first
    pub pop_up: bool,
    pub cola_percent: f64,
    pub discount_rate_percent: f64,
    /// Ages when benefits start
    pub primary_age: u32,
    pub spouse_age: u32,
    pub primary_life_expectancy: u32,
    pub spouse_life_expectancy: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    BothAlive,
    /// Primary deceased, spouse receiving the survivor benefit
    SurvivorOnly,
    /// Spouse deceased, primary still drawing the joint (or popped-up) benefit
    PrimaryOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivorYear {
    /// 0-based years since benefits started
    pub year: u32,
    pub primary_age: u32,
    pub spouse_age: u32,
    pub regime: Regime,
    pub single_life_payment: f64,
    pub joint_payment: f64,
    pub cumulative_single_life: f64,
    pub cumulative_joint: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionValue {
    pub present_value: f64,
    pub total_received: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivorComparison {
    pub single_life: OptionValue,
    pub joint: OptionValue,
    pub comparison: Comparison,
    pub years: Vec<SurvivorYear>,
}

impl SurvivorOptions {
    fn check(&self) -> CalcResult<()> {
        ensure_positive("single-life benefit", self.single_life_monthly)?;
        ensure_positive("joint benefit", self.joint_monthly)?;
        ensure_non_negative("survivor percentage", self.survivor_percent)?;
        if self.survivor_percent > 100.0 {
            return Err(CalcError::invalid("survivor percentage", "cannot exceed 100"));
        }
        ensure_non_negative("COLA", self.cola_percent)?;
        ensure_non_negative("discount rate", self.discount_rate_percent)?;
        ensure_age("primary life expectancy", self.primary_life_expectancy)?;
        ensure_age("spouse life expectancy", self.spouse_life_expectancy)?;
        if self.primary_life_expectancy <= self.primary_age {
            return Err(CalcError::invalid("primary life expectancy", "must be after the current age"));
        }
        if self.spouse_life_expectancy <= self.spouse_age {
            return Err(CalcError::invalid("spouse life expectancy", "must be after the current age"));
        }
        Ok(())
    }

    fn regime(&self, year: u32) -> Option<Regime> {
        let primary_alive = year < self.primary_life_expectancy - self.primary_age;
        let spouse_alive = year < self.spouse_life_expectancy - self.spouse_age;
        match (primary_alive, spouse_alive) {
            (true, true) => Some(Regime::BothAlive),
            (false, true) => Some(Regime::SurvivorOnly),
            (true, false) => Some(Regime::PrimaryOnly),
            (false, false) => None,
        }
    }

    pub fn compare(&self) -> CalcResult<SurvivorComparison> {
        self.check()?;

        let primary_years = self.primary_life_expectancy - self.primary_age;
        let spouse_years = self.spouse_life_expectancy - self.spouse_age;
        let span = primary_years.max(spouse_years);

        let single_annual = self.single_life_monthly * 12.0;
        let joint_annual = self.joint_monthly * 12.0;
        let survivor_share = self.survivor_percent / 100.0;
        let cola = 1.0 + self.cola_percent / 100.0;

        let mut rows = Vec::with_capacity(span as usize);
        let mut single_pv = 0.0;
        let mut joint_pv = 0.0;
        let mut cumulative_single = 0.0;
        let mut cumulative_joint = 0.0;

        for year in 0..span {
            let Some(regime) = self.regime(year) else {
                break;
            };
            let growth = cola.powi(year as i32);

            let single = match regime {
                Regime::BothAlive | Regime::PrimaryOnly => single_annual * growth,
                Regime::SurvivorOnly => 0.0,
            };
            let joint = match regime {
                Regime::BothAlive => joint_annual * growth,
                Regime::SurvivorOnly => joint_annual * survivor_share * growth,
                Regime::PrimaryOnly if self.pop_up => single_annual * growth,
                Regime::PrimaryOnly => joint_annual * growth,
            };

            let discount = discount_factor(self.discount_rate_percent, (year + 1) as f64);
            single_pv += single * discount;
            joint_pv += joint * discount;
            cumulative_single += single;
            cumulative_joint += joint;

            rows.push(SurvivorYear {
                year,
                primary_age: self.primary_age + year,
                spouse_age: self.spouse_age + year,
                regime,
                single_life_payment: single,
                joint_payment: joint,
                cumulative_single_life: cumulative_single,
                cumulative_joint,
            });
        }

        let singles: Vec<f64> = rows.iter().map(|r| r.cumulative_single_life).collect();
        let joints: Vec<f64> = rows.iter().map(|r| r.cumulative_joint).collect();
        let last_age = self.primary_age + span.saturating_sub(1);
        let break_even = break_even_age(
            self.primary_age,
            last_age,
            |age| cumulative_at(&singles, self.primary_age, age),
            |age| cumulative_at(&joints, self.primary_age, age),
        );

        let comparison = Comparison::between(
            ("Single life", single_pv),
            ("Joint and survivor", joint_pv),
            Side::First,
            break_even,
        );

        Ok(SurvivorComparison {
            single_life: OptionValue {
                present_value: single_pv,
                total_received: cumulative_single,
            },
            joint: OptionValue {
                present_value: joint_pv,
                total_received: cumulative_joint,
            },
            comparison,
            years: rows,
        })
    }
}

pub fn compare_survivor_options(inputs: &SurvivorOptions) -> CalcResult<SurvivorComparison> {
    inputs.compare()
}
