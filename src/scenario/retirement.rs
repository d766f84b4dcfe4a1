//! Claiming a benefit early against waiting for a larger one

use serde::{Deserialize, Serialize};

use super::comparison::{cumulative_at, discount_factor, ensure_age, Comparison, Side};
use crate::annuity::{break_even_age, GrowingAnnuity};
use crate::error::{ensure_non_negative, ensure_positive, CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementAges {
    pub early_age: u32,
    pub early_annual_benefit: f64,
    pub later_age: u32,
    pub later_annual_benefit: f64,
    pub cola_percent: f64,
    pub life_expectancy: u32,
    pub discount_rate_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementYear {
    pub age: u32,
    pub early_payment: f64,
    pub later_payment: f64,
    pub cumulative_early: f64,
    pub cumulative_later: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimValue {
    pub start_age: u32,
    pub years_paid: u32,
    /// Valued at the early claiming age
    pub present_value: f64,
    pub total_received: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementComparison {
    pub early: ClaimValue,
    pub later: ClaimValue,
    pub comparison: Comparison,
    pub years: Vec<RetirementYear>,
}

impl RetirementAges {
    fn check(&self) -> CalcResult<()> {
        ensure_positive("early benefit", self.early_annual_benefit)?;
        ensure_positive("later benefit", self.later_annual_benefit)?;
        ensure_non_negative("COLA", self.cola_percent)?;
        ensure_non_negative("discount rate", self.discount_rate_percent)?;
        ensure_age("life expectancy", self.life_expectancy)?;
        if self.later_age <= self.early_age {
            return Err(CalcError::invalid("later retirement age", "must be after the early age"));
        }
        if self.life_expectancy <= self.later_age {
            return Err(CalcError::invalid("life expectancy", "must be after the later retirement age"));
        }
        Ok(())
    }

    pub fn compare(&self) -> CalcResult<RetirementComparison> {
        self.check()?;

        let discount = self.discount_rate_percent / 100.0;
        let cola = self.cola_percent / 100.0;
        let early = GrowingAnnuity::new(
            self.early_annual_benefit,
            self.life_expectancy - self.early_age,
            discount,
            cola,
        );
        let later = GrowingAnnuity::new(
            self.later_annual_benefit,
            self.life_expectancy - self.later_age,
            discount,
            cola,
        );
        let deferral = (self.later_age - self.early_age) as f64;

        let mut rows = Vec::with_capacity(early.periods as usize);
        let mut cumulative_early = 0.0;
        let mut cumulative_later = 0.0;
        for age in self.early_age..self.life_expectancy {
            let early_payment = early.payment_at(age - self.early_age);
            let later_payment = if age >= self.later_age {
                later.payment_at(age - self.later_age)
            } else {
                0.0
            };
            cumulative_early += early_payment;
            cumulative_later += later_payment;
            rows.push(RetirementYear {
                age,
                early_payment,
                later_payment,
                cumulative_early,
                cumulative_later,
            });
        }

        let earlies: Vec<f64> = rows.iter().map(|r| r.cumulative_early).collect();
        let laters: Vec<f64> = rows.iter().map(|r| r.cumulative_later).collect();
        let break_even = break_even_age(
            self.later_age,
            self.life_expectancy,
            |age| cumulative_at(&earlies, self.early_age, age),
            |age| cumulative_at(&laters, self.early_age, age),
        );

        let early_value = ClaimValue {
            start_age: self.early_age,
            years_paid: early.periods,
            present_value: early.present_value(),
            total_received: early.total_received(),
        };
        let later_value = ClaimValue {
            start_age: self.later_age,
            years_paid: later.periods,
            present_value: later.present_value() * discount_factor(self.discount_rate_percent, deferral),
            total_received: later.total_received(),
        };

        let early_label = format!("Retire at {}", self.early_age);
        let later_label = format!("Retire at {}", self.later_age);
        let comparison = Comparison::between(
            (early_label.as_str(), early_value.present_value),
            (later_label.as_str(), later_value.present_value),
            Side::First,
            break_even,
        );

        Ok(RetirementComparison {
            early: early_value,
            later: later_value,
            comparison,
            years: rows,
        })
    }
}

pub fn compare_retirement_ages(inputs: &RetirementAges) -> CalcResult<RetirementComparison> {
    inputs.compare()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn inputs() -> RetirementAges {
        RetirementAges {
            early_age: 62,
            early_annual_benefit: 21_000.0,
            later_age: 70,
            later_annual_benefit: 37_200.0,
            cola_percent: 0.0,
            life_expectancy: 90,
            discount_rate_percent: 0.0,
        }
    }

    #[test]
    fn test_undiscounted_totals() {
        let result = inputs().compare().unwrap();

        assert_eq!(result.years.len(), 28);
        assert_abs_diff_eq!(result.early.total_received, 21_000.0 * 28.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.later.total_received, 37_200.0 * 20.0, epsilon = 1e-6);
        // No discounting: PV equals the nominal sum
        assert_abs_diff_eq!(result.later.present_value, 744_000.0, epsilon = 1e-6);
        assert_eq!(result.comparison.better_label, "Retire at 70");
    }

    #[test]
    fn test_break_even_by_cumulative_benefit() {
        let result = inputs().compare().unwrap();

        // Early leads by 168k at 70; later gains 16.2k a year
        // 62..=76 early = 315k, 70..=76 later = 260.4k; 62..=80 early = 399k, 70..=80 later = 409.2k
        assert_eq!(result.comparison.break_even_age, 80);
    }

    #[test]
    fn test_cola_applies_from_each_start() {
        let with_cola = RetirementAges { cola_percent: 2.0, ..inputs() };
        let result = with_cola.compare().unwrap();
        let at_70 = result.years.iter().find(|r| r.age == 70).unwrap();

        assert_abs_diff_eq!(at_70.later_payment, 37_200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(at_70.early_payment, 21_000.0 * 1.02f64.powi(8), epsilon = 1e-6);
    }

    #[test]
    fn test_discounting_favours_early_claim() {
        let discounted = RetirementAges {
            discount_rate_percent: 8.0,
            life_expectancy: 78,
            ..inputs()
        };
        let result = discounted.compare().unwrap();
        assert_eq!(result.comparison.better, Side::First);
    }

    #[test]
    fn test_rejects_out_of_order_ages() {
        let bad = RetirementAges { later_age: 60, ..inputs() };
        assert!(bad.compare().is_err());
    }

    #[test]
    fn test_rejects_ages_past_cap() {
        let bad = RetirementAges {
            early_age: u32::MAX - 2,
            later_age: u32::MAX - 1,
            life_expectancy: u32::MAX,
            ..inputs()
        };
        assert!(matches!(
            bad.compare(),
            Err(CalcError::InvalidInput { field: "life expectancy", .. })
        ));
    }
}
