//! Pension decisions: take the lump sum, pick a survivor option, choose when to retire

use serde::{Deserialize, Serialize};

use crate::error::CalcResult;
use crate::scenario::{
    LumpSumComparison, LumpSumVsPension, RetirementAges, RetirementComparison,
    SurvivorComparison, SurvivorOptions, MAX_AGE,
};
use crate::validation::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PensionInputs {
    LumpSum(LumpSumVsPension),
    Survivor(SurvivorOptions),
    RetirementAge(RetirementAges),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PensionResult {
    LumpSum(LumpSumComparison),
    Survivor(SurvivorComparison),
    RetirementAge(RetirementComparison),
}

fn check_rates(report: &mut ValidationReport, cola: f64, discount: f64) {
    report.require_non_negative("COLA", cola);
    report.warn_above(cola, 5.0, "COLA above 5% a year is rare");
    report.require_non_negative("Discount rate", discount);
    report.warn_above(discount, 10.0, "Discount rates above 10% heavily favour money now");
}

fn check_span(report: &mut ValidationReport, label: &str, start: u32, end: u32) {
    if end <= start {
        report.error(format!("{label} must be after the starting age"));
    } else if end > MAX_AGE {
        report.error(format!("{label} cannot exceed {MAX_AGE}"));
    }
}

impl PensionInputs {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        match self {
            PensionInputs::LumpSum(inputs) => {
                report.require_positive("Lump sum", inputs.lump_sum);
                report.require_positive("Monthly pension", inputs.monthly_pension);
                check_rates(&mut report, inputs.cola_percent, inputs.discount_rate_percent);
                report.require_non_negative("Investment return", inputs.investment_return_percent);
                report.warn_above(
                    inputs.investment_return_percent,
                    12.0,
                    "Investment returns above 12% a year are optimistic",
                );
                check_span(&mut report, "Life expectancy", inputs.retirement_age, inputs.life_expectancy);
                if inputs.retirement_age < 50 {
                    report.warning("Pensions rarely start before age 50");
                }
            }
            PensionInputs::Survivor(inputs) => {
                report.require_positive("Single-life benefit", inputs.single_life_monthly);
                report.require_positive("Joint benefit", inputs.joint_monthly);
                report.require_range("Survivor percentage", inputs.survivor_percent, 0.0, 100.0);
                check_rates(&mut report, inputs.cola_percent, inputs.discount_rate_percent);
                check_span(
                    &mut report,
                    "Primary life expectancy",
                    inputs.primary_age,
                    inputs.primary_life_expectancy,
                );
                check_span(
                    &mut report,
                    "Spouse life expectancy",
                    inputs.spouse_age,
                    inputs.spouse_life_expectancy,
                );
                report.warn_above(
                    inputs.joint_monthly,
                    inputs.single_life_monthly,
                    "The joint benefit is usually lower than the single-life benefit",
                );
            }
            PensionInputs::RetirementAge(inputs) => {
                report.require_positive("Early benefit", inputs.early_annual_benefit);
                report.require_positive("Later benefit", inputs.later_annual_benefit);
                check_rates(&mut report, inputs.cola_percent, inputs.discount_rate_percent);
                if inputs.later_age <= inputs.early_age {
                    report.error("Later retirement age must be after the early age");
                }
                check_span(&mut report, "Life expectancy", inputs.later_age, inputs.life_expectancy);
                if inputs.later_annual_benefit <= inputs.early_annual_benefit {
                    report.warning("Waiting to retire usually increases the annual benefit");
                }
            }
        }
        report
    }

    pub fn compute(&self) -> CalcResult<PensionResult> {
        self.validate().into_result()?;

        match self {
            PensionInputs::LumpSum(inputs) => inputs.compare().map(PensionResult::LumpSum),
            PensionInputs::Survivor(inputs) => inputs.compare().map(PensionResult::Survivor),
            PensionInputs::RetirementAge(inputs) => {
                inputs.compare().map(PensionResult::RetirementAge)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lump_sum() -> LumpSumVsPension {
        LumpSumVsPension {
            lump_sum: 400_000.0,
            monthly_pension: 2_500.0,
            cola_percent: 2.0,
            retirement_age: 65,
            life_expectancy: 90,
            discount_rate_percent: 5.0,
            investment_return_percent: 6.0,
        }
    }

    #[test]
    fn test_dispatches_to_comparator() {
        let result = PensionInputs::LumpSum(lump_sum()).compute().unwrap();
        match result {
            PensionResult::LumpSum(cmp) => assert_eq!(cmp.years.len(), 25),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_life_expectancy_before_start_is_an_error() {
        let inputs = PensionInputs::LumpSum(LumpSumVsPension {
            life_expectancy: 64,
            ..lump_sum()
        });
        assert_eq!(
            inputs.validate().errors(),
            vec!["Life expectancy must be after the starting age"]
        );
        assert!(inputs.compute().is_err());
    }

    #[test]
    fn test_survivor_warnings() {
        let inputs = PensionInputs::Survivor(SurvivorOptions {
            single_life_monthly: 2_000.0,
            joint_monthly: 2_200.0,
            survivor_percent: 50.0,
            pop_up: false,
            cola_percent: 0.0,
            discount_rate_percent: 4.0,
            primary_age: 65,
            spouse_age: 63,
            primary_life_expectancy: 85,
            spouse_life_expectancy: 88,
        });
        let report = inputs.validate();
        assert!(!report.has_errors());
        assert_eq!(report.warnings().len(), 1);
        assert!(inputs.compute().is_ok());
    }

    #[test]
    fn test_retirement_age_order() {
        let inputs = PensionInputs::RetirementAge(RetirementAges {
            early_age: 67,
            early_annual_benefit: 24_000.0,
            later_age: 67,
            later_annual_benefit: 30_000.0,
            cola_percent: 2.0,
            life_expectancy: 88,
            discount_rate_percent: 3.0,
        });
        assert!(inputs.validate().has_errors());
        assert!(inputs.compute().is_err());
    }
}
