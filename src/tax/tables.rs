//! Built-in federal tax tables
//!
//! Tables are constructed once on first use and shared for the life of the
//! process. Figures are tax year 2025 after the July 2025 amendments
//! (standard deduction and child tax credit increases).

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::brackets::BracketSet;
use super::credits::{ChildCreditRules, EitcParameters, EitcRules};

/// Federal filing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        FilingStatus::Single,
        FilingStatus::MarriedJointly,
        FilingStatus::MarriedSeparately,
        FilingStatus::HeadOfHousehold,
    ];

    pub fn is_joint(&self) -> bool {
        matches!(self, FilingStatus::MarriedJointly)
    }
}

/// Every rate and threshold a tax computation needs for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYearTables {
    pub year: i32,
    single: BracketSet,
    married_jointly: BracketSet,
    married_separately: BracketSet,
    head_of_household: BracketSet,
    standard_deductions: [f64; 4],
    pub child_credit: ChildCreditRules,
    pub eitc: EitcRules,
}

/// Tax year 2025 federal tables
pub static FEDERAL_2025: LazyLock<TaxYearTables> = LazyLock::new(TaxYearTables::federal_2025);

const RATES_2025: [f64; 7] = [0.10, 0.12, 0.22, 0.24, 0.32, 0.35, 0.37];

impl TaxYearTables {
    fn federal_2025() -> Self {
        Self {
            year: 2025,
            single: BracketSet::from_tops_unchecked(
                &[11_925.0, 48_475.0, 103_350.0, 197_300.0, 250_525.0, 626_350.0],
                &RATES_2025,
            ),
            married_jointly: BracketSet::from_tops_unchecked(
                &[23_850.0, 96_950.0, 206_700.0, 394_600.0, 501_050.0, 751_600.0],
                &RATES_2025,
            ),
            married_separately: BracketSet::from_tops_unchecked(
                &[11_925.0, 48_475.0, 103_350.0, 197_300.0, 250_525.0, 375_800.0],
                &RATES_2025,
            ),
            head_of_household: BracketSet::from_tops_unchecked(
                &[17_000.0, 64_850.0, 103_350.0, 197_300.0, 250_500.0, 626_350.0],
                &RATES_2025,
            ),
            // Single, joint, separate, head of household
            standard_deductions: [15_750.0, 31_500.0, 15_750.0, 23_625.0],
            child_credit: ChildCreditRules {
                per_child: 2_200.0,
                phase_out_threshold: 200_000.0,
                phase_out_threshold_joint: 400_000.0,
                reduction_rate: 0.05,
                refundable_cap_per_child: 1_700.0,
                refundable_earned_income_floor: 2_500.0,
                refundable_rate: 0.15,
            },
            eitc: EitcRules {
                // 0, 1, 2, 3+ qualifying children
                by_children: [
                    EitcParameters {
                        phase_in_rate: 0.0765,
                        max_credit: 649.0,
                        phase_out_rate: 0.0765,
                        phase_out_start: 10_620.0,
                        phase_out_start_joint: 17_730.0,
                    },
                    EitcParameters {
                        phase_in_rate: 0.34,
                        max_credit: 4_328.0,
                        phase_out_rate: 0.1598,
                        phase_out_start: 23_350.0,
                        phase_out_start_joint: 30_470.0,
                    },
                    EitcParameters {
                        phase_in_rate: 0.40,
                        max_credit: 7_152.0,
                        phase_out_rate: 0.2106,
                        phase_out_start: 23_350.0,
                        phase_out_start_joint: 30_470.0,
                    },
                    EitcParameters {
                        phase_in_rate: 0.45,
                        max_credit: 8_046.0,
                        phase_out_rate: 0.2106,
                        phase_out_start: 23_350.0,
                        phase_out_start_joint: 30_470.0,
                    },
                ],
                investment_income_limit: 11_950.0,
            },
        }
    }

    pub fn brackets(&self, status: FilingStatus) -> &BracketSet {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedJointly => &self.married_jointly,
            FilingStatus::MarriedSeparately => &self.married_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn standard_deduction(&self, status: FilingStatus) -> f64 {
        self.standard_deductions[status_index(status)]
    }

    /// Copy of these tables with one status's brackets replaced
    pub fn with_brackets(&self, status: FilingStatus, brackets: BracketSet) -> Self {
        let mut tables = self.clone();
        match status {
            FilingStatus::Single => tables.single = brackets,
            FilingStatus::MarriedJointly => tables.married_jointly = brackets,
            FilingStatus::MarriedSeparately => tables.married_separately = brackets,
            FilingStatus::HeadOfHousehold => tables.head_of_household = brackets,
        }
        tables
    }
}

fn status_index(status: FilingStatus) -> usize {
    match status {
        FilingStatus::Single => 0,
        FilingStatus::MarriedJointly => 1,
        FilingStatus::MarriedSeparately => 2,
        FilingStatus::HeadOfHousehold => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builtin_tables_pass_checks() {
        for status in FilingStatus::ALL {
            let set = FEDERAL_2025.brackets(status);
            assert!(
                BracketSet::new(set.brackets().to_vec()).is_ok(),
                "{:?} table failed validation",
                status
            );
            assert_eq!(set.brackets().len(), 7);
        }
    }

    #[test]
    fn test_single_income_in_first_two_brackets() {
        let eval = FEDERAL_2025.brackets(FilingStatus::Single).evaluate(40_000.0);

        let expected = 11_925.0 * 0.10 + (40_000.0 - 11_925.0) * 0.12;
        assert_abs_diff_eq!(eval.total_tax, expected, epsilon = 1e-6);
        assert_eq!(eval.marginal_rate, 0.12);
        assert_eq!(eval.breakdown.len(), 2);
    }

    #[test]
    fn test_standard_deductions() {
        assert_eq!(FEDERAL_2025.standard_deduction(FilingStatus::Single), 15_750.0);
        assert_eq!(FEDERAL_2025.standard_deduction(FilingStatus::MarriedJointly), 31_500.0);
        assert_eq!(FEDERAL_2025.standard_deduction(FilingStatus::HeadOfHousehold), 23_625.0);
    }

    #[test]
    fn test_with_brackets_replaces_one_status() {
        let flat = BracketSet::from_tops(&[], &[0.15]).unwrap();
        let tables = FEDERAL_2025.with_brackets(FilingStatus::Single, flat);

        assert_eq!(tables.brackets(FilingStatus::Single).brackets().len(), 1);
        assert_eq!(tables.brackets(FilingStatus::MarriedJointly).brackets().len(), 7);
    }
}
