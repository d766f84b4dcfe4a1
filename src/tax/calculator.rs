//! Federal income tax estimate for one return

use log::debug;
use serde::{Deserialize, Serialize};

use super::brackets::BracketEvaluation;
use super::credits::{compose_credits, CreditContext, CreditSummary};
use super::tables::{FilingStatus, TaxYearTables, FEDERAL_2025};
use crate::error::CalcResult;
use crate::validation::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxInputs {
    pub filing_status: FilingStatus,
    /// Wages and self-employment earnings
    pub earned_income: f64,
    /// Interest, dividends, capital gains
    pub investment_income: f64,
    /// 401(k), traditional IRA, HSA contributions
    pub pre_tax_contributions: f64,
    /// Used instead of the standard deduction when larger
    pub itemized_deductions: f64,
    pub qualifying_children: u32,
    pub tax_withheld: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionKind {
    Standard,
    Itemized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: f64,
    pub adjusted_gross_income: f64,
    pub deduction_kind: DeductionKind,
    pub deduction: f64,
    pub taxable_income: f64,
    pub brackets: BracketEvaluation,
    pub tax_before_credits: f64,
    pub credits: CreditSummary,
    /// Liability after non-refundable credits, floored at zero
    pub tax_after_credits: f64,
    /// Liability after refundable credits; negative means money back
    pub net_tax: f64,
    pub tax_withheld: f64,
    /// Positive: owed at filing. Negative: refund.
    pub balance_due: f64,
    /// Net tax over gross income
    pub effective_rate: f64,
    pub marginal_rate: f64,
}

impl TaxInputs {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require_non_negative("Earned income", self.earned_income);
        report.require_non_negative("Investment income", self.investment_income);
        report.require_non_negative("Pre-tax contributions", self.pre_tax_contributions);
        report.require_non_negative("Itemized deductions", self.itemized_deductions);
        report.require_non_negative("Tax withheld", self.tax_withheld);

        let gross = self.earned_income + self.investment_income;
        report.warn_above(
            self.pre_tax_contributions,
            gross,
            "Pre-tax contributions exceed total income",
        );
        report.warn_above(
            self.tax_withheld,
            gross,
            "Tax withheld is larger than total income",
        );
        if self.qualifying_children > 10 {
            report.warning("More than 10 qualifying children is unusual; please double-check");
        }
        report
    }

    /// Estimate with the built-in 2025 tables
    pub fn compute(&self) -> CalcResult<TaxResult> {
        self.compute_with(&FEDERAL_2025)
    }

    pub fn compute_with(&self, tables: &TaxYearTables) -> CalcResult<TaxResult> {
        self.validate().into_result()?;

        let gross_income = self.earned_income + self.investment_income;
        let adjusted_gross_income = (gross_income - self.pre_tax_contributions).max(0.0);

        let standard = tables.standard_deduction(self.filing_status);
        let (deduction_kind, deduction) = if self.itemized_deductions > standard {
            (DeductionKind::Itemized, self.itemized_deductions)
        } else {
            (DeductionKind::Standard, standard)
        };

        let taxable_income = (adjusted_gross_income - deduction).max(0.0);
        let brackets = tables.brackets(self.filing_status).evaluate(taxable_income);
        let tax_before_credits = brackets.total_tax;

        let credits = compose_credits(
            &tables.child_credit,
            &tables.eitc,
            &CreditContext {
                status: self.filing_status,
                children: self.qualifying_children,
                earned_income: self.earned_income,
                agi: adjusted_gross_income,
                investment_income: self.investment_income,
                tax_before_credits,
            },
        );

        let tax_after_credits = (tax_before_credits - credits.nonrefundable_applied).max(0.0);
        let net_tax = tax_after_credits - credits.total_refundable();
        let balance_due = net_tax - self.tax_withheld;
        let effective_rate = if gross_income > 0.0 {
            net_tax.max(0.0) / gross_income
        } else {
            0.0
        };
        debug!(
            "tax estimate: taxable {:.2}, before credits {:.2}, net {:.2}",
            taxable_income, tax_before_credits, net_tax
        );

        Ok(TaxResult {
            gross_income,
            adjusted_gross_income,
            deduction_kind,
            deduction,
            taxable_income,
            marginal_rate: brackets.marginal_rate,
            brackets,
            tax_before_credits,
            credits,
            tax_after_credits,
            net_tax,
            tax_withheld: self.tax_withheld,
            balance_due,
            effective_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn single(earned: f64) -> TaxInputs {
        TaxInputs {
            filing_status: FilingStatus::Single,
            earned_income: earned,
            investment_income: 0.0,
            pre_tax_contributions: 0.0,
            itemized_deductions: 0.0,
            qualifying_children: 0,
            tax_withheld: 0.0,
        }
    }

    #[test]
    fn test_single_filer_without_credits() {
        let result = single(75_000.0).compute().unwrap();

        assert_eq!(result.deduction_kind, DeductionKind::Standard);
        assert_abs_diff_eq!(result.taxable_income, 59_250.0, epsilon = 1e-9);
        let expected = 11_925.0 * 0.10 + (48_475.0 - 11_925.0) * 0.12 + (59_250.0 - 48_475.0) * 0.22;
        assert_abs_diff_eq!(result.tax_before_credits, expected, epsilon = 1e-6);
        assert_eq!(result.marginal_rate, 0.22);
        assert_abs_diff_eq!(result.balance_due, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_itemized_used_when_larger() {
        let mut inputs = single(120_000.0);
        inputs.itemized_deductions = 25_000.0;
        let result = inputs.compute().unwrap();

        assert_eq!(result.deduction_kind, DeductionKind::Itemized);
        assert_abs_diff_eq!(result.taxable_income, 95_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_income_below_deduction_owes_nothing() {
        let result = single(10_000.0).compute().unwrap();

        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.tax_before_credits, 0.0);
        assert_eq!(result.brackets.effective_rate, 0.0);
    }

    #[test]
    fn test_nonrefundable_credit_floors_at_zero_but_refundable_goes_negative() {
        let inputs = TaxInputs {
            filing_status: FilingStatus::HeadOfHousehold,
            earned_income: 30_000.0,
            qualifying_children: 2,
            tax_withheld: 500.0,
            ..single(0.0)
        };
        let result = inputs.compute().unwrap();

        assert!(result.tax_after_credits >= 0.0);
        assert!(result.credits.earned_income_credit > 0.0);
        assert!(result.net_tax < 0.0);
        assert!(result.balance_due < -500.0);
    }

    #[test]
    fn test_negative_income_is_rejected() {
        let result = single(-1.0).compute();
        assert!(result.is_err());
        assert!(single(-1.0).validate().has_errors());
    }

    #[test]
    fn test_custom_tables() {
        let flat = crate::tax::BracketSet::from_tops(&[], &[0.10]).unwrap();
        let tables = FEDERAL_2025.with_brackets(FilingStatus::Single, flat);
        let result = single(25_750.0).compute_with(&tables).unwrap();

        assert_abs_diff_eq!(result.tax_before_credits, 1_000.0, epsilon = 1e-9);
    }
}
