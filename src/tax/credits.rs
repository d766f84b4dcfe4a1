//! Credits with linear phase-outs
//!
//! The child tax credit is split into the part that offsets tax (non-refundable)
//! and the additional refundable part. The earned income credit is fully
//! refundable. Only non-refundable credits are limited by the liability.

use serde::{Deserialize, Serialize};

use super::tables::FilingStatus;

/// A flat per-unit credit that shrinks linearly above an income threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseOutCredit {
    pub per_unit: f64,
    pub threshold: f64,
    /// Credit lost per dollar of income above the threshold
    pub reduction_rate: f64,
}

impl PhaseOutCredit {
    pub fn full_amount(&self, units: u32) -> f64 {
        self.per_unit * units as f64
    }

    /// Credit after the phase-out; never negative
    pub fn amount(&self, units: u32, income: f64) -> f64 {
        let full = self.full_amount(units);
        full - phase_out_reduction(full, income, self.threshold, self.reduction_rate)
    }
}

/// `min(full, (income − threshold)·rate)`, zero below the threshold
pub fn phase_out_reduction(full: f64, income: f64, threshold: f64, rate: f64) -> f64 {
    let excess = (income - threshold).max(0.0);
    (excess * rate).min(full)
}

/// Child tax credit parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChildCreditRules {
    pub per_child: f64,
    pub phase_out_threshold: f64,
    pub phase_out_threshold_joint: f64,
    pub reduction_rate: f64,
    /// Most of each child's credit that can be refunded
    pub refundable_cap_per_child: f64,
    pub refundable_earned_income_floor: f64,
    /// Share of earned income above the floor that can be refunded
    pub refundable_rate: f64,
}

impl ChildCreditRules {
    pub fn credit(&self, status: FilingStatus) -> PhaseOutCredit {
        PhaseOutCredit {
            per_unit: self.per_child,
            threshold: if status.is_joint() {
                self.phase_out_threshold_joint
            } else {
                self.phase_out_threshold
            },
            reduction_rate: self.reduction_rate,
        }
    }
}

/// Earned income credit parameters for one child count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EitcParameters {
    pub phase_in_rate: f64,
    pub max_credit: f64,
    pub phase_out_rate: f64,
    pub phase_out_start: f64,
    pub phase_out_start_joint: f64,
}

/// Earned income credit parameters for 0, 1, 2 and 3+ children
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EitcRules {
    pub by_children: [EitcParameters; 4],
    /// No credit when investment income exceeds this
    pub investment_income_limit: f64,
}

impl EitcRules {
    /// Credit from the statutory phase-in and phase-out rates
    ///
    /// The credit phases in on earned income up to the maximum, then phases out
    /// on the larger of earned income and AGI. Married-separate filers get none.
    pub fn credit(
        &self,
        status: FilingStatus,
        children: u32,
        earned_income: f64,
        agi: f64,
        investment_income: f64,
    ) -> f64 {
        if status == FilingStatus::MarriedSeparately
            || investment_income > self.investment_income_limit
            || earned_income <= 0.0
        {
            return 0.0;
        }

        let params = &self.by_children[(children as usize).min(3)];
        let phased_in = (earned_income * params.phase_in_rate).min(params.max_credit);
        let start = if status.is_joint() {
            params.phase_out_start_joint
        } else {
            params.phase_out_start
        };
        let income = earned_income.max(agi);

        phased_in - phase_out_reduction(phased_in, income, start, params.phase_out_rate)
    }
}

/// Credits applied to one return
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditSummary {
    /// Child tax credit after phase-out, before the refundability split
    pub child_tax_credit: f64,
    /// Portion of the child credit used against tax
    pub nonrefundable_applied: f64,
    /// Additional child tax credit (refundable)
    pub additional_child_credit: f64,
    pub earned_income_credit: f64,
}

impl CreditSummary {
    pub fn total_refundable(&self) -> f64 {
        self.additional_child_credit + self.earned_income_credit
    }

    pub fn total(&self) -> f64 {
        self.nonrefundable_applied + self.total_refundable()
    }
}

/// Everything about a return that the credit rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditContext {
    pub status: FilingStatus,
    pub children: u32,
    pub earned_income: f64,
    pub agi: f64,
    pub investment_income: f64,
    pub tax_before_credits: f64,
}

/// Work out the child and earned income credits for a return
pub fn compose_credits(ctc: &ChildCreditRules, eitc: &EitcRules, ctx: &CreditContext) -> CreditSummary {
    let child_tax_credit = ctc.credit(ctx.status).amount(ctx.children, ctx.agi);
    let nonrefundable_applied = child_tax_credit.min(ctx.tax_before_credits.max(0.0));

    let unused = child_tax_credit - nonrefundable_applied;
    let earned_cap =
        (ctx.earned_income - ctc.refundable_earned_income_floor).max(0.0) * ctc.refundable_rate;
    let additional_child_credit = unused
        .min(ctc.refundable_cap_per_child * ctx.children as f64)
        .min(earned_cap);

    let earned_income_credit = eitc.credit(
        ctx.status,
        ctx.children,
        ctx.earned_income,
        ctx.agi,
        ctx.investment_income,
    );

    CreditSummary {
        child_tax_credit,
        nonrefundable_applied,
        additional_child_credit,
        earned_income_credit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::FEDERAL_2025;
    use approx::assert_abs_diff_eq;

    fn ctx(status: FilingStatus, children: u32, income: f64, tax: f64) -> CreditContext {
        CreditContext {
            status,
            children,
            earned_income: income,
            agi: income,
            investment_income: 0.0,
            tax_before_credits: tax,
        }
    }

    #[test]
    fn test_phase_out_never_goes_negative() {
        let credit = PhaseOutCredit {
            per_unit: 2_000.0,
            threshold: 200_000.0,
            reduction_rate: 0.05,
        };

        assert_eq!(credit.amount(2, 150_000.0), 4_000.0);
        assert_abs_diff_eq!(credit.amount(2, 220_000.0), 3_000.0, epsilon = 1e-9);
        assert_eq!(credit.amount(2, 1_000_000.0), 0.0);
        assert_eq!(credit.amount(0, 50_000.0), 0.0);
    }

    #[test]
    fn test_joint_threshold_is_higher() {
        let rules = &FEDERAL_2025.child_credit;
        let single = rules.credit(FilingStatus::Single).amount(1, 300_000.0);
        let joint = rules.credit(FilingStatus::MarriedJointly).amount(1, 300_000.0);

        assert_eq!(single, 0.0);
        assert_eq!(joint, 2_200.0);
    }

    #[test]
    fn test_child_credit_split_when_liability_is_small() {
        let tables = &*FEDERAL_2025;
        let summary = compose_credits(
            &tables.child_credit,
            &tables.eitc,
            &ctx(FilingStatus::HeadOfHousehold, 2, 40_000.0, 1_000.0),
        );

        assert_eq!(summary.child_tax_credit, 4_400.0);
        assert_eq!(summary.nonrefundable_applied, 1_000.0);
        // Unused 3400, per-child cap 3400, earned cap 0.15 * 37500 = 5625
        assert_abs_diff_eq!(summary.additional_child_credit, 3_400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_refundable_part_limited_by_earned_income() {
        let tables = &*FEDERAL_2025;
        let summary = compose_credits(
            &tables.child_credit,
            &tables.eitc,
            &ctx(FilingStatus::Single, 1, 6_500.0, 0.0),
        );

        assert_eq!(summary.nonrefundable_applied, 0.0);
        assert_abs_diff_eq!(summary.additional_child_credit, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_eitc_phase_in_plateau_and_phase_out() {
        let eitc = &FEDERAL_2025.eitc;

        let phase_in = eitc.credit(FilingStatus::Single, 1, 5_000.0, 5_000.0, 0.0);
        assert_abs_diff_eq!(phase_in, 1_700.0, epsilon = 1e-9);

        let plateau = eitc.credit(FilingStatus::Single, 1, 15_000.0, 15_000.0, 0.0);
        assert_eq!(plateau, 4_328.0);

        let phase_out = eitc.credit(FilingStatus::Single, 1, 33_350.0, 33_350.0, 0.0);
        assert_abs_diff_eq!(phase_out, 4_328.0 - 10_000.0 * 0.1598, epsilon = 1e-9);

        let gone = eitc.credit(FilingStatus::Single, 1, 80_000.0, 80_000.0, 0.0);
        assert_eq!(gone, 0.0);
    }

    #[test]
    fn test_eitc_exclusions() {
        let eitc = &FEDERAL_2025.eitc;

        assert_eq!(eitc.credit(FilingStatus::MarriedSeparately, 2, 15_000.0, 15_000.0, 0.0), 0.0);
        assert_eq!(eitc.credit(FilingStatus::Single, 2, 15_000.0, 15_000.0, 20_000.0), 0.0);
        assert_eq!(eitc.credit(FilingStatus::Single, 2, 0.0, 0.0, 0.0), 0.0);
        // Four children use the 3+ schedule
        assert_eq!(
            eitc.credit(FilingStatus::Single, 4, 20_000.0, 20_000.0, 0.0),
            eitc.credit(FilingStatus::Single, 3, 20_000.0, 20_000.0, 0.0)
        );
    }
}
