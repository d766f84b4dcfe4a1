//! Three-phase balance projection for loans deferred while in school
//!
//! Phase 1 adds a disbursement every month (compounding monthly only when
//! interest accrues during school), phase 2 is the grace period with interest
//! but no new borrowing, phase 3 amortizes whatever balance is left.

use log::debug;
use serde::{Deserialize, Serialize};

use super::payment::{ensure_months, monthly_rate, payment_for, MAX_TERM_MONTHS};
use crate::error::{ensure_non_negative, CalcError, CalcResult};

/// Inputs for a deferred (school, then grace, then repayment) loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefermentPlan {
    /// Balance already owed when the projection starts
    pub starting_balance: f64,
    /// New borrowing added at the end of each in-school month
    pub monthly_disbursement: f64,
    pub annual_rate_percent: f64,
    pub school_months: u32,
    /// Unsubsidized loans accrue interest while in school
    pub interest_accrues_in_school: bool,
    pub grace_months: u32,
    pub repayment_months: u32,
}

/// Balance at each phase boundary and the resulting repayment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefermentProjection {
    pub total_borrowed: f64,
    pub balance_after_school: f64,
    pub balance_after_grace: f64,
    /// Interest added to the balance before repayment began
    pub capitalized_interest: f64,
    pub monthly_payment: f64,
    pub total_repaid: f64,
    /// Interest over the whole life of the loan, deferred and repayment
    pub total_interest: f64,
}

/// Thread the balance through school, grace and repayment
pub fn project_deferred_balance(plan: &DefermentPlan) -> CalcResult<DefermentProjection> {
    ensure_non_negative("starting balance", plan.starting_balance)?;
    ensure_non_negative("monthly disbursement", plan.monthly_disbursement)?;
    ensure_non_negative("annual rate", plan.annual_rate_percent)?;
    ensure_months("repayment term", plan.repayment_months)?;
    for (field, months) in [("school months", plan.school_months), ("grace months", plan.grace_months)] {
        if months > MAX_TERM_MONTHS {
            return Err(CalcError::invalid(
                field,
                format!("cannot exceed {MAX_TERM_MONTHS} months"),
            ));
        }
    }

    let i = monthly_rate(plan.annual_rate_percent);
    let total_borrowed =
        plan.starting_balance + plan.monthly_disbursement * plan.school_months as f64;

    let balance_after_school = accumulate_school(plan, i);
    let balance_after_grace = compound(balance_after_school, i, plan.grace_months);
    debug!(
        "deferment balances: school {:.2}, grace {:.2}",
        balance_after_school, balance_after_grace
    );

    let (monthly_payment, total_repaid) = if balance_after_grace > 0.0 {
        let payment = payment_for(balance_after_grace, plan.annual_rate_percent, plan.repayment_months);
        (payment, payment * plan.repayment_months as f64)
    } else {
        (0.0, 0.0)
    };

    Ok(DefermentProjection {
        total_borrowed,
        balance_after_school,
        balance_after_grace,
        capitalized_interest: balance_after_grace - total_borrowed,
        monthly_payment,
        total_repaid,
        total_interest: total_repaid - total_borrowed,
    })
}

fn accumulate_school(plan: &DefermentPlan, i: f64) -> f64 {
    let mut balance = plan.starting_balance;
    for _ in 0..plan.school_months {
        if plan.interest_accrues_in_school {
            balance *= 1.0 + i;
        }
        balance += plan.monthly_disbursement;
    }
    balance
}

fn compound(balance: f64, i: f64, months: u32) -> f64 {
    balance * (1.0 + i).powf(months as f64)
}
