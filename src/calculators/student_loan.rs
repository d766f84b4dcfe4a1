//! Student loan calculator
//!
//! One input type covers the four things people ask of a student loan: the
//! payment for a balance, the effect of paying extra, the missing figure when
//! three of four are known, and where a deferred balance ends up.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::{
    compare_payoff, project_deferred_balance, solve_unknown, standard_schedule,
    AmortizationSchedule, DefermentPlan, DefermentProjection, ExtraPayments, LoanTerms,
    LoanVariables, PayoffComparison, RateSolverConfig, SolvedLoan, MAX_TERM_MONTHS,
};
use crate::error::CalcResult;
use crate::validation::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StudentLoanInputs {
    Payment {
        terms: LoanTerms,
        first_payment_date: Option<NaiveDate>,
    },
    Payoff {
        terms: LoanTerms,
        extras: ExtraPayments,
        first_payment_date: Option<NaiveDate>,
    },
    Solve {
        variables: LoanVariables,
    },
    Deferment {
        plan: DefermentPlan,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentLoanPayment {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub schedule: AmortizationSchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StudentLoanResult {
    Payment(StudentLoanPayment),
    Payoff(PayoffComparison),
    Solve(SolvedLoan),
    Deferment(DefermentProjection),
}

fn check_terms(report: &mut ValidationReport, terms: &LoanTerms) {
    report.require_positive("Loan amount", terms.principal);
    report.require_non_negative("Interest rate", terms.annual_rate_percent);
    report.warn_above(
        terms.annual_rate_percent,
        15.0,
        "Interest rate above 15% is unusually high for a student loan",
    );
    if terms.term_months == 0 {
        report.error("Repayment term must be at least 1 month");
    } else if terms.term_months > 360 {
        report.warning("Repayment terms longer than 30 years are unusual");
    }
    check_months_cap(report, "Repayment term", terms.term_months);
}

fn check_months_cap(report: &mut ValidationReport, label: &str, months: u32) {
    if months > MAX_TERM_MONTHS {
        report.error(format!("{label} cannot exceed {MAX_TERM_MONTHS} months"));
    }
}

impl StudentLoanInputs {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        match self {
            StudentLoanInputs::Payment { terms, .. } => check_terms(&mut report, terms),
            StudentLoanInputs::Payoff { terms, extras, .. } => {
                check_terms(&mut report, terms);
                report.require_non_negative("Extra monthly payment", extras.monthly);
                report.require_non_negative("Extra annual payment", extras.annual);
                report.require_non_negative("One-time extra payment", extras.one_time);
                if extras.is_empty() {
                    report.warning("No extra payments entered; the payoff matches the standard schedule");
                }
            }
            StudentLoanInputs::Solve { variables } => {
                let known = [
                    variables.principal.is_some_and(|v| v != 0.0),
                    variables.term_months.is_some_and(|v| v != 0),
                    variables.annual_rate_percent.is_some_and(|v| v != 0.0),
                    variables.payment.is_some_and(|v| v != 0.0),
                ];
                if known.iter().filter(|k| **k).count() != 3 {
                    report.error("Enter exactly three of loan amount, term, interest rate and monthly payment");
                }
                if let Some(n) = variables.term_months {
                    check_months_cap(&mut report, "Repayment term", n);
                }
                if let Some(p) = variables.principal {
                    report.require_non_negative("Loan amount", p);
                }
                if let Some(r) = variables.annual_rate_percent {
                    report.require_non_negative("Interest rate", r);
                }
                if let Some(pmt) = variables.payment {
                    report.require_non_negative("Monthly payment", pmt);
                }
            }
            StudentLoanInputs::Deferment { plan } => {
                report.require_non_negative("Current balance", plan.starting_balance);
                report.require_non_negative("Monthly disbursement", plan.monthly_disbursement);
                if plan.starting_balance == 0.0 && plan.monthly_disbursement == 0.0 {
                    report.error("Enter a current balance or a monthly disbursement");
                }
                report.require_non_negative("Interest rate", plan.annual_rate_percent);
                if plan.repayment_months == 0 {
                    report.error("Repayment term must be at least 1 month");
                }
                check_months_cap(&mut report, "Repayment term", plan.repayment_months);
                check_months_cap(&mut report, "Months in school", plan.school_months);
                check_months_cap(&mut report, "Grace period", plan.grace_months);
                if plan.grace_months > 12 {
                    report.warning("Grace periods are usually 6 months; check the loan terms");
                }
            }
        }
        report
    }

    pub fn compute(&self) -> CalcResult<StudentLoanResult> {
        self.validate().into_result()?;

        match self {
            StudentLoanInputs::Payment {
                terms,
                first_payment_date,
            } => {
                let monthly_payment = terms.monthly_payment()?;
                let schedule = standard_schedule(terms, *first_payment_date)?;
                let total_paid = monthly_payment * terms.term_months as f64;
                Ok(StudentLoanResult::Payment(StudentLoanPayment {
                    monthly_payment,
                    total_paid,
                    total_interest: total_paid - terms.principal,
                    schedule,
                }))
            }
            StudentLoanInputs::Payoff {
                terms,
                extras,
                first_payment_date,
            } => compare_payoff(terms, extras, *first_payment_date).map(StudentLoanResult::Payoff),
            StudentLoanInputs::Solve { variables } => {
                solve_unknown(variables, &RateSolverConfig::default()).map(StudentLoanResult::Solve)
            }
            StudentLoanInputs::Deferment { plan } => {
                project_deferred_balance(plan).map(StudentLoanResult::Deferment)
            }
        }
    }
}
