//! Loan payment arithmetic
//!
//! Closed forms for the monthly payment, the payoff term and the principal,
//! plus a bounded bisection for the annual rate (no closed form exists).
//! Rates are annual percentages (7.5 means 7.5%) and compound monthly.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::schedule::MAX_SCHEDULE_PERIODS;
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, CalcError, CalcResult};

/// Term reported by legacy display code for a loan that never pays off
pub const UNPAYABLE_TERM_SENTINEL: u32 = 999;

/// Longest term accepted by the payment and principal formulas (50 years)
pub const MAX_TERM_MONTHS: u32 = MAX_SCHEDULE_PERIODS;

/// Principal, annual rate (percent) and term of a fixed-rate loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    /// Level monthly payment that retires the loan over its term
    pub fn monthly_payment(&self) -> CalcResult<f64> {
        monthly_payment(self.principal, self.annual_rate_percent, self.term_months)
    }
}

/// Convert an annual percentage to a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Ordinary-annuity payment: `P·i(1+i)^n / ((1+i)^n − 1)`, or `P/n` at zero rate
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> CalcResult<f64> {
    ensure_positive("principal", principal)?;
    ensure_non_negative("annual rate", annual_rate_percent)?;
    ensure_term(term_months)?;

    Ok(payment_for(principal, annual_rate_percent, term_months))
}

/// Payment formula without input checks; callers have already validated
pub(crate) fn payment_for(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let i = monthly_rate(annual_rate_percent);
    if i == 0.0 {
        return principal / term_months as f64;
    }

    let growth = (1.0 + i).powf(term_months as f64);
    principal * i * growth / (growth - 1.0)
}

fn ensure_term(term_months: u32) -> CalcResult<()> {
    ensure_months("term", term_months)
}

/// A repayment term must be between one month and [`MAX_TERM_MONTHS`]
pub(crate) fn ensure_months(field: &'static str, months: u32) -> CalcResult<()> {
    if months == 0 {
        return Err(CalcError::invalid(field, "must be at least one month"));
    }
    if months > MAX_TERM_MONTHS {
        return Err(CalcError::invalid(
            field,
            format!("cannot exceed {MAX_TERM_MONTHS} months"),
        ));
    }
    Ok(())
}

/// Outcome of solving for the number of payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermSolution {
    /// Whole number of monthly payments needed (last one may be partial)
    Periods(u32),
    /// The payment does not cover the first month's interest
    NeverAmortizes,
}

impl TermSolution {
    pub fn periods(self) -> Option<u32> {
        match self {
            TermSolution::Periods(n) => Some(n),
            TermSolution::NeverAmortizes => None,
        }
    }

    /// Collapse to a number, using `sentinel` for a loan that never pays off
    pub fn as_periods_or(self, sentinel: u32) -> u32 {
        self.periods().unwrap_or(sentinel)
    }
}

/// Solve for the term: `n = −ln(1 − iP/pmt) / ln(1+i)`, rounded up
pub fn solve_term(principal: f64, payment: f64, annual_rate_percent: f64) -> CalcResult<TermSolution> {
    ensure_positive("principal", principal)?;
    ensure_positive("payment", payment)?;
    ensure_non_negative("annual rate", annual_rate_percent)?;

    let i = monthly_rate(annual_rate_percent);
    if i == 0.0 {
        return Ok(TermSolution::Periods(whole_periods(principal / payment)));
    }

    if payment <= principal * i {
        debug!(
            "payment {:.2} does not cover interest {:.2}; loan never amortizes",
            payment,
            principal * i
        );
        return Ok(TermSolution::NeverAmortizes);
    }

    let n = -(1.0 - i * principal / payment).ln() / (1.0 + i).ln();
    Ok(TermSolution::Periods(whole_periods(n)))
}

/// Round a fractional period count up, ignoring float noise just above an integer
fn whole_periods(n: f64) -> u32 {
    let rounded = (n - 1e-9).ceil().max(1.0);
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Inverse of the payment formula: `pmt·((1+i)^n − 1) / (i(1+i)^n)`
pub fn solve_principal(payment: f64, annual_rate_percent: f64, term_months: u32) -> CalcResult<f64> {
    ensure_positive("payment", payment)?;
    ensure_non_negative("annual rate", annual_rate_percent)?;
    ensure_term(term_months)?;

    let i = monthly_rate(annual_rate_percent);
    if i == 0.0 {
        return Ok(payment * term_months as f64);
    }

    let growth = (1.0 + i).powf(term_months as f64);
    Ok(payment * (growth - 1.0) / (i * growth))
}

/// Bounds and stopping rule for the rate bisection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSolverConfig {
    /// Lowest annual rate considered (percent)
    pub lower_percent: f64,
    /// Highest annual rate considered (percent)
    pub upper_percent: f64,
    pub max_iterations: u32,
    /// Stop once the implied payment is this close to the target (dollars)
    pub payment_tolerance: f64,
}

impl Default for RateSolverConfig {
    fn default() -> Self {
        Self {
            lower_percent: 0.0,
            upper_percent: 50.0,
            max_iterations: 100,
            payment_tolerance: 0.01,
        }
    }
}

/// Solve for the annual rate by bisection
///
/// The payment is strictly increasing in the rate for a fixed principal and
/// term, so an implied payment above the target means the midpoint rate is too
/// high and becomes the new upper bound.
pub fn solve_rate(
    principal: f64,
    payment: f64,
    term_months: u32,
    config: &RateSolverConfig,
) -> CalcResult<f64> {
    ensure_positive("principal", principal)?;
    ensure_positive("payment", payment)?;
    ensure_term(term_months)?;

    let tolerance = config.payment_tolerance;
    let lowest = payment_for(principal, config.lower_percent, term_months);
    let highest = payment_for(principal, config.upper_percent, term_months);
    if payment < lowest - tolerance || payment > highest + tolerance {
        return Err(CalcError::RateOutOfRange {
            payment,
            lower: config.lower_percent,
            upper: config.upper_percent,
        });
    }

    let mut low = config.lower_percent;
    let mut high = config.upper_percent;

    for iteration in 1..=config.max_iterations {
        let mid = (low + high) / 2.0;
        let implied = payment_for(principal, mid, term_months);

        if (implied - payment).abs() < tolerance {
            debug!("rate solve converged to {:.6}% after {} iterations", mid, iteration);
            return Ok(mid);
        }

        if implied > payment {
            high = mid;
        } else {
            low = mid;
        }
    }

    let best = (low + high) / 2.0;
    warn!(
        "rate solve stopped after {} iterations without reaching {:.2} tolerance; returning {:.6}%",
        config.max_iterations, tolerance, best
    );
    Ok(best)
}

/// Which loan variable the solver computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanVariable {
    Principal,
    Term,
    Rate,
    Payment,
}

/// Loan variables as supplied by a caller; `None` or zero means unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanVariables {
    pub principal: Option<f64>,
    pub term_months: Option<u32>,
    pub annual_rate_percent: Option<f64>,
    pub payment: Option<f64>,
}

/// All four loan variables after solving for the missing one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolvedLoan {
    pub principal: f64,
    pub term_months: u32,
    pub annual_rate_percent: f64,
    pub payment: f64,
    pub solved_for: LoanVariable,
}

impl SolvedLoan {
    pub fn total_paid(&self) -> f64 {
        self.payment * self.term_months as f64
    }

    pub fn total_interest(&self) -> f64 {
        self.total_paid() - self.principal
    }
}

/// Given exactly three of principal, term, rate and payment, compute the fourth
pub fn solve_unknown(vars: &LoanVariables, config: &RateSolverConfig) -> CalcResult<SolvedLoan> {
    let principal = vars.principal.filter(|v| *v != 0.0);
    let term = vars.term_months.filter(|v| *v != 0);
    let rate = vars.annual_rate_percent.filter(|v| *v != 0.0);
    let payment = vars.payment.filter(|v| *v != 0.0);

    let supplied = [principal.is_some(), term.is_some(), rate.is_some(), payment.is_some()]
        .iter()
        .filter(|known| **known)
        .count();
    if supplied != 3 {
        return Err(CalcError::InvalidInputCount { supplied });
    }

    match (principal, term, rate, payment) {
        (Some(p), Some(n), Some(r), None) => Ok(SolvedLoan {
            principal: p,
            term_months: n,
            annual_rate_percent: r,
            payment: monthly_payment(p, r, n)?,
            solved_for: LoanVariable::Payment,
        }),
        (None, Some(n), Some(r), Some(pmt)) => Ok(SolvedLoan {
            principal: solve_principal(pmt, r, n)?,
            term_months: n,
            annual_rate_percent: r,
            payment: pmt,
            solved_for: LoanVariable::Principal,
        }),
        (Some(p), None, Some(r), Some(pmt)) => match solve_term(p, pmt, r)? {
            TermSolution::Periods(n) => Ok(SolvedLoan {
                principal: p,
                term_months: n,
                annual_rate_percent: r,
                payment: pmt,
                solved_for: LoanVariable::Term,
            }),
            TermSolution::NeverAmortizes => Err(CalcError::NeverAmortizes {
                payment: pmt,
                interest: p * monthly_rate(r),
            }),
        },
        (Some(p), Some(n), None, Some(pmt)) => {
            ensure_finite("payment", pmt)?;
            Ok(SolvedLoan {
                principal: p,
                term_months: n,
                annual_rate_percent: solve_rate(p, pmt, n, config)?,
                payment: pmt,
                solved_for: LoanVariable::Rate,
            })
        }
        _ => Err(CalcError::InvalidInputCount { supplied }),
    }
}
