//! Period-by-period amortization schedules with extra payments
//!
//! A single generator backs both the plain schedule and the "original vs
//! accelerated" payoff comparison: run it once with the extras zeroed and once
//! with the borrower's extras, then diff the totals.

use chrono::{Months, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::payment::{monthly_rate, LoanTerms};
use crate::error::{ensure_non_negative, ensure_positive, CalcResult};

/// Hard cap on schedule length (50 years of monthly payments)
pub const MAX_SCHEDULE_PERIODS: u32 = 600;

/// Balance at or below which the loan counts as paid off (one cent)
pub const BALANCE_EPSILON: f64 = 0.01;

/// Optional payments on top of the scheduled one
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayments {
    /// Added to every payment
    pub monthly: f64,
    /// Added on periods 12, 24, 36, ...
    pub annual: f64,
    /// Applied to the balance before the first payment
    pub one_time: f64,
}

impl ExtraPayments {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.monthly <= 0.0 && self.annual <= 0.0 && self.one_time <= 0.0
    }

    fn check(&self) -> CalcResult<()> {
        ensure_non_negative("extra monthly payment", self.monthly)?;
        ensure_non_negative("extra annual payment", self.annual)?;
        ensure_non_negative("one-time extra payment", self.one_time)?;
        Ok(())
    }

    /// Extra amount due with the given 1-based period
    fn for_period(&self, period: u32) -> f64 {
        let annual = if period % 12 == 0 { self.annual } else { 0.0 };
        self.monthly + annual
    }
}

/// One payment in a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRow {
    /// 1-based period number
    pub period: u32,
    /// Due date, when the schedule was given a first payment date
    pub date: Option<NaiveDate>,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Complete schedule from first payment to payoff (or the period cap)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<PaymentRow>,
    /// One-time reduction applied before period 1
    pub upfront_reduction: f64,
    pub total_interest: f64,
    /// All money paid, including the upfront reduction
    pub total_paid: f64,
    /// False when the period cap stopped a schedule that was still owing
    pub fully_amortized: bool,
}

impl AmortizationSchedule {
    pub fn periods(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.balance).unwrap_or(0.0)
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }

    /// Date of the last payment, if dates were requested
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.rows.last().and_then(|r| r.date)
    }

    /// Collapse rows into per-year totals (year 1 = periods 1-12)
    pub fn yearly_totals(&self) -> Vec<YearTotals> {
        let mut years: Vec<YearTotals> = Vec::new();
        for row in &self.rows {
            let year = (row.period - 1) / 12 + 1;
            match years.last_mut() {
                Some(totals) if totals.year == year => {
                    totals.payments += row.payment;
                    totals.principal += row.principal;
                    totals.interest += row.interest;
                    totals.ending_balance = row.balance;
                }
                _ => years.push(YearTotals {
                    year,
                    payments: row.payment,
                    principal: row.principal,
                    interest: row.interest,
                    ending_balance: row.balance,
                }),
            }
        }
        years
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            periods: self.periods(),
            total_interest: self.total_interest,
            total_paid: self.total_paid,
            payoff_date: self.payoff_date(),
        }
    }
}

/// Aggregated payments for one loan year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearTotals {
    pub year: u32,
    pub payments: f64,
    pub principal: f64,
    pub interest: f64,
    pub ending_balance: f64,
}

/// Headline figures of a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub payoff_date: Option<NaiveDate>,
}

/// Build the schedule for `principal` repaid at `base_payment` plus any extras
///
/// Each period charges interest on the running balance, then applies the base
/// payment and whichever extras fall due. The principal portion is capped at the
/// remaining balance so the final payment never overshoots.
pub fn generate_schedule(
    principal: f64,
    base_payment: f64,
    annual_rate_percent: f64,
    extras: &ExtraPayments,
    first_payment_date: Option<NaiveDate>,
) -> CalcResult<AmortizationSchedule> {
    ensure_positive("principal", principal)?;
    ensure_positive("payment", base_payment)?;
    ensure_non_negative("annual rate", annual_rate_percent)?;
    extras.check()?;

    let i = monthly_rate(annual_rate_percent);
    let upfront_reduction = extras.one_time.min(principal);
    let mut balance = principal - upfront_reduction;

    let mut rows = Vec::new();
    let mut total_interest = 0.0;
    let mut total_paid = upfront_reduction;

    let mut period = 0;
    while balance > BALANCE_EPSILON && period < MAX_SCHEDULE_PERIODS {
        period += 1;

        let interest = balance * i;
        let mut payment = base_payment + extras.for_period(period);
        let mut principal_portion = payment - interest;
        if principal_portion > balance {
            principal_portion = balance;
            payment = balance + interest;
        }

        balance -= principal_portion;
        total_interest += interest;
        total_paid += payment;

        rows.push(PaymentRow {
            period,
            date: first_payment_date
                .and_then(|d| d.checked_add_months(Months::new(period - 1))),
            payment,
            principal: principal_portion,
            interest,
            balance,
        });
    }

    let fully_amortized = balance <= BALANCE_EPSILON;
    if !fully_amortized {
        warn!(
            "schedule stopped at the {} period cap with {:.2} still owing",
            MAX_SCHEDULE_PERIODS, balance
        );
    }

    Ok(AmortizationSchedule {
        rows,
        upfront_reduction,
        total_interest,
        total_paid,
        fully_amortized,
    })
}

/// Schedule for the level payment of `terms`, without extras
pub fn standard_schedule(
    terms: &LoanTerms,
    first_payment_date: Option<NaiveDate>,
) -> CalcResult<AmortizationSchedule> {
    let payment = terms.monthly_payment()?;
    generate_schedule(
        terms.principal,
        payment,
        terms.annual_rate_percent,
        &ExtraPayments::none(),
        first_payment_date,
    )
}

/// Original schedule against the schedule with extra payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffComparison {
    pub monthly_payment: f64,
    pub original: ScheduleSummary,
    pub accelerated: ScheduleSummary,
    pub months_saved: u32,
    pub interest_saved: f64,
    /// Reduction in total money paid over the life of the loan
    pub total_paid_saved: f64,
    /// The accelerated schedule itself
    pub schedule: AmortizationSchedule,
}

/// Compare the contractual schedule of `terms` against paying `extras` on top
pub fn compare_payoff(
    terms: &LoanTerms,
    extras: &ExtraPayments,
    first_payment_date: Option<NaiveDate>,
) -> CalcResult<PayoffComparison> {
    let monthly_payment = terms.monthly_payment()?;

    let original = generate_schedule(
        terms.principal,
        monthly_payment,
        terms.annual_rate_percent,
        &ExtraPayments::none(),
        first_payment_date,
    )?;
    let accelerated = generate_schedule(
        terms.principal,
        monthly_payment,
        terms.annual_rate_percent,
        extras,
        first_payment_date,
    )?;

    let months_saved = original.periods().saturating_sub(accelerated.periods());
    let interest_saved = original.total_interest - accelerated.total_interest;
    let total_paid_saved = original.total_paid - accelerated.total_paid;
    debug!(
        "payoff comparison: {} -> {} periods, {:.2} interest saved",
        original.periods(),
        accelerated.periods(),
        interest_saved
    );

    Ok(PayoffComparison {
        monthly_payment,
        original: original.summary(),
        accelerated: accelerated.summary(),
        months_saved,
        interest_saved,
        total_paid_saved,
        schedule: accelerated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn boat_terms() -> LoanTerms {
        LoanTerms::new(40_000.0, 7.5, 180)
    }

    #[test]
    fn test_standard_schedule_totals() {
        let schedule = standard_schedule(&boat_terms(), None).unwrap();

        assert_eq!(schedule.periods(), 180);
        assert!(schedule.fully_amortized);
        assert_abs_diff_eq!(schedule.total_interest, 26_744.89, epsilon = 0.01);
        assert_abs_diff_eq!(schedule.final_balance(), 0.0, epsilon = BALANCE_EPSILON);
    }

    #[test]
    fn test_rows_conserve_principal() {
        let schedule = standard_schedule(&LoanTerms::new(25_000.0, 5.5, 120), None).unwrap();

        assert_abs_diff_eq!(schedule.total_principal(), 25_000.0, epsilon = 0.01);

        let mut previous = f64::MAX;
        for row in &schedule.rows {
            assert_abs_diff_eq!(row.principal + row.interest, row.payment, epsilon = 1e-9);
            assert!(row.balance <= previous, "balance rose at period {}", row.period);
            previous = row.balance;
        }
    }

    #[test]
    fn test_zero_rate_schedule_has_no_interest() {
        let schedule = standard_schedule(&LoanTerms::new(6_000.0, 0.0, 24), None).unwrap();

        assert_eq!(schedule.periods(), 24);
        assert_eq!(schedule.total_interest, 0.0);
        assert_abs_diff_eq!(schedule.total_paid, 6_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_final_payment_is_capped() {
        // 1000 at 0% with 300/month: last payment is the 100 remainder
        let schedule =
            generate_schedule(1_000.0, 300.0, 0.0, &ExtraPayments::none(), None).unwrap();

        assert_eq!(schedule.periods(), 4);
        let last = schedule.rows.last().unwrap();
        assert_abs_diff_eq!(last.payment, 100.0, epsilon = 1e-9);
        assert_eq!(last.balance, 0.0);
    }

    #[test]
    fn test_annual_extra_lands_on_twelfth_periods() {
        let extras = ExtraPayments {
            annual: 1_000.0,
            ..Default::default()
        };
        let schedule = generate_schedule(20_000.0, 400.0, 0.0, &extras, None).unwrap();

        assert_abs_diff_eq!(schedule.rows[10].payment, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule.rows[11].payment, 1_400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule.rows[12].payment, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_one_time_extra_reduces_opening_balance() {
        let extras = ExtraPayments {
            one_time: 5_000.0,
            ..Default::default()
        };
        let schedule = generate_schedule(10_000.0, 500.0, 0.0, &extras, None).unwrap();

        assert_eq!(schedule.upfront_reduction, 5_000.0);
        assert_eq!(schedule.periods(), 10);
        assert_abs_diff_eq!(schedule.total_paid, 10_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_insufficient_payment_hits_cap() {
        let schedule =
            generate_schedule(25_000.0, 50.0, 5.5, &ExtraPayments::none(), None).unwrap();

        assert_eq!(schedule.periods(), MAX_SCHEDULE_PERIODS);
        assert!(!schedule.fully_amortized);
    }

    #[test]
    fn test_extras_never_lengthen_or_cost_more() {
        let terms = boat_terms();
        for extras in [
            ExtraPayments { monthly: 50.0, ..Default::default() },
            ExtraPayments { annual: 1_200.0, ..Default::default() },
            ExtraPayments { one_time: 3_000.0, ..Default::default() },
            ExtraPayments { monthly: 25.0, annual: 500.0, one_time: 1_000.0 },
        ] {
            let comparison = compare_payoff(&terms, &extras, None).unwrap();
            assert!(comparison.accelerated.periods <= comparison.original.periods);
            assert!(comparison.accelerated.total_interest < comparison.original.total_interest);
            assert!(comparison.interest_saved > 0.0);
        }

        let none = compare_payoff(&terms, &ExtraPayments::none(), None).unwrap();
        assert_eq!(none.months_saved, 0);
        assert_abs_diff_eq!(none.interest_saved, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_payoff_dates_follow_calendar_months() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let schedule = standard_schedule(&LoanTerms::new(1_200.0, 0.0, 3), Some(start)).unwrap();

        assert_eq!(schedule.rows[0].date, Some(start));
        assert_eq!(schedule.rows[1].date, NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(schedule.payoff_date(), NaiveDate::from_ymd_opt(2025, 3, 31));
    }

    #[test]
    fn test_yearly_totals() {
        let schedule = standard_schedule(&LoanTerms::new(24_000.0, 0.0, 24), None).unwrap();
        let years = schedule.yearly_totals();

        assert_eq!(years.len(), 2);
        assert_abs_diff_eq!(years[0].principal, 12_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(years[0].ending_balance, 12_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(years[1].ending_balance, 0.0, epsilon = 1e-6);
    }
}
