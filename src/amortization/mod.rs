//! Amortization engine: payment solvers, schedules and deferred balances

mod payment;
mod schedule;
mod deferment;

pub use payment::{
    monthly_payment, monthly_rate, solve_principal, solve_rate, solve_term, solve_unknown,
    LoanTerms, LoanVariable, LoanVariables, RateSolverConfig, SolvedLoan, TermSolution,
    MAX_TERM_MONTHS, UNPAYABLE_TERM_SENTINEL,
};
pub use schedule::{
    compare_payoff, generate_schedule, standard_schedule, AmortizationSchedule, ExtraPayments,
    PaymentRow, PayoffComparison, ScheduleSummary, YearTotals, BALANCE_EPSILON,
    MAX_SCHEDULE_PERIODS,
};
pub use deferment::{project_deferred_balance, DefermentPlan, DefermentProjection};
