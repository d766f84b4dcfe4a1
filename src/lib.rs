//! Financial calculator core
//!
//! This library provides:
//! - Loan amortization: payments, unknown-variable solving, schedules with extra payments
//! - Deferred student-loan projections
//! - Growing-annuity valuation and break-even search
//! - Progressive tax-bracket evaluation with 2025 federal tables and credits
//! - Pension scenario comparisons (lump sum, survivor options, retirement age)
//! - Per-calculator facades with validation, plus display formatters

pub mod error;
pub mod validation;
pub mod format;
pub mod amortization;
pub mod annuity;
pub mod tax;
pub mod scenario;
pub mod calculators;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use validation::{Severity, ValidationIssue, ValidationReport};
pub use amortization::{
    compare_payoff, generate_schedule, monthly_payment, solve_term, solve_unknown,
    AmortizationSchedule, ExtraPayments, LoanTerms, PaymentRow, TermSolution,
};
pub use annuity::{break_even_age, future_value_lump_sum, GrowingAnnuity};
pub use tax::{BracketSet, FilingStatus, TaxInputs, TaxResult};
pub use scenario::Comparison;
