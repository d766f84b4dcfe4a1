//! Progressive tax computation
//!
//! - **Brackets**: band-by-band evaluation of any progressive schedule
//! - **Tables**: built-in 2025 federal brackets, deductions and credit parameters
//! - **Credits**: child tax credit and earned income credit with phase-outs
//! - **Loader**: bracket tables from CSV
//! - **Calculator**: a full return estimate from income to refund or balance due

mod brackets;
mod tables;
mod credits;
mod calculator;
pub mod loader;

pub use brackets::{BracketEvaluation, BracketSet, BracketSlice, TaxBracket};
pub use tables::{FilingStatus, TaxYearTables, FEDERAL_2025};
pub use credits::{
    compose_credits, phase_out_reduction, ChildCreditRules, CreditContext, CreditSummary,
    EitcParameters, EitcRules, PhaseOutCredit,
};
pub use calculator::{DeductionKind, TaxInputs, TaxResult};
pub use loader::{load_bracket_set, load_bracket_set_from_reader};
