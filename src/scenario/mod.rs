//! "Option A vs option B" comparisons built on the annuity valuator
//!
//! Every comparator values both options, projects them year by year over the
//! longer of the two spans, and reports a [`Comparison`] verdict.

mod comparison;
mod lump_sum;
mod retirement;
mod survivor;

pub use comparison::{Comparison, Side, MAX_AGE};
pub use lump_sum::{
    compare_lump_sum_vs_pension, LumpSumComparison, LumpSumOutcome, LumpSumVsPension,
    LumpSumYear, PensionOutcome,
};
pub use retirement::{
    compare_retirement_ages, ClaimValue, RetirementAges, RetirementComparison, RetirementYear,
};
pub use survivor::{
    compare_survivor_options, OptionValue, Regime, SurvivorComparison, SurvivorOptions,
    SurvivorYear,
};
