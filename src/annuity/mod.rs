//! Growing-annuity valuation and break-even search
//!
//! Supports:
//! - Present value of a stream growing at a fixed rate (COLA, inflation)
//! - Future value of a lump sum
//! - Nominal total of a growing stream
//! - Linear break-even scans between two value curves

mod growing;
mod break_even;

pub use growing::{future_value_lump_sum, GrowingAnnuity, GROWTH_TOLERANCE};
pub use break_even::break_even_age;
