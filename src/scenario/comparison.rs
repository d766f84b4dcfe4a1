//! Common "option A vs option B" verdict

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Present values closer than half a cent are a tie
const TIE_TOLERANCE: f64 = 0.005;

/// Oldest age accepted for any life expectancy
pub const MAX_AGE: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

/// Which option is worth more today, and by how much
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub better: Side,
    pub better_label: String,
    /// Absolute gap between the two present values
    pub difference: f64,
    /// Gap as a percentage of the smaller present value
    pub percent_difference: f64,
    /// First age at which the second option's cumulative payments catch up
    /// with the first's; the end of the span when they never do
    pub break_even_age: u32,
}

impl Comparison {
    /// Higher present value wins; `tie` decides equal values
    pub fn between(first: (&str, f64), second: (&str, f64), tie: Side, break_even_age: u32) -> Self {
        let (first_label, first_pv) = first;
        let (second_label, second_pv) = second;

        let difference = (first_pv - second_pv).abs();
        let better = if difference < TIE_TOLERANCE {
            tie
        } else if first_pv > second_pv {
            Side::First
        } else {
            Side::Second
        };

        let lower = first_pv.min(second_pv);
        let percent_difference = if lower > 0.0 { difference / lower * 100.0 } else { 0.0 };

        let better_label = match better {
            Side::First => first_label,
            Side::Second => second_label,
        };

        Self {
            better,
            better_label: better_label.to_string(),
            difference,
            percent_difference,
            break_even_age,
        }
    }
}

/// Factor that discounts a payment `years` out at an annual percentage rate
pub(crate) fn discount_factor(annual_rate_percent: f64, years: f64) -> f64 {
    (1.0 + annual_rate_percent / 100.0).powf(-years)
}

pub(crate) fn ensure_age(field: &'static str, age: u32) -> CalcResult<()> {
    if age > MAX_AGE {
        return Err(CalcError::invalid(field, format!("cannot exceed {MAX_AGE}")));
    }
    Ok(())
}

/// Cumulative total at `age` for rows starting at `start_age`, saturating past the end
pub(crate) fn cumulative_at(cumulative: &[f64], start_age: u32, age: u32) -> f64 {
    if age < start_age {
        return 0.0;
    }
    let idx = (age - start_age) as usize;
    cumulative
        .get(idx)
        .or_else(|| cumulative.last())
        .copied()
        .unwrap_or(0.0)
}
