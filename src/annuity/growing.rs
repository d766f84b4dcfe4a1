//! Present and future values of payment streams that grow each period

use serde::{Deserialize, Serialize};

/// Below this gap the discount and growth rates are treated as equal
pub const GROWTH_TOLERANCE: f64 = 1e-4;

/// A stream of `periods` payments, the first equal to `initial_payment`, each
/// later one `growth_rate` larger than the last. Payments fall at period end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowingAnnuity {
    pub initial_payment: f64,
    pub periods: u32,
    /// Periodic discount rate as a decimal (0.05 = 5%)
    pub discount_rate: f64,
    /// Periodic growth rate as a decimal, e.g. a COLA
    pub growth_rate: f64,
}

impl GrowingAnnuity {
    pub fn new(initial_payment: f64, periods: u32, discount_rate: f64, growth_rate: f64) -> Self {
        Self {
            initial_payment,
            periods,
            discount_rate,
            growth_rate,
        }
    }

    /// Payment made in 0-based period `k`
    pub fn payment_at(&self, k: u32) -> f64 {
        self.initial_payment * (1.0 + self.growth_rate).powf(k as f64)
    }

    /// `P·[1 − ((1+g)/(1+i))^n] / (i − g)`, or `P·n/(1+i)` when `i ≈ g`
    pub fn present_value(&self) -> f64 {
        if self.periods == 0 {
            return 0.0;
        }

        let i = self.discount_rate;
        let g = self.growth_rate;
        let n = self.periods as f64;

        if (i - g).abs() < GROWTH_TOLERANCE {
            return self.initial_payment * n / (1.0 + i);
        }

        let ratio = (1.0 + g) / (1.0 + i);
        self.initial_payment * (1.0 - ratio.powf(n)) / (i - g)
    }

    /// Value of the stream at the end of the last period
    pub fn future_value(&self) -> f64 {
        self.present_value() * (1.0 + self.discount_rate).powf(self.periods as f64)
    }

    /// Nominal sum of every payment, undiscounted
    pub fn total_received(&self) -> f64 {
        (0..self.periods).map(|k| self.payment_at(k)).sum()
    }
}

/// Grow a lump sum at an annual percentage rate; non-positive `years` is a no-op
pub fn future_value_lump_sum(principal: f64, annual_rate_percent: f64, years: f64) -> f64 {
    if years <= 0.0 {
        return principal;
    }
    principal * (1.0 + annual_rate_percent / 100.0).powf(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn brute_force_pv(annuity: &GrowingAnnuity) -> f64 {
        (1..=annuity.periods)
            .map(|k| annuity.payment_at(k - 1) / (1.0 + annuity.discount_rate).powi(k as i32))
            .sum()
    }

    #[test]
    fn test_level_annuity_matches_ordinary_annuity() {
        // $100/month for 12 months at 6% annual, as in the ordinary annuity case
        let annuity = GrowingAnnuity::new(100.0, 12, 0.005, 0.0);
        assert_abs_diff_eq!(annuity.present_value(), 1161.89, epsilon = 0.01);
    }

    #[test]
    fn test_closed_form_matches_summation() {
        let annuity = GrowingAnnuity::new(30_000.0, 25, 0.05, 0.02);
        assert_relative_eq!(annuity.present_value(), brute_force_pv(&annuity), max_relative = 1e-10);
    }

    #[test]
    fn test_equal_rates_use_limit() {
        let annuity = GrowingAnnuity::new(24_000.0, 20, 0.03, 0.03);
        let pv = annuity.present_value();

        assert!(pv.is_finite());
        assert_abs_diff_eq!(pv, 24_000.0 * 20.0 / 1.03, epsilon = 1e-6);
        assert_relative_eq!(pv, brute_force_pv(&annuity), max_relative = 1e-10);
    }

    #[test]
    fn test_nearly_equal_rates_stay_finite() {
        let annuity = GrowingAnnuity::new(1_000.0, 30, 0.04, 0.04 + 1e-12);
        assert!(annuity.present_value().is_finite());
    }

    #[test]
    fn test_total_received() {
        let annuity = GrowingAnnuity::new(1_000.0, 3, 0.05, 0.10);
        assert_abs_diff_eq!(annuity.total_received(), 1_000.0 + 1_100.0 + 1_210.0, epsilon = 1e-9);

        let empty = GrowingAnnuity::new(1_000.0, 0, 0.05, 0.10);
        assert_eq!(empty.total_received(), 0.0);
        assert_eq!(empty.present_value(), 0.0);
    }

    #[test]
    fn test_future_value_of_stream() {
        let annuity = GrowingAnnuity::new(1_000.0, 2, 0.10, 0.0);
        // 1000 grows one year, 1000 paid at the end
        assert_abs_diff_eq!(annuity.future_value(), 2_100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lump_sum_future_value() {
        assert_abs_diff_eq!(future_value_lump_sum(1_000.0, 10.0, 2.0), 1_210.0, epsilon = 1e-9);
        assert_eq!(future_value_lump_sum(1_000.0, 10.0, 0.0), 1_000.0);
        assert_eq!(future_value_lump_sum(1_000.0, 10.0, -3.0), 1_000.0);
    }
}
