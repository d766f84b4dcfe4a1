//! Progressive bracket evaluation
//!
//! Works for any banded-rate schedule (income tax, tiered pricing): each band
//! taxes only the slice of the amount that falls inside it.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// One band of a progressive schedule; `upper == None` means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: f64,
    pub upper: Option<f64>,
    /// Rate as a decimal (0.22 = 22%)
    pub rate: f64,
}

/// Contiguous bands covering `[0, ∞)` with non-decreasing rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSet {
    brackets: Vec<TaxBracket>,
}

/// The part of an amount taxed inside one band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub lower: f64,
    pub upper: Option<f64>,
    pub rate: f64,
    pub taxable_amount: f64,
    pub tax: f64,
}

/// Result of running an amount through a [`BracketSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketEvaluation {
    pub amount: f64,
    pub total_tax: f64,
    /// Rate of the highest band the amount reached
    pub marginal_rate: f64,
    /// `total_tax / amount`, zero for a zero amount
    pub effective_rate: f64,
    /// Bands with a non-zero slice, lowest first
    pub breakdown: Vec<BracketSlice>,
}

impl BracketSet {
    /// Build from explicit bands, rejecting gaps, overlaps and regressive rates
    pub fn new(brackets: Vec<TaxBracket>) -> CalcResult<Self> {
        check_brackets(&brackets)?;
        Ok(Self { brackets })
    }

    /// Build from band tops: `rates[k]` applies up to `tops[k]`, the last rate above
    pub fn from_tops(tops: &[f64], rates: &[f64]) -> CalcResult<Self> {
        if rates.len() != tops.len() + 1 {
            return Err(CalcError::InvalidBracketTable(format!(
                "{} tops need {} rates, got {}",
                tops.len(),
                tops.len() + 1,
                rates.len()
            )));
        }
        Self::new(assemble(tops, rates))
    }

    /// Same as [`BracketSet::from_tops`] for the built-in tables, which the
    /// tests check against [`BracketSet::new`]
    pub(crate) fn from_tops_unchecked(tops: &[f64], rates: &[f64]) -> Self {
        Self {
            brackets: assemble(tops, rates),
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Tax `amount` band by band
    pub fn evaluate(&self, amount: f64) -> BracketEvaluation {
        let mut total_tax = 0.0;
        let mut marginal_rate = 0.0;
        let mut breakdown = Vec::new();

        for bracket in &self.brackets {
            if amount <= bracket.lower {
                break;
            }

            let top = bracket.upper.map_or(amount, |upper| upper.min(amount));
            let taxable_amount = top - bracket.lower;
            if taxable_amount <= 0.0 {
                continue;
            }

            let tax = taxable_amount * bracket.rate;
            total_tax += tax;
            marginal_rate = bracket.rate;
            breakdown.push(BracketSlice {
                lower: bracket.lower,
                upper: bracket.upper,
                rate: bracket.rate,
                taxable_amount,
                tax,
            });
        }

        let effective_rate = if amount > 0.0 { total_tax / amount } else { 0.0 };

        BracketEvaluation {
            amount,
            total_tax,
            marginal_rate,
            effective_rate,
            breakdown,
        }
    }
}

fn assemble(tops: &[f64], rates: &[f64]) -> Vec<TaxBracket> {
    let mut lower = 0.0;
    let mut brackets = Vec::with_capacity(rates.len());
    for (k, &rate) in rates.iter().enumerate() {
        let upper = tops.get(k).copied();
        brackets.push(TaxBracket { lower, upper, rate });
        if let Some(top) = upper {
            lower = top;
        }
    }
    brackets
}

fn check_brackets(brackets: &[TaxBracket]) -> CalcResult<()> {
    let invalid = |msg: String| Err(CalcError::InvalidBracketTable(msg));

    let Some(first) = brackets.first() else {
        return invalid("no brackets".into());
    };
    if first.lower != 0.0 {
        return invalid(format!("first bracket starts at {} instead of 0", first.lower));
    }

    for (k, bracket) in brackets.iter().enumerate() {
        if !(0.0..=1.0).contains(&bracket.rate) {
            return invalid(format!("bracket {} rate {} is not between 0 and 1", k + 1, bracket.rate));
        }

        let is_last = k + 1 == brackets.len();
        match (bracket.upper, is_last) {
            (None, false) => {
                return invalid(format!("bracket {} is unbounded but is not the last", k + 1));
            }
            (Some(upper), true) => {
                return invalid(format!("last bracket ends at {} instead of being unbounded", upper));
            }
            (Some(upper), false) if upper <= bracket.lower => {
                return invalid(format!("bracket {} upper bound {} is not above {}", k + 1, upper, bracket.lower));
            }
            _ => {}
        }

        if let Some(next) = brackets.get(k + 1) {
            if Some(next.lower) != bracket.upper {
                return invalid(format!("gap or overlap between brackets {} and {}", k + 1, k + 2));
            }
            if next.rate < bracket.rate {
                return invalid(format!("bracket {} rate falls below bracket {}", k + 2, k + 1));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn simple_set() -> BracketSet {
        BracketSet::from_tops(&[10_000.0, 40_000.0], &[0.10, 0.20, 0.30]).unwrap()
    }

    #[test]
    fn test_amount_inside_first_two_bands() {
        let eval = simple_set().evaluate(25_000.0);

        assert_eq!(eval.breakdown.len(), 2);
        assert_abs_diff_eq!(eval.breakdown[0].tax, 1_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eval.breakdown[1].taxable_amount, 15_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eval.total_tax, 4_000.0, epsilon = 1e-9);
        assert_eq!(eval.marginal_rate, 0.20);
        assert_abs_diff_eq!(eval.effective_rate, 0.16, epsilon = 1e-12);
    }

    #[test]
    fn test_top_band_is_unbounded() {
        let eval = simple_set().evaluate(100_000.0);

        assert_eq!(eval.breakdown.len(), 3);
        assert_abs_diff_eq!(eval.total_tax, 1_000.0 + 6_000.0 + 18_000.0, epsilon = 1e-9);
        assert_eq!(eval.marginal_rate, 0.30);
    }

    #[test]
    fn test_zero_amount() {
        let eval = simple_set().evaluate(0.0);

        assert_eq!(eval.total_tax, 0.0);
        assert_eq!(eval.effective_rate, 0.0);
        assert_eq!(eval.marginal_rate, 0.0);
        assert!(eval.breakdown.is_empty());
    }

    #[test]
    fn test_breakdown_sums_and_effective_below_marginal() {
        let set = simple_set();
        for amount in [1.0, 9_999.0, 10_000.0, 10_001.0, 39_999.99, 55_555.0, 1e7] {
            let eval = set.evaluate(amount);
            let summed: f64 = eval.breakdown.iter().map(|s| s.tax).sum();
            assert_abs_diff_eq!(summed, eval.total_tax, epsilon = 1e-6);
            assert!(eval.effective_rate <= eval.marginal_rate + 1e-12);
            assert!(eval.effective_rate > 0.0);
        }
    }

    #[test]
    fn test_amount_on_boundary_stays_in_lower_band() {
        let eval = simple_set().evaluate(10_000.0);
        assert_eq!(eval.breakdown.len(), 1);
        assert_eq!(eval.marginal_rate, 0.10);
    }

    #[test]
    fn test_rejects_malformed_tables() {
        let gap = vec![
            TaxBracket { lower: 0.0, upper: Some(100.0), rate: 0.1 },
            TaxBracket { lower: 150.0, upper: None, rate: 0.2 },
        ];
        assert!(BracketSet::new(gap).is_err());

        let regressive = vec![
            TaxBracket { lower: 0.0, upper: Some(100.0), rate: 0.2 },
            TaxBracket { lower: 100.0, upper: None, rate: 0.1 },
        ];
        assert!(BracketSet::new(regressive).is_err());

        let bounded_top = vec![TaxBracket { lower: 0.0, upper: Some(100.0), rate: 0.1 }];
        assert!(BracketSet::new(bounded_top).is_err());

        let not_from_zero = vec![TaxBracket { lower: 5.0, upper: None, rate: 0.1 }];
        assert!(BracketSet::new(not_from_zero).is_err());

        assert!(BracketSet::new(Vec::new()).is_err());
        assert!(BracketSet::from_tops(&[100.0], &[0.1]).is_err());
        assert!(BracketSet::from_tops(&[100.0, 50.0], &[0.1, 0.2, 0.3]).is_err());
    }
}
