//! Hard failures raised by the calculation entry points
//!
//! Soft conditions (implausible but legal inputs) never show up here; they are
//! reported as warnings through [`crate::validation::ValidationReport`].

use thiserror::Error;

/// Error returned when a calculation cannot produce a result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A single input is outside its domain (negative rate, zero principal, ...)
    #[error("{field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The unknown-variable solver needs exactly three known values
    #[error("exactly three of principal, term, rate and payment must be supplied (got {supplied})")]
    InvalidInputCount { supplied: usize },

    /// The payment never covers the interest, so the balance never reaches zero
    #[error("a payment of {payment:.2} does not cover the first month's interest of {interest:.2}; the loan never pays off")]
    NeverAmortizes { payment: f64, interest: f64 },

    /// No annual rate between the solver bounds produces the requested payment
    #[error("no interest rate between {lower}% and {upper}% produces a payment of {payment:.2}")]
    RateOutOfRange { payment: f64, lower: f64, upper: f64 },

    /// A bracket table is not contiguous, not increasing, or not progressive
    #[error("invalid bracket table: {0}")]
    InvalidBracketTable(String),

    /// Validation found blocking errors before computing
    #[error("invalid inputs: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the library
pub type CalcResult<T> = Result<T, CalcError>;

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, "must be a finite number"))
    }
}

/// Require a strictly positive finite value
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}

/// Require a non-negative finite value
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid(field, "cannot be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ensure_positive("principal", 0.0).unwrap_err();
        assert_eq!(err.to_string(), "principal must be greater than zero");

        let err = ensure_non_negative("annual rate", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "annual rate cannot be negative");

        let err = ensure_finite("payment", f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "payment must be a finite number");
    }

    #[test]
    fn test_validation_joins_messages() {
        let err = CalcError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid inputs: a; b");
    }
}
