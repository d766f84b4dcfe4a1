//! Input validation shared by every calculator
//!
//! Validators never fail: they collect human-readable messages, tagged as
//! blocking errors or advisory warnings, in the order they were found.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Value outside its domain; computing would fail
    Error,
    /// Legal but implausible value
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

/// Ordered, de-duplicated list of validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    fn push(&mut self, severity: Severity, message: String) {
        if self.issues.iter().any(|issue| issue.message == message) {
            return;
        }
        self.issues.push(ValidationIssue { severity, message });
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|issue| issue.severity == Severity::Error)
    }

    /// All messages, errors and warnings interleaved in discovery order
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.message.clone()).collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.by_severity(Severity::Warning)
    }

    fn by_severity(&self, severity: Severity) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .map(|issue| issue.message.as_str())
            .collect()
    }

    /// Turn blocking errors into a [`CalcError::Validation`]
    pub fn into_result(self) -> CalcResult<Self> {
        if self.has_errors() {
            let errors = self.errors().into_iter().map(String::from).collect();
            return Err(CalcError::Validation(errors));
        }
        Ok(self)
    }

    // ========================================================================
    // Field checks
    // ========================================================================

    /// Returns false (after recording an error) for NaN or infinite input
    pub fn require_finite(&mut self, label: &str, value: f64) -> bool {
        if value.is_finite() {
            return true;
        }
        self.error(format!("{label} must be a valid number"));
        false
    }

    pub fn require_positive(&mut self, label: &str, value: f64) {
        if self.require_finite(label, value) && value <= 0.0 {
            self.error(format!("{label} must be greater than zero"));
        }
    }

    pub fn require_non_negative(&mut self, label: &str, value: f64) {
        if self.require_finite(label, value) && value < 0.0 {
            self.error(format!("{label} cannot be negative"));
        }
    }

    /// Inclusive range check
    pub fn require_range(&mut self, label: &str, value: f64, min: f64, max: f64) {
        if self.require_finite(label, value) && !(min..=max).contains(&value) {
            self.error(format!("{label} must be between {min} and {max}"));
        }
    }

    pub fn warn_above(&mut self, value: f64, limit: f64, message: impl Into<String>) {
        if value.is_finite() && value > limit {
            self.warning(message);
        }
    }

    pub fn warn_below(&mut self, value: f64, limit: f64, message: impl Into<String>) {
        if value.is_finite() && value < limit {
            self.warning(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_order_and_drops_duplicates() {
        let mut report = ValidationReport::new();
        report.warning("rate looks high");
        report.error("principal must be greater than zero");
        report.warning("rate looks high");

        assert_eq!(
            report.messages(),
            vec!["rate looks high", "principal must be greater than zero"]
        );
        assert!(report.has_errors());
        assert_eq!(report.warnings(), vec!["rate looks high"]);
    }

    #[test]
    fn test_checks_handle_any_number() {
        let mut report = ValidationReport::new();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1e300, 0.0, 1e300] {
            report.require_positive("amount", value);
            report.require_non_negative("amount", value);
            report.require_range("rate", value, 0.0, 100.0);
            report.warn_above(value, 50.0, "too big");
        }
        assert!(report.has_errors());
    }

    #[test]
    fn test_warnings_do_not_block() {
        let mut report = ValidationReport::new();
        report.warn_above(60.0, 30.0, "interest rate above 30% is unusual");

        assert!(!report.has_errors());
        assert!(report.clone().into_result().is_ok());

        report.require_positive("price", -5.0);
        match report.into_result() {
            Err(CalcError::Validation(errors)) => assert_eq!(errors, vec!["price must be greater than zero"]),
            other => panic!("unexpected {:?}", other),
        }
    }
}
