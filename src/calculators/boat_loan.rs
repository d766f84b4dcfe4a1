//! Boat loan: price, down payment, trade-in, sales tax and fees into a monthly payment

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::{standard_schedule, AmortizationSchedule, LoanTerms, MAX_TERM_MONTHS};
use crate::error::{CalcError, CalcResult};
use crate::validation::ValidationReport;

/// Longest boat loan term accepted, in years
pub const MAX_TERM_YEARS: u32 = MAX_TERM_MONTHS / 12;

/// A dollar figure given directly or as a percentage of some base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AmountOrPercent {
    Amount(f64),
    Percent(f64),
}

impl AmountOrPercent {
    pub fn resolve(self, base: f64) -> f64 {
        match self {
            AmountOrPercent::Amount(v) => v,
            AmountOrPercent::Percent(p) => base * p / 100.0,
        }
    }

    fn raw(self) -> f64 {
        match self {
            AmountOrPercent::Amount(v) | AmountOrPercent::Percent(v) => v,
        }
    }
}

impl Default for AmountOrPercent {
    fn default() -> Self {
        AmountOrPercent::Amount(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoatLoanInputs {
    pub price: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    pub down_payment: AmountOrPercent,
    pub trade_in: f64,
    /// Percent form applies to price less trade-in
    pub sales_tax: AmountOrPercent,
    /// Registration, documentation and dealer fees
    pub fees: f64,
    /// Roll the fees into the loan instead of paying them up front
    pub fees_in_loan: bool,
    pub first_payment_date: Option<NaiveDate>,
}

impl Default for BoatLoanInputs {
    fn default() -> Self {
        Self {
            price: 50_000.0,
            annual_rate_percent: 7.5,
            term_years: 15,
            down_payment: AmountOrPercent::Percent(20.0),
            trade_in: 0.0,
            sales_tax: AmountOrPercent::Amount(0.0),
            fees: 0.0,
            fees_in_loan: false,
            first_payment_date: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoatLoanResult {
    pub loan_amount: f64,
    pub down_payment: f64,
    pub sales_tax: f64,
    /// Down payment plus any fees not rolled into the loan
    pub upfront_cash: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_of_payments: f64,
    /// Everything paid for the boat: cash up front, trade-in value and loan payments
    pub total_cost: f64,
    pub schedule: AmortizationSchedule,
}

impl BoatLoanInputs {
    fn sales_tax_amount(&self) -> f64 {
        self.sales_tax.resolve((self.price - self.trade_in).max(0.0))
    }

    fn financed_amount(&self) -> f64 {
        let down = self.down_payment.resolve(self.price);
        let fees = if self.fees_in_loan { self.fees } else { 0.0 };
        self.price - down - self.trade_in + self.sales_tax_amount() + fees
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.require_positive("Boat price", self.price);
        report.require_non_negative("Interest rate", self.annual_rate_percent);
        report.warn_above(
            self.annual_rate_percent,
            25.0,
            "Interest rate above 25% is unusually high for a boat loan",
        );
        if self.term_years == 0 {
            report.error("Loan term must be at least 1 year");
        } else if self.term_years > MAX_TERM_YEARS {
            report.error(format!("Loan term cannot exceed {MAX_TERM_YEARS} years"));
        } else if self.term_years > 20 {
            report.warning("Boat loans longer than 20 years are uncommon");
        }

        report.require_non_negative("Down payment", self.down_payment.raw());
        if let AmountOrPercent::Percent(p) = self.down_payment {
            if p > 100.0 {
                report.error("Down payment percentage cannot exceed 100%");
            }
        }
        report.require_non_negative("Trade-in value", self.trade_in);
        report.require_non_negative("Sales tax", self.sales_tax.raw());
        if let AmountOrPercent::Percent(p) = self.sales_tax {
            if p > 100.0 {
                report.error("Sales tax percentage cannot exceed 100%");
            }
        }
        report.require_non_negative("Fees", self.fees);

        if report.has_errors() {
            return report;
        }

        let down = self.down_payment.resolve(self.price);
        if down >= self.price {
            report.error("Down payment must be less than the boat price");
        } else if self.financed_amount() <= 0.0 {
            report.error("Down payment and trade-in cover the full price; there is nothing to finance");
        }
        report.warn_below(
            down,
            self.price * 0.10,
            "Most marine lenders expect a down payment of at least 10%",
        );
        report
    }

    pub fn compute(&self) -> CalcResult<BoatLoanResult> {
        self.validate().into_result()?;

        let down_payment = self.down_payment.resolve(self.price);
        let sales_tax = self.sales_tax_amount();
        let loan_amount = self.financed_amount();
        let upfront_cash = down_payment + if self.fees_in_loan { 0.0 } else { self.fees };

        let term_months = self
            .term_years
            .checked_mul(12)
            .ok_or_else(|| CalcError::invalid("term", "is too long"))?;
        let terms = LoanTerms::new(loan_amount, self.annual_rate_percent, term_months);
        let monthly_payment = terms.monthly_payment()?;
        let schedule = standard_schedule(&terms, self.first_payment_date)?;

        let total_of_payments = monthly_payment * terms.term_months as f64;
        let total_interest = total_of_payments - loan_amount;

        Ok(BoatLoanResult {
            loan_amount,
            down_payment,
            sales_tax,
            upfront_cash,
            monthly_payment,
            total_interest,
            total_of_payments,
            total_cost: upfront_cash + self.trade_in + total_of_payments,
            schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference() -> BoatLoanInputs {
        BoatLoanInputs {
            down_payment: AmountOrPercent::Amount(10_000.0),
            ..BoatLoanInputs::default()
        }
    }

    #[test]
    fn test_reference_boat_loan() {
        let result = reference().compute().unwrap();

        assert_abs_diff_eq!(result.loan_amount, 40_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.monthly_payment, 370.80, epsilon = 0.005);
        assert_abs_diff_eq!(result.total_interest, 26_744.89, epsilon = 0.02);
        assert_eq!(result.schedule.periods(), 180);
        assert_abs_diff_eq!(result.total_cost, 10_000.0 + result.total_of_payments, epsilon = 1e-9);
    }

    #[test]
    fn test_tax_and_fees_financed() {
        let inputs = BoatLoanInputs {
            trade_in: 5_000.0,
            sales_tax: AmountOrPercent::Percent(6.0),
            fees: 800.0,
            fees_in_loan: true,
            ..reference()
        };
        let result = inputs.compute().unwrap();

        // Tax on 45k
        assert_abs_diff_eq!(result.sales_tax, 2_700.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.loan_amount, 50_000.0 - 10_000.0 - 5_000.0 + 2_700.0 + 800.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.upfront_cash, 10_000.0, epsilon = 1e-9);

        let paid_up_front = BoatLoanInputs { fees_in_loan: false, ..inputs };
        let result = paid_up_front.compute().unwrap();
        assert_abs_diff_eq!(result.upfront_cash, 10_800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_percent_down_payment() {
        let result = BoatLoanInputs::default().compute().unwrap();
        assert_abs_diff_eq!(result.down_payment, 10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_warnings() {
        let inputs = BoatLoanInputs {
            annual_rate_percent: 29.0,
            term_years: 25,
            down_payment: AmountOrPercent::Percent(5.0),
            ..BoatLoanInputs::default()
        };
        let report = inputs.validate();

        assert!(!report.has_errors());
        assert_eq!(report.warnings().len(), 3);
        assert!(inputs.compute().is_ok());
    }

    #[test]
    fn test_errors_block_compute() {
        let cases = [
            BoatLoanInputs { price: 0.0, ..reference() },
            BoatLoanInputs { down_payment: AmountOrPercent::Amount(60_000.0), ..reference() },
            BoatLoanInputs { down_payment: AmountOrPercent::Percent(120.0), ..reference() },
            BoatLoanInputs { term_years: 0, ..reference() },
            BoatLoanInputs { trade_in: 45_000.0, ..reference() },
            BoatLoanInputs { fees: -1.0, ..reference() },
        ];
        for inputs in cases {
            assert!(inputs.validate().has_errors(), "{:?}", inputs);
            assert!(inputs.compute().is_err());
        }
    }

    #[test]
    fn test_term_beyond_cap_is_an_error() {
        let longest = BoatLoanInputs { term_years: MAX_TERM_YEARS, ..reference() };
        assert!(!longest.validate().has_errors());
        assert_eq!(longest.compute().unwrap().schedule.periods(), MAX_TERM_MONTHS);

        let message = format!("Loan term cannot exceed {MAX_TERM_YEARS} years");
        for term_years in [MAX_TERM_YEARS + 1, 400_000_000, u32::MAX] {
            let inputs = BoatLoanInputs { term_years, ..reference() };
            assert_eq!(inputs.validate().errors(), vec![message.as_str()]);
            assert!(inputs.compute().is_err());
        }
    }
}
