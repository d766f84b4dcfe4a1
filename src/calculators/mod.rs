//! Calculator facades
//!
//! Each calculator pairs an inputs struct with `validate()`, which reports
//! every problem without failing, and `compute()`, which re-validates and
//! returns the full result or a [`crate::CalcError`].

mod boat_loan;
mod investment;
mod ira;
mod pension;
mod simple_interest;
mod student_loan;

pub use boat_loan::{AmountOrPercent, BoatLoanInputs, BoatLoanResult};
pub use investment::{
    Compounding, ContributionFrequency, ContributionTiming, InvestmentInputs, InvestmentResult,
    InvestmentYear,
};
pub use ira::{ira_future_value, IraAccount, IraInputs, IraKind, IraResult, IraYear, IRA_CONTRIBUTION_LIMIT};
pub use pension::{PensionInputs, PensionResult};
pub use simple_interest::{SimpleInterestInputs, SimpleInterestResult, SimpleInterestYear};
pub use student_loan::{StudentLoanInputs, StudentLoanPayment, StudentLoanResult};
