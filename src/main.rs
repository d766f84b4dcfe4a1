//! fincalc CLI
//!
//! Runs any calculator from the command line and prints a text report, or the
//! full result as JSON with `--json`.

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use fincalc::amortization::{
    AmortizationSchedule, DefermentPlan, ExtraPayments, LoanTerms, LoanVariable, LoanVariables,
};
use fincalc::calculators::{
    AmountOrPercent, BoatLoanInputs, BoatLoanResult, Compounding, ContributionFrequency,
    ContributionTiming, InvestmentInputs, InvestmentResult, IraInputs, IraKind, IraResult,
    PensionInputs, PensionResult, SimpleInterestInputs, SimpleInterestResult, StudentLoanInputs,
    StudentLoanResult,
};
use fincalc::format::{format_currency, format_currency_whole, format_duration, format_percent};
use fincalc::scenario::{Comparison, LumpSumVsPension, RetirementAges, SurvivorOptions};
use fincalc::tax::{load_bracket_set, DeductionKind, FilingStatus, TaxInputs, TaxResult, FEDERAL_2025};
use fincalc::{CalcResult, ValidationReport};

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    version,
    about = "Loan, investment, retirement and tax calculators"
)]
struct Cli {
    #[arg(long, global = true, help = "Print the full result as JSON")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly payment and total cost of a boat loan
    BoatLoan(BoatLoanArgs),
    /// Student loan payment, payoff, solver and deferment
    StudentLoan {
        #[command(subcommand)]
        mode: StudentLoanCommand,
    },
    /// Interest that does not compound
    SimpleInterest(SimpleInterestArgs),
    /// Compound growth with regular contributions
    Investment(InvestmentArgs),
    /// Traditional against Roth IRA
    Ira(IraArgs),
    /// 2025 federal income tax estimate
    Tax(TaxArgs),
    /// Pension decisions
    Pension {
        #[command(subcommand)]
        decision: PensionCommand,
    },
}

// ============================================================================
// Argument types
// ============================================================================

#[derive(Args, Debug)]
struct BoatLoanArgs {
    #[arg(long)]
    price: f64,
    #[arg(long, help = "Annual interest rate in percent")]
    rate: f64,
    #[arg(long, help = "Loan term in years")]
    years: u32,
    #[arg(long, conflicts_with = "down_payment_percent", help = "Down payment in dollars")]
    down_payment: Option<f64>,
    #[arg(long, help = "Down payment as a percent of the price")]
    down_payment_percent: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    trade_in: f64,
    #[arg(long, conflicts_with = "sales_tax_percent", help = "Sales tax in dollars")]
    sales_tax: Option<f64>,
    #[arg(long, help = "Sales tax percent, applied to price less trade-in")]
    sales_tax_percent: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    fees: f64,
    #[arg(long, help = "Finance the fees instead of paying them up front")]
    fees_in_loan: bool,
    #[arg(long, help = "First payment date, YYYY-MM-DD")]
    first_payment: Option<NaiveDate>,
    #[arg(long, help = "Print the yearly amortization summary")]
    schedule: bool,
}

impl From<&BoatLoanArgs> for BoatLoanInputs {
    fn from(args: &BoatLoanArgs) -> Self {
        let down_payment = match (args.down_payment, args.down_payment_percent) {
            (_, Some(pct)) => AmountOrPercent::Percent(pct),
            (amount, None) => AmountOrPercent::Amount(amount.unwrap_or(0.0)),
        };
        let sales_tax = match (args.sales_tax, args.sales_tax_percent) {
            (_, Some(pct)) => AmountOrPercent::Percent(pct),
            (amount, None) => AmountOrPercent::Amount(amount.unwrap_or(0.0)),
        };
        BoatLoanInputs {
            price: args.price,
            annual_rate_percent: args.rate,
            term_years: args.years,
            down_payment,
            trade_in: args.trade_in,
            sales_tax,
            fees: args.fees,
            fees_in_loan: args.fees_in_loan,
            first_payment_date: args.first_payment,
        }
    }
}

#[derive(Args, Debug)]
struct LoanArgs {
    #[arg(long)]
    principal: f64,
    #[arg(long, help = "Annual interest rate in percent")]
    rate: f64,
    #[arg(long, help = "Repayment term in months")]
    months: u32,
    #[arg(long, help = "First payment date, YYYY-MM-DD")]
    first_payment: Option<NaiveDate>,
}

impl LoanArgs {
    fn terms(&self) -> LoanTerms {
        LoanTerms::new(self.principal, self.rate, self.months)
    }
}

#[derive(Subcommand, Debug)]
enum StudentLoanCommand {
    /// Level payment for a balance
    Payment {
        #[command(flatten)]
        loan: LoanArgs,
        #[arg(long, help = "Print the yearly amortization summary")]
        schedule: bool,
    },
    /// Effect of paying extra
    Payoff {
        #[command(flatten)]
        loan: LoanArgs,
        #[arg(long, default_value_t = 0.0)]
        extra_monthly: f64,
        #[arg(long, default_value_t = 0.0, help = "Extra paid every 12th payment")]
        extra_annual: f64,
        #[arg(long, default_value_t = 0.0, help = "Extra paid once before the first payment")]
        extra_one_time: f64,
    },
    /// Supply three of principal, months, rate and payment to solve the fourth
    Solve {
        #[arg(long)]
        principal: Option<f64>,
        #[arg(long)]
        months: Option<u32>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        payment: Option<f64>,
    },
    /// Balance after school and grace, then the repayment
    Deferment {
        #[arg(long, default_value_t = 0.0)]
        balance: f64,
        #[arg(long, default_value_t = 0.0, help = "New borrowing each month in school")]
        monthly_disbursement: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 0)]
        school_months: u32,
        #[arg(long, help = "Interest accrues while in school (unsubsidized)")]
        unsubsidized: bool,
        #[arg(long, default_value_t = 6)]
        grace_months: u32,
        #[arg(long, default_value_t = 120)]
        repayment_months: u32,
    },
}

impl From<&StudentLoanCommand> for StudentLoanInputs {
    fn from(cmd: &StudentLoanCommand) -> Self {
        match cmd {
            StudentLoanCommand::Payment { loan, .. } => StudentLoanInputs::Payment {
                terms: loan.terms(),
                first_payment_date: loan.first_payment,
            },
            StudentLoanCommand::Payoff {
                loan,
                extra_monthly,
                extra_annual,
                extra_one_time,
            } => StudentLoanInputs::Payoff {
                terms: loan.terms(),
                extras: ExtraPayments {
                    monthly: *extra_monthly,
                    annual: *extra_annual,
                    one_time: *extra_one_time,
                },
                first_payment_date: loan.first_payment,
            },
            StudentLoanCommand::Solve {
                principal,
                months,
                rate,
                payment,
            } => StudentLoanInputs::Solve {
                variables: LoanVariables {
                    principal: *principal,
                    term_months: *months,
                    annual_rate_percent: *rate,
                    payment: *payment,
                },
            },
            StudentLoanCommand::Deferment {
                balance,
                monthly_disbursement,
                rate,
                school_months,
                unsubsidized,
                grace_months,
                repayment_months,
            } => StudentLoanInputs::Deferment {
                plan: DefermentPlan {
                    starting_balance: *balance,
                    monthly_disbursement: *monthly_disbursement,
                    annual_rate_percent: *rate,
                    school_months: *school_months,
                    interest_accrues_in_school: *unsubsidized,
                    grace_months: *grace_months,
                    repayment_months: *repayment_months,
                },
            },
        }
    }
}

#[derive(Args, Debug)]
struct SimpleInterestArgs {
    #[arg(long)]
    principal: f64,
    #[arg(long, help = "Annual rate in percent")]
    rate: f64,
    #[arg(long, help = "Time in years, fractions allowed")]
    years: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFrequency {
    Monthly,
    Annually,
}

impl From<CliFrequency> for ContributionFrequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Monthly => ContributionFrequency::Monthly,
            CliFrequency::Annually => ContributionFrequency::Annually,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTiming {
    Beginning,
    End,
}

impl From<CliTiming> for ContributionTiming {
    fn from(value: CliTiming) -> Self {
        match value {
            CliTiming::Beginning => ContributionTiming::Beginning,
            CliTiming::End => ContributionTiming::End,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCompounding {
    Annually,
    Quarterly,
    Monthly,
    Daily,
}

impl From<CliCompounding> for Compounding {
    fn from(value: CliCompounding) -> Self {
        match value {
            CliCompounding::Annually => Compounding::Annually,
            CliCompounding::Quarterly => Compounding::Quarterly,
            CliCompounding::Monthly => Compounding::Monthly,
            CliCompounding::Daily => Compounding::Daily,
        }
    }
}

#[derive(Args, Debug)]
struct InvestmentArgs {
    #[arg(long, default_value_t = 0.0)]
    initial: f64,
    #[arg(long, default_value_t = 0.0)]
    contribution: f64,
    #[arg(long, value_enum, default_value_t = CliFrequency::Monthly)]
    frequency: CliFrequency,
    #[arg(long, value_enum, default_value_t = CliTiming::End)]
    timing: CliTiming,
    #[arg(long, help = "Expected annual return in percent")]
    rate: f64,
    #[arg(long, value_enum, default_value_t = CliCompounding::Monthly)]
    compounding: CliCompounding,
    #[arg(long)]
    years: u32,
    #[arg(long, help = "Annual inflation in percent, to report today's dollars")]
    inflation: Option<f64>,
}

impl From<&InvestmentArgs> for InvestmentInputs {
    fn from(args: &InvestmentArgs) -> Self {
        InvestmentInputs {
            initial_amount: args.initial,
            contribution: args.contribution,
            contribution_frequency: args.frequency.into(),
            contribution_timing: args.timing.into(),
            annual_return_percent: args.rate,
            compounding: args.compounding.into(),
            years: args.years,
            inflation_rate_percent: args.inflation,
        }
    }
}

#[derive(Args, Debug)]
struct IraArgs {
    #[arg(long, default_value_t = 0.0)]
    balance: f64,
    #[arg(long)]
    contribution: f64,
    #[arg(long, help = "Expected annual return in percent")]
    rate: f64,
    #[arg(long)]
    years: u32,
    #[arg(long, help = "Marginal tax rate today, percent")]
    current_tax: f64,
    #[arg(long, help = "Expected tax rate in retirement, percent")]
    retirement_tax: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFilingStatus {
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

impl From<CliFilingStatus> for FilingStatus {
    fn from(value: CliFilingStatus) -> Self {
        match value {
            CliFilingStatus::Single => FilingStatus::Single,
            CliFilingStatus::MarriedJointly => FilingStatus::MarriedJointly,
            CliFilingStatus::MarriedSeparately => FilingStatus::MarriedSeparately,
            CliFilingStatus::HeadOfHousehold => FilingStatus::HeadOfHousehold,
        }
    }
}

#[derive(Args, Debug)]
struct TaxArgs {
    #[arg(long, value_enum, default_value_t = CliFilingStatus::Single)]
    status: CliFilingStatus,
    #[arg(long, help = "Wages and self-employment income")]
    income: f64,
    #[arg(long, default_value_t = 0.0)]
    investment_income: f64,
    #[arg(long, default_value_t = 0.0, help = "401(k), traditional IRA and HSA contributions")]
    pre_tax: f64,
    #[arg(long, default_value_t = 0.0)]
    itemized: f64,
    #[arg(long, default_value_t = 0)]
    children: u32,
    #[arg(long, default_value_t = 0.0)]
    withheld: f64,
    #[arg(long, help = "CSV of lower,upper,rate_percent replacing the built-in brackets")]
    brackets: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum PensionCommand {
    /// Take the lump sum or the monthly pension
    LumpSum {
        #[arg(long)]
        lump_sum: f64,
        #[arg(long)]
        monthly_pension: f64,
        #[arg(long, default_value_t = 0.0)]
        cola: f64,
        #[arg(long)]
        retirement_age: u32,
        #[arg(long)]
        life_expectancy: u32,
        #[arg(long, default_value_t = 5.0)]
        discount_rate: f64,
        #[arg(long, default_value_t = 5.0)]
        investment_return: f64,
    },
    /// Single-life against joint-and-survivor
    Survivor {
        #[arg(long)]
        single_life: f64,
        #[arg(long)]
        joint: f64,
        #[arg(long, default_value_t = 50.0)]
        survivor_percent: f64,
        #[arg(long)]
        pop_up: bool,
        #[arg(long, default_value_t = 0.0)]
        cola: f64,
        #[arg(long, default_value_t = 5.0)]
        discount_rate: f64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        spouse_age: u32,
        #[arg(long)]
        life_expectancy: u32,
        #[arg(long)]
        spouse_life_expectancy: u32,
    },
    /// Retire early on a smaller benefit or wait for a larger one
    RetireAge {
        #[arg(long)]
        early_age: u32,
        #[arg(long, help = "Annual benefit when retiring early")]
        early_benefit: f64,
        #[arg(long)]
        later_age: u32,
        #[arg(long, help = "Annual benefit when retiring later")]
        later_benefit: f64,
        #[arg(long, default_value_t = 0.0)]
        cola: f64,
        #[arg(long)]
        life_expectancy: u32,
        #[arg(long, default_value_t = 5.0)]
        discount_rate: f64,
    },
}

impl From<&PensionCommand> for PensionInputs {
    fn from(cmd: &PensionCommand) -> Self {
        match *cmd {
            PensionCommand::LumpSum {
                lump_sum,
                monthly_pension,
                cola,
                retirement_age,
                life_expectancy,
                discount_rate,
                investment_return,
            } => PensionInputs::LumpSum(LumpSumVsPension {
                lump_sum,
                monthly_pension,
                cola_percent: cola,
                retirement_age,
                life_expectancy,
                discount_rate_percent: discount_rate,
                investment_return_percent: investment_return,
            }),
            PensionCommand::Survivor {
                single_life,
                joint,
                survivor_percent,
                pop_up,
                cola,
                discount_rate,
                age,
                spouse_age,
                life_expectancy,
                spouse_life_expectancy,
            } => PensionInputs::Survivor(SurvivorOptions {
                single_life_monthly: single_life,
                joint_monthly: joint,
                survivor_percent,
                pop_up,
                cola_percent: cola,
                discount_rate_percent: discount_rate,
                primary_age: age,
                spouse_age,
                primary_life_expectancy: life_expectancy,
                spouse_life_expectancy,
            }),
            PensionCommand::RetireAge {
                early_age,
                early_benefit,
                later_age,
                later_benefit,
                cola,
                life_expectancy,
                discount_rate,
            } => PensionInputs::RetirementAge(RetirementAges {
                early_age,
                early_annual_benefit: early_benefit,
                later_age,
                later_annual_benefit: later_benefit,
                cola_percent: cola,
                life_expectancy,
                discount_rate_percent: discount_rate,
            }),
        }
    }
}

// ============================================================================
// Running
// ============================================================================

/// Print validation messages, stop on errors, then compute and render
fn run<T, F, R>(json: bool, report: ValidationReport, compute: F, render: R) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> CalcResult<T>,
    R: FnOnce(&T),
{
    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }
    for error in report.errors() {
        eprintln!("error: {error}");
    }
    if report.has_errors() {
        bail!("inputs failed validation");
    }

    let result = compute()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render(&result);
    }
    Ok(())
}

fn line(label: &str, value: impl AsRef<str>) {
    println!("  {:<28}{}", label, value.as_ref());
}

fn print_yearly_schedule(schedule: &AmortizationSchedule) {
    println!();
    println!("  {:>4} {:>14} {:>14} {:>14} {:>16}", "Year", "Paid", "Principal", "Interest", "Balance");
    for year in schedule.yearly_totals() {
        println!(
            "  {:>4} {:>14} {:>14} {:>14} {:>16}",
            year.year,
            format_currency(year.payments),
            format_currency(year.principal),
            format_currency(year.interest),
            format_currency(year.ending_balance),
        );
    }
}

fn print_comparison(comparison: &Comparison) {
    println!();
    line("Better option", &comparison.better_label);
    line(
        "Advantage",
        format!(
            "{} ({})",
            format_currency(comparison.difference),
            format_percent(comparison.percent_difference, 1)
        ),
    );
    line("Break-even age", comparison.break_even_age.to_string());
}

fn render_boat_loan(result: &BoatLoanResult, with_schedule: bool) {
    println!("Boat loan");
    line("Loan amount", format_currency(result.loan_amount));
    line("Down payment", format_currency(result.down_payment));
    line("Sales tax", format_currency(result.sales_tax));
    line("Cash due at purchase", format_currency(result.upfront_cash));
    line("Monthly payment", format_currency(result.monthly_payment));
    line("Total interest", format_currency(result.total_interest));
    line("Total of payments", format_currency(result.total_of_payments));
    line("Total cost", format_currency(result.total_cost));
    line("Payoff", format_duration(result.schedule.periods()));
    if with_schedule {
        print_yearly_schedule(&result.schedule);
    }
}

fn render_student_loan(result: &StudentLoanResult, with_schedule: bool) {
    match result {
        StudentLoanResult::Payment(payment) => {
            println!("Student loan payment");
            line("Monthly payment", format_currency(payment.monthly_payment));
            line("Total paid", format_currency(payment.total_paid));
            line("Total interest", format_currency(payment.total_interest));
            if let Some(date) = payment.schedule.payoff_date() {
                line("Payoff date", date.format("%B %Y").to_string());
            }
            if with_schedule {
                print_yearly_schedule(&payment.schedule);
            }
        }
        StudentLoanResult::Payoff(payoff) => {
            println!("Student loan payoff");
            line("Required payment", format_currency(payoff.monthly_payment));
            line("Original payoff", format_duration(payoff.original.periods));
            line("With extra payments", format_duration(payoff.accelerated.periods));
            line("Time saved", format_duration(payoff.months_saved));
            line("Interest saved", format_currency(payoff.interest_saved));
            line("Total paid saved", format_currency(payoff.total_paid_saved));
        }
        StudentLoanResult::Solve(solved) => {
            println!("Student loan solver");
            let (label, value) = match solved.solved_for {
                LoanVariable::Principal => ("Loan amount", format_currency(solved.principal)),
                LoanVariable::Term => ("Term", format_duration(solved.term_months)),
                LoanVariable::Rate => ("Interest rate", format_percent(solved.annual_rate_percent, 3)),
                LoanVariable::Payment => ("Monthly payment", format_currency(solved.payment)),
            };
            line(label, value);
            line("Total paid", format_currency(solved.total_paid()));
            line("Total interest", format_currency(solved.total_interest()));
        }
        StudentLoanResult::Deferment(projection) => {
            println!("Deferred student loan");
            line("Total borrowed", format_currency(projection.total_borrowed));
            line("Balance after school", format_currency(projection.balance_after_school));
            line("Balance after grace", format_currency(projection.balance_after_grace));
            line("Capitalized interest", format_currency(projection.capitalized_interest));
            line("Monthly payment", format_currency(projection.monthly_payment));
            line("Total repaid", format_currency(projection.total_repaid));
            line("Total interest", format_currency(projection.total_interest));
        }
    }
}

fn render_simple_interest(result: &SimpleInterestResult) {
    println!("Simple interest");
    line("Interest earned", format_currency(result.interest));
    line("Ending balance", format_currency(result.ending_balance));
    println!();
    println!("  {:>4} {:>14} {:>16}", "Year", "Interest", "Balance");
    for year in &result.years {
        println!(
            "  {:>4} {:>14} {:>16}",
            year.year,
            format_currency(year.interest),
            format_currency(year.balance)
        );
    }
}

fn render_investment(result: &InvestmentResult) {
    println!("Investment growth");
    line("Ending balance", format_currency(result.ending_balance));
    line("Total contributions", format_currency(result.total_contributions));
    line("Total interest", format_currency(result.total_interest));
    if let Some(real) = result.inflation_adjusted_balance {
        line("In today's dollars", format_currency(real));
    }
    println!();
    println!("  {:>4} {:>14} {:>14} {:>16}", "Year", "Contributed", "Interest", "Balance");
    for year in &result.years {
        println!(
            "  {:>4} {:>14} {:>14} {:>16}",
            year.year,
            format_currency(year.contributions),
            format_currency(year.interest),
            format_currency(year.balance)
        );
    }
}

fn render_ira(result: &IraResult) {
    println!("Traditional vs Roth IRA");
    for account in [&result.traditional, &result.roth] {
        println!();
        println!("  {:?}", account.kind);
        line("Balance at retirement", format_currency_whole(account.balance));
        line("Total contributions", format_currency_whole(account.total_contributions));
        line("Tax at withdrawal", format_currency_whole(account.tax_at_withdrawal));
        line("After-tax value", format_currency_whole(account.after_tax_value));
    }
    println!();
    let better = match result.better {
        IraKind::Traditional => "Traditional",
        IraKind::Roth => "Roth",
    };
    line("Better option", better);
    line("Advantage", format_currency_whole(result.advantage));
}

fn render_tax(result: &TaxResult) {
    println!("Federal income tax estimate");
    line("Gross income", format_currency(result.gross_income));
    line("Adjusted gross income", format_currency(result.adjusted_gross_income));
    let deduction = match result.deduction_kind {
        DeductionKind::Standard => "Standard deduction",
        DeductionKind::Itemized => "Itemized deductions",
    };
    line(deduction, format_currency(result.deduction));
    line("Taxable income", format_currency(result.taxable_income));
    for slice in &result.brackets.breakdown {
        line(
            &format!("  at {}", format_percent(slice.rate * 100.0, 0)),
            format!("{} on {}", format_currency(slice.tax), format_currency(slice.taxable_amount)),
        );
    }
    line("Tax before credits", format_currency(result.tax_before_credits));
    line("Child tax credit", format_currency(result.credits.nonrefundable_applied));
    line("Additional child credit", format_currency(result.credits.additional_child_credit));
    line("Earned income credit", format_currency(result.credits.earned_income_credit));
    line("Net tax", format_currency(result.net_tax));
    line("Withheld", format_currency(result.tax_withheld));
    if result.balance_due >= 0.0 {
        line("Balance due", format_currency(result.balance_due));
    } else {
        line("Refund", format_currency(-result.balance_due));
    }
    line("Effective rate", format_percent(result.effective_rate * 100.0, 2));
    line("Marginal rate", format_percent(result.marginal_rate * 100.0, 0));
}

fn render_pension(result: &PensionResult) {
    match result {
        PensionResult::LumpSum(cmp) => {
            println!("Lump sum vs pension");
            line("Lump sum", format_currency_whole(cmp.lump_sum.present_value));
            line("Lump sum invested", format_currency_whole(cmp.lump_sum.future_value));
            if let Some(age) = cmp.lump_sum.depleted_at_age {
                line("Drawdown runs out at", age.to_string());
            }
            line("Pension present value", format_currency_whole(cmp.pension.present_value));
            line("Pension total received", format_currency_whole(cmp.pension.total_received));
            print_comparison(&cmp.comparison);
        }
        PensionResult::Survivor(cmp) => {
            println!("Single life vs joint and survivor");
            line("Single-life present value", format_currency_whole(cmp.single_life.present_value));
            line("Single-life total", format_currency_whole(cmp.single_life.total_received));
            line("Joint present value", format_currency_whole(cmp.joint.present_value));
            line("Joint total", format_currency_whole(cmp.joint.total_received));
            print_comparison(&cmp.comparison);
        }
        PensionResult::RetirementAge(cmp) => {
            println!("Retire early vs later");
            for claim in [&cmp.early, &cmp.later] {
                line(
                    &format!("Retire at {}", claim.start_age),
                    format!(
                        "{} present value, {} over {} years",
                        format_currency_whole(claim.present_value),
                        format_currency_whole(claim.total_received),
                        claim.years_paid
                    ),
                );
            }
            print_comparison(&cmp.comparison);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;

    match &cli.command {
        Command::BoatLoan(args) => {
            let inputs = BoatLoanInputs::from(args);
            run(json, inputs.validate(), || inputs.compute(), |r| {
                render_boat_loan(r, args.schedule)
            })
        }
        Command::StudentLoan { mode } => {
            let inputs = StudentLoanInputs::from(mode);
            let with_schedule = matches!(mode, StudentLoanCommand::Payment { schedule: true, .. });
            run(json, inputs.validate(), || inputs.compute(), |r| {
                render_student_loan(r, with_schedule)
            })
        }
        Command::SimpleInterest(args) => {
            let inputs = SimpleInterestInputs {
                principal: args.principal,
                annual_rate_percent: args.rate,
                years: args.years,
            };
            run(json, inputs.validate(), || inputs.compute(), render_simple_interest)
        }
        Command::Investment(args) => {
            let inputs = InvestmentInputs::from(args);
            run(json, inputs.validate(), || inputs.compute(), render_investment)
        }
        Command::Ira(args) => {
            let inputs = IraInputs {
                current_balance: args.balance,
                annual_contribution: args.contribution,
                annual_return_percent: args.rate,
                years: args.years,
                current_tax_rate_percent: args.current_tax,
                retirement_tax_rate_percent: args.retirement_tax,
            };
            run(json, inputs.validate(), || inputs.compute(), render_ira)
        }
        Command::Tax(args) => {
            let status = FilingStatus::from(args.status);
            let tables = match &args.brackets {
                Some(path) => {
                    FEDERAL_2025.with_brackets(status, load_bracket_set(path)?)
                }
                None => FEDERAL_2025.clone(),
            };
            let inputs = TaxInputs {
                filing_status: status,
                earned_income: args.income,
                investment_income: args.investment_income,
                pre_tax_contributions: args.pre_tax,
                itemized_deductions: args.itemized,
                qualifying_children: args.children,
                tax_withheld: args.withheld,
            };
            run(json, inputs.validate(), || inputs.compute_with(&tables), render_tax)
        }
        Command::Pension { decision } => {
            let inputs = PensionInputs::from(decision);
            run(json, inputs.validate(), || inputs.compute(), render_pension)
        }
    }
}
