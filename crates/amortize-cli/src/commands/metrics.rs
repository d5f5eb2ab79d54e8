use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amortize_core::amortization::payment::calculate_monthly_payment;
use amortize_core::metrics::break_even::{self, BreakEvenInput};
use amortize_core::metrics::cost::{self, LoanCostInput};
use amortize_core::metrics::property::{self, PropertyPositionInput};

use crate::input;

/// Arguments for flat-payment total cost and interest
#[derive(Args)]
pub struct LoanCostArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Fixed monthly payment; derived from --rate when omitted
    #[arg(long)]
    pub monthly_payment: Option<Decimal>,

    /// Annual interest rate as a percentage, used when --monthly-payment is omitted
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_loan_cost(args: LoanCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cost_input: LoanCostInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let term_years = args.years.ok_or("--years is required (or provide --input)")?;
        let monthly_payment = match (args.monthly_payment, args.rate) {
            (Some(payment), _) => payment,
            (None, Some(rate)) => calculate_monthly_payment(principal, rate, term_years)?,
            (None, None) => return Err("--monthly-payment or --rate is required".into()),
        };
        LoanCostInput {
            principal,
            monthly_payment,
            term_years,
        }
    };

    let result = cost::calculate_loan_cost(&cost_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for loan-to-value and equity
#[derive(Args)]
pub struct PropertyArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Outstanding loan balance
    #[arg(long)]
    pub loan_balance: Option<Decimal>,
}

pub fn run_property(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let position_input: PropertyPositionInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PropertyPositionInput {
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            loan_balance: args
                .loan_balance
                .ok_or("--loan-balance is required (or provide --input)")?,
        }
    };

    let result = property::calculate_property_position(&position_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the break-even horizon
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Down payment invested up front
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Net annual cash flow from the property (may be negative)
    #[arg(long, allow_hyphen_values = true)]
    pub annual_cash_flow: Option<Decimal>,
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let be_input: BreakEvenInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BreakEvenInput {
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_cash_flow: args
                .annual_cash_flow
                .ok_or("--annual-cash-flow is required (or provide --input)")?,
        }
    };

    let result = break_even::calculate_break_even(&be_input)?;
    Ok(serde_json::to_value(result)?)
}
