use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amortize_core::amortization::loan::LoanTerms;
use amortize_core::amortization::payment;
use amortize_core::amortization::schedule::{self, AdditionalPayment, ScheduleInput};

use crate::input;

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (3.5 = 3.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanTerms::new(
            args.principal
                .ok_or("--principal is required (or provide --input)")?,
            args.rate.ok_or("--rate is required (or provide --input)")?,
            args.years.ok_or("--years is required (or provide --input)")?,
        )
    };

    let result = payment::calculate_payment(&terms)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (3.5 = 3.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Date of the first payment (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Extra principal payment as PERIOD:AMOUNT, e.g. "12:5000" (repeatable)
    #[arg(long = "extra", value_parser = parse_additional_payment)]
    pub extras: Vec<AdditionalPayment>,

    /// Omit the period-by-period rows and print only payment and summary
    #[arg(long)]
    pub summary_only: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate_percent: args
                .rate
                .ok_or("--rate is required (or provide --input)")?,
            term_years: args.years.ok_or("--years is required (or provide --input)")?,
            start_date: args
                .start_date
                .unwrap_or_else(|| Local::now().date_naive()),
            additional_payments: args.extras,
        }
    };

    let result = schedule::build_amortization_schedule(&schedule_input)?;
    let mut value = serde_json::to_value(result)?;
    if args.summary_only {
        if let Some(Value::Object(result)) = value.get_mut("result") {
            result.remove("schedule");
        }
    }
    Ok(value)
}

/// Parse `PERIOD:AMOUNT` into an additional payment.
fn parse_additional_payment(raw: &str) -> Result<AdditionalPayment, String> {
    let (period, amount) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected PERIOD:AMOUNT, got '{raw}'"))?;
    let payment_number = period
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid period '{period}': {e}"))?;
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok(AdditionalPayment {
        payment_number,
        amount,
    })
}
