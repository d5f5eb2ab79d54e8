use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, trace};

use super::loan::{LoanTerms, MAX_TERM_YEARS};
use super::payment::monthly_payment;
use super::summary::{summarize_schedule, ScheduleSummary};
use crate::error::AmortizeError;
use crate::types::*;
use crate::AmortizeResult;

/// Balances below one cent are treated as fully repaid.
const PAYOFF_THRESHOLD: Money = dec!(0.01);

/// An extra principal payment applied in a specific period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalPayment {
    /// 1-based period the extra amount is paid in
    pub payment_number: u32,
    pub amount: Money,
}

/// One period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    pub date: NaiveDate,
    pub payment_number: u32,
    /// Principal plus interest paid this period, including any extra
    pub total_payment: Money,
    /// Principal repaid this period, including any extra
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub remaining_balance: Money,
    /// Extra principal actually applied this period
    #[serde(default)]
    pub additional_payment: Option<Money>,
}

/// Input for the schedule envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    pub annual_interest_rate_percent: Percent,
    pub term_years: u32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub additional_payments: Vec<AdditionalPayment>,
}

impl ScheduleInput {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.principal,
            self.annual_interest_rate_percent,
            self.term_years,
        )
    }
}

/// Output of the schedule envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub monthly_payment: Money,
    pub schedule: Vec<PaymentScheduleEntry>,
    pub summary: ScheduleSummary,
}

/// Index additional payments by period, rejecting negative amounts,
/// periods outside `1..=number_of_payments`, and duplicate periods.
pub fn index_additional_payments(
    additional_payments: &[AdditionalPayment],
    number_of_payments: u32,
) -> AmortizeResult<BTreeMap<u32, Money>> {
    let mut by_period = BTreeMap::new();
    for extra in additional_payments {
        if extra.amount < Decimal::ZERO {
            return Err(AmortizeError::InvalidInput {
                field: "additional_payments.amount".into(),
                reason: format!(
                    "Additional payment for period {} must not be negative",
                    extra.payment_number
                ),
            });
        }
        if extra.payment_number == 0 || extra.payment_number > number_of_payments {
            return Err(AmortizeError::AdditionalPaymentOutOfRange {
                payment_number: extra.payment_number,
                max: number_of_payments,
            });
        }
        if by_period.insert(extra.payment_number, extra.amount).is_some() {
            return Err(AmortizeError::DuplicateAdditionalPayment {
                payment_number: extra.payment_number,
            });
        }
    }
    Ok(by_period)
}

/// Calendar date of the given 1-based period, counted from `start_date`.
///
/// Each date is derived from the start date rather than the previous period, so
/// a loan starting on the 31st keeps landing on month-end dates.
pub fn payment_date(start_date: NaiveDate, payment_number: u32) -> AmortizeResult<NaiveDate> {
    start_date
        .checked_add_months(Months::new(payment_number.saturating_sub(1)))
        .ok_or_else(|| {
            AmortizeError::DateError(format!(
                "Period {payment_number} from {start_date} is outside the supported calendar range"
            ))
        })
}

/// Generate the period-by-period amortization schedule for `terms`.
///
/// Interest accrues on the opening balance and is rounded to cents each period,
/// so balances stay exact to the cent. The final scheduled period repays
/// whatever balance remains. The schedule stops early once extra payments have
/// retired the loan.
pub fn generate_schedule(
    terms: &LoanTerms,
    start_date: NaiveDate,
    additional_payments: &[AdditionalPayment],
) -> AmortizeResult<Vec<PaymentScheduleEntry>> {
    let payment = monthly_payment(terms)?;
    schedule_at_payment(terms, payment, start_date, additional_payments)
}

/// Schedule loop for a payment already computed (and terms already validated)
/// by [`monthly_payment`].
fn schedule_at_payment(
    terms: &LoanTerms,
    payment: Money,
    start_date: NaiveDate,
    additional_payments: &[AdditionalPayment],
) -> AmortizeResult<Vec<PaymentScheduleEntry>> {
    let number_of_payments = terms.number_of_payments();
    let extras = index_additional_payments(additional_payments, number_of_payments)?;
    let rate = terms.monthly_rate();

    debug!(
        principal = %terms.principal,
        annual_rate_percent = %terms.annual_interest_rate_percent,
        number_of_payments,
        monthly_payment = %payment,
        additional_payments = extras.len(),
        "generating amortization schedule"
    );

    let mut schedule =
        Vec::with_capacity(number_of_payments.min(MAX_TERM_YEARS * MONTHS_PER_YEAR) as usize);
    let mut balance = terms.principal;
    let mut payment_number = 1u32;

    while payment_number <= number_of_payments && balance > Decimal::ZERO {
        let interest = round_money(checked_mul(balance, rate, "period interest")?);
        let extra = extras.get(&payment_number).copied().unwrap_or(Decimal::ZERO);
        let scheduled_principal = payment - interest;

        let mut principal_portion = checked_add(scheduled_principal, extra, "principal with extra")?;
        if principal_portion > balance || payment_number == number_of_payments {
            principal_portion = balance;
        }
        balance -= principal_portion;

        if balance < PAYOFF_THRESHOLD {
            principal_portion += balance;
            balance = Decimal::ZERO;
        }

        let applied_extra = (principal_portion - scheduled_principal)
            .max(Decimal::ZERO)
            .min(extra);

        trace!(
            payment_number,
            interest = %interest,
            principal = %principal_portion,
            balance = %balance,
            "amortization period"
        );

        schedule.push(PaymentScheduleEntry {
            date: payment_date(start_date, payment_number)?,
            payment_number,
            total_payment: round_money(principal_portion + interest),
            principal_payment: round_money(principal_portion),
            interest_payment: interest,
            remaining_balance: round_money(balance),
            additional_payment: if applied_extra > Decimal::ZERO {
                Some(round_money(applied_extra))
            } else {
                None
            },
        });

        payment_number += 1;
    }

    if (schedule.len() as u32) < number_of_payments {
        info!(
            paid_off_after = schedule.len(),
            scheduled = number_of_payments,
            "loan paid off ahead of schedule"
        );
    }

    Ok(schedule)
}

/// Full amortization schedule with payment and summary, wrapped in the
/// standard computation envelope.
pub fn build_amortization_schedule(
    input: &ScheduleInput,
) -> AmortizeResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = input.terms();
    let payment = monthly_payment(&terms)?;
    let schedule = schedule_at_payment(
        &terms,
        payment,
        input.start_date,
        &input.additional_payments,
    )?;
    let number_of_payments = terms.number_of_payments();

    // Rounding the payment down leaves a residue that compounds into the last period
    if let Some(last) = schedule.last().filter(|e| e.payment_number == number_of_payments) {
        let scheduled_final = last.total_payment - last.additional_payment.unwrap_or(Decimal::ZERO);
        let excess = scheduled_final - payment;
        if excess > ONE_CENT * Decimal::from(number_of_payments) {
            warnings.push(format!(
                "Final payment of {scheduled_final} exceeds the monthly payment by {excess} from cent rounding of the payment"
            ));
        }
    }

    let paid_through = schedule.len() as u32;
    for extra in &input.additional_payments {
        if extra.amount.is_zero() {
            continue;
        }
        if extra.payment_number > paid_through {
            warnings.push(format!(
                "Additional payment of {} in period {} is unused: loan is repaid after period {}",
                extra.amount, extra.payment_number, paid_through
            ));
            continue;
        }
        let applied = schedule[(extra.payment_number - 1) as usize]
            .additional_payment
            .unwrap_or(Decimal::ZERO);
        if applied < extra.amount {
            warnings.push(format!(
                "Additional payment in period {} capped at {} (requested {}) to retire the remaining balance",
                extra.payment_number, applied, extra.amount
            ));
        }
    }

    let summary = summarize_schedule(&terms, payment, &schedule)?;
    if !input.additional_payments.is_empty() {
        warnings.push(
            "Scheduled total cost assumes the full term at the flat payment; see total_paid for the actual amount"
                .into(),
        );
    }

    let output = ScheduleOutput {
        monthly_payment: payment,
        schedule,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization schedule (monthly, interest rounded to cents)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_interest_rate_percent": input.annual_interest_rate_percent.to_string(),
            "term_years": input.term_years,
            "start_date": input.start_date.to_string(),
            "additional_payments": input.additional_payments.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
