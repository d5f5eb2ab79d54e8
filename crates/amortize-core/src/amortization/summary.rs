use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::loan::LoanTerms;
use super::schedule::PaymentScheduleEntry;
use crate::metrics::cost::{calculate_total_interest_paid, calculate_total_loan_cost};
use crate::types::*;
use crate::AmortizeResult;

/// Totals derived from a generated schedule, alongside the flat-payment
/// figures for the full term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub number_of_payments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    /// Sum of every payment actually made
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_additional: Money,
    /// Monthly payment times the full term, ignoring early payoff
    pub scheduled_total_cost: Money,
    pub scheduled_total_interest: Money,
    /// Scheduled periods that were never needed
    pub payments_saved: u32,
    /// Flat-term interest minus interest actually paid
    pub interest_saved: Money,
}

/// Summarise a schedule produced for `terms` at `monthly_payment`.
pub fn summarize_schedule(
    terms: &LoanTerms,
    monthly_payment: Money,
    schedule: &[PaymentScheduleEntry],
) -> AmortizeResult<ScheduleSummary> {
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut total_additional = Decimal::ZERO;

    for entry in schedule {
        total_paid = checked_add(total_paid, entry.total_payment, "total paid")?;
        total_interest = checked_add(total_interest, entry.interest_payment, "total interest")?;
        total_principal = checked_add(total_principal, entry.principal_payment, "total principal")?;
        total_additional = checked_add(
            total_additional,
            entry.additional_payment.unwrap_or(Decimal::ZERO),
            "total additional",
        )?;
    }

    let scheduled_total_cost = calculate_total_loan_cost(monthly_payment, terms.term_years)?;
    let scheduled_total_interest =
        calculate_total_interest_paid(scheduled_total_cost, terms.principal)?;

    let number_of_payments = schedule.len() as u32;
    Ok(ScheduleSummary {
        number_of_payments,
        payoff_date: schedule.last().map(|e| e.date),
        total_paid: round_money(total_paid),
        total_interest: round_money(total_interest),
        total_principal: round_money(total_principal),
        total_additional: round_money(total_additional),
        scheduled_total_cost,
        scheduled_total_interest,
        payments_saved: terms.number_of_payments().saturating_sub(number_of_payments),
        interest_saved: round_money(checked_sub(
            scheduled_total_interest,
            total_interest,
            "interest saved",
        )?),
    })
}
