use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AmortizeError;
use crate::types::*;
use crate::AmortizeResult;

/// Input for break-even horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub down_payment: Money,
    pub annual_cash_flow: Money,
}

/// Time for annual cash flow to recover a down payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BreakEven {
    /// Recovered after this many years (2 dp)
    Years { years: Years },
    /// Cash flow is zero or negative, so the down payment is never recovered
    NegativeCashFlow,
}

impl BreakEven {
    pub fn years(&self) -> Option<Years> {
        match self {
            BreakEven::Years { years } => Some(*years),
            BreakEven::NegativeCashFlow => None,
        }
    }
}

pub fn calculate_break_even_point(
    down_payment: Money,
    annual_cash_flow: Money,
) -> AmortizeResult<BreakEven> {
    if annual_cash_flow <= Decimal::ZERO {
        return Ok(BreakEven::NegativeCashFlow);
    }
    let years = checked_div(down_payment, annual_cash_flow, "break-even years")?;
    Ok(BreakEven::Years {
        years: round_money(years),
    })
}

/// Break-even horizon wrapped in the standard computation envelope.
pub fn calculate_break_even(input: &BreakEvenInput) -> AmortizeResult<ComputationOutput<BreakEven>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.down_payment < Decimal::ZERO {
        return Err(AmortizeError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }

    let result = calculate_break_even_point(input.down_payment, input.annual_cash_flow)?;
    if result == BreakEven::NegativeCashFlow {
        warnings.push(format!(
            "Annual cash flow of {} never recovers the down payment",
            input.annual_cash_flow
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Down payment / annual cash flow",
        input,
        warnings,
        elapsed,
        result,
    ))
}
