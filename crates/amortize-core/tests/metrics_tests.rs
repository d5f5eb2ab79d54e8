use amortize_core::metrics::break_even::{
    calculate_break_even, calculate_break_even_point, BreakEven, BreakEvenInput,
};
use amortize_core::metrics::cost::{
    calculate_loan_cost, calculate_total_interest_paid, calculate_total_loan_cost, LoanCostInput,
};
use amortize_core::metrics::property::{
    calculate_equity, calculate_loan_to_value_ratio, calculate_property_position,
    PropertyPositionInput,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Loan cost tests
// ===========================================================================

#[test]
fn test_flat_cost_of_thirty_year_loan() {
    let cost = calculate_total_loan_cost(dec!(1264.81), 30).unwrap();
    assert_eq!(cost, dec!(455331.60));
    assert_eq!(calculate_total_interest_paid(cost, dec!(300000)).unwrap(), dec!(155331.60));
}

#[test]
fn test_loan_cost_envelope_json() {
    let json = r#"{ "principal": "300000", "monthly_payment": "1264.81", "term_years": 30 }"#;
    let input: LoanCostInput = serde_json::from_str(json).unwrap();
    let out = calculate_loan_cost(&input).unwrap();
    assert_eq!(out.result.total_loan_cost, dec!(455331.60));
    assert_eq!(out.result.total_interest_paid, dec!(155331.60));
    assert_eq!(out.methodology, "Flat monthly payment over full term");
}

// ===========================================================================
// Property position tests
// ===========================================================================

#[test]
fn test_ltv_known_answer() {
    assert_eq!(calculate_loan_to_value_ratio(dec!(300000), dec!(400000)).unwrap(), dec!(75.0));
}

#[test]
fn test_ltv_guard_zero_value() {
    assert_eq!(calculate_loan_to_value_ratio(dec!(123456), Decimal::ZERO).unwrap(), Decimal::ZERO);
}

#[test]
fn test_underwater_equity() {
    assert_eq!(calculate_equity(dec!(400000), dec!(450000)).unwrap(), dec!(-50000));
}

#[test]
fn test_property_position_zero_value_warns() {
    let input = PropertyPositionInput {
        property_value: Decimal::ZERO,
        loan_balance: dec!(1000),
    };
    let out = calculate_property_position(&input).unwrap();
    assert_eq!(out.result.loan_to_value_percent, Decimal::ZERO);
    assert_eq!(out.result.equity, dec!(-1000));
    assert_eq!(out.warnings.len(), 2);
}

// ===========================================================================
// Break-even tests
// ===========================================================================

#[test]
fn test_break_even_known_answer() {
    assert_eq!(
        calculate_break_even_point(dec!(50000), dec!(10000)).unwrap(),
        BreakEven::Years { years: dec!(5.0) }
    );
}

#[test]
fn test_break_even_negative_cash_flow() {
    assert_eq!(
        calculate_break_even_point(dec!(50000), Decimal::ZERO).unwrap(),
        BreakEven::NegativeCashFlow
    );
}

#[test]
fn test_break_even_envelope_json() {
    let input = BreakEvenInput {
        down_payment: dec!(80000),
        annual_cash_flow: dec!(12000),
    };
    let out = calculate_break_even(&input).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["result"]["type"], "years");
    assert_eq!(value["result"]["years"], "6.67");
    assert!(out.warnings.is_empty());
}

#[test]
fn test_metrics_report_overflow_instead_of_panicking() {
    assert!(calculate_loan_to_value_ratio(dec!(1e10), dec!(1e-22)).is_err());
    assert!(calculate_break_even_point(dec!(1e20), dec!(1e-10)).is_err());
    assert!(calculate_total_loan_cost(dec!(1e27), 30).is_err());
}

#[test]
fn test_break_even_rejects_negative_down_payment() {
    let input = BreakEvenInput {
        down_payment: dec!(-1),
        annual_cash_flow: dec!(1000),
    };
    assert!(calculate_break_even(&input).is_err());
}
