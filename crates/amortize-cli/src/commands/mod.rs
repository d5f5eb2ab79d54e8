pub mod amortization;
pub mod metrics;
