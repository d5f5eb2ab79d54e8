pub mod break_even;
pub mod cost;
pub mod property;
