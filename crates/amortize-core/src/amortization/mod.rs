pub mod loan;
pub mod payment;
pub mod schedule;
pub mod summary;
