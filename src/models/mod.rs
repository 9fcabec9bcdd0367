pub mod employee;
pub mod listing;
