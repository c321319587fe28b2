//! Core domain types and logic.

pub mod classification;
pub mod config_validation;
pub mod error;
pub mod fundamentals;
pub mod history;
pub mod indicator;
pub mod instrument;
pub mod period;
pub mod portfolio;
pub mod quote_record;
