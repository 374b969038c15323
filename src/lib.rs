//! SBA Calculator - loan payment estimates for SBA 7(a) borrowers
//!
//! This library provides:
//! - Level-payment amortization quotes (monthly payment, total and average interest)
//! - Month-by-month and yearly amortization schedules
//! - Digits-only, capped principal input handling
//! - English/Spanish labels and currency formatting
//! - CSV batch quoting and a JSON quote endpoint

pub mod api;
pub mod batch;
pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod input;
pub mod labels;
pub mod loan;

// Re-export commonly used types
pub use config::CalculatorConfig;
pub use display::QuoteView;
pub use error::{ApiError, BatchError, ConfigError};
pub use format::{format_currency, Locale};
pub use input::{sanitize_digits, EditOutcome, PrincipalInput};
pub use loan::{compute_quote, AmortizationSchedule, LoanQuoteRequest, LoanQuoteResult, LoanTerms};
