//! Loan quote calculation: terms, the level-payment formula and its schedule

mod quote;
mod schedule;
mod terms;

pub use quote::{compute_quote, payment_factor, term_months, LoanQuoteRequest, LoanQuoteResult};
pub use schedule::{AmortizationSchedule, ScheduleRow, YearSummary};
pub use terms::{
    LoanTerms, DEFAULT_PRIME_RATE, DEFAULT_PRINCIPAL_INPUT, DEFAULT_SPREAD, DEFAULT_TERM_YEARS,
    MAX_PRINCIPAL, MAX_TERM_YEARS,
};
