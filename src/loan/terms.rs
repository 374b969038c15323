//! Loan terms for the SBA 7(a) estimate
//!
//! The published estimate uses a fixed APR of prime plus a fixed spread over a
//! ten-year term. Both are kept as data so they can be overridden from config.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quote::{quote_with_cap, term_months, LoanQuoteRequest, LoanQuoteResult};
use super::schedule::AmortizationSchedule;
use crate::error::ConfigError;

/// Prime rate used by the reference deployment (6.75%)
pub const DEFAULT_PRIME_RATE: f64 = 0.0675;

/// Fixed spread over prime (2.5%)
pub const DEFAULT_SPREAD: f64 = 0.025;

/// Loan term in years
pub const DEFAULT_TERM_YEARS: u32 = 10;

/// Longest term, in years, that config, CLI or API overrides may set
pub const MAX_TERM_YEARS: u32 = 50;

/// Largest principal the estimator accepts
pub const MAX_PRINCIPAL: f64 = 5_000_000.0;

/// Initial value of the loan amount input
pub const DEFAULT_PRINCIPAL_INPUT: &str = "250000";

fn default_prime_rate() -> f64 { DEFAULT_PRIME_RATE }
fn default_spread() -> f64 { DEFAULT_SPREAD }
fn default_term_years() -> u32 { DEFAULT_TERM_YEARS }
fn default_max_principal() -> f64 { MAX_PRINCIPAL }

/// Rate and term parameters shared by every quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Prime rate as a decimal
    #[serde(default = "default_prime_rate")]
    pub prime_rate: f64,

    /// Spread over prime as a decimal
    #[serde(default = "default_spread")]
    pub spread: f64,

    #[serde(default = "default_term_years")]
    pub term_years: u32,

    /// Quotes above this principal are not produced
    #[serde(default = "default_max_principal")]
    pub max_principal: f64,

    /// Date the prime rate was last published, shown next to the rate
    #[serde(default)]
    pub rate_as_of: Option<NaiveDate>,
}

impl LoanTerms {
    /// Reference SBA 7(a) terms: prime 6.75% + 2.5%, ten years, $5M cap
    pub fn sba_7a_default() -> Self {
        Self {
            prime_rate: DEFAULT_PRIME_RATE,
            spread: DEFAULT_SPREAD,
            term_years: DEFAULT_TERM_YEARS,
            max_principal: MAX_PRINCIPAL,
            rate_as_of: None,
        }
    }

    /// Terms with the APR pinned directly instead of prime + spread
    pub fn with_annual_rate(self, annual_rate: f64) -> Self {
        Self {
            prime_rate: 0.0,
            spread: annual_rate,
            ..self
        }
    }

    pub fn with_term_years(self, term_years: u32) -> Self {
        Self { term_years, ..self }
    }

    /// Annual percentage rate (prime + spread)
    pub fn annual_rate(&self) -> f64 {
        self.prime_rate + self.spread
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate() / 12.0
    }

    pub fn term_months(&self) -> u32 {
        term_months(self.term_years)
    }

    /// Quote a principal under these terms
    ///
    /// Principals above `max_principal` produce the zero quote.
    pub fn quote(&self, principal: f64) -> LoanQuoteResult {
        quote_with_cap(principal, self.annual_rate(), self.term_years, self.max_principal)
    }

    /// Month-by-month schedule for a principal under these terms
    pub fn schedule(&self, principal: f64) -> AmortizationSchedule {
        let request = LoanQuoteRequest::new(principal, self.annual_rate(), self.term_years);
        AmortizationSchedule::from_quote(&request, &self.quote(principal))
    }

    /// Check the terms describe a loan the calculator can amortize
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.prime_rate.is_finite() || self.prime_rate < 0.0 {
            return Err(ConfigError::invalid("prime_rate", "must be a non-negative number"));
        }
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(ConfigError::invalid("spread", "must be a non-negative number"));
        }
        if self.term_years == 0 {
            return Err(ConfigError::invalid("term_years", "must be at least 1"));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(ConfigError::invalid("term_years", "must be at most 50"));
        }
        if !self.max_principal.is_finite() || self.max_principal <= 0.0 {
            return Err(ConfigError::invalid("max_principal", "must be positive"));
        }
        Ok(())
    }
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self::sba_7a_default()
    }
}
