//! Loan amount input handling
//!
//! The amount box only ever holds digits, and an edit that would push the
//! amount past the cap is refused outright rather than clamped later.

use log::debug;

use crate::format::{format_grouped, Locale};
use crate::loan::{LoanQuoteRequest, LoanTerms, DEFAULT_PRINCIPAL_INPUT, MAX_PRINCIPAL};

/// Keep only the ASCII digits of `raw`
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Result of applying an edit to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// Over the cap; the previous value is kept
    Rejected,
}

/// Digits-only principal input bounded by a maximum amount
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalInput {
    digits: String,
    max_principal: f64,
}

impl PrincipalInput {
    /// Empty input with the given cap
    pub fn new(max_principal: f64) -> Self {
        Self {
            digits: String::new(),
            max_principal,
        }
    }

    /// Input pre-filled with `initial`, which goes through the same edit rules
    pub fn with_initial(initial: &str, max_principal: f64) -> Self {
        let mut input = Self::new(max_principal);
        input.apply_edit(initial);
        input
    }

    /// Input configured from loan terms, holding the default amount
    pub fn for_terms(terms: &LoanTerms) -> Self {
        Self::with_initial(DEFAULT_PRINCIPAL_INPUT, terms.max_principal)
    }

    /// Replace the input's contents with `raw`
    ///
    /// `raw` is reduced to its digits first. Empty input is always accepted.
    /// Anything above the cap, including amounts too large to parse, is
    /// rejected and leaves the current value untouched.
    pub fn apply_edit(&mut self, raw: &str) -> EditOutcome {
        let digits = sanitize_digits(raw);
        if digits.is_empty() {
            self.digits.clear();
            return EditOutcome::Accepted;
        }

        match digits.parse::<u64>() {
            Ok(amount) if amount as f64 <= self.max_principal => {
                // Leading zeros are dropped the way the displayed value would show them
                self.digits = amount.to_string();
                EditOutcome::Accepted
            }
            _ => {
                debug!("Rejected principal edit '{}' (cap {})", raw, self.max_principal);
                EditOutcome::Rejected
            }
        }
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Current amount, 0 when empty
    pub fn value(&self) -> f64 {
        self.digits.parse::<f64>().unwrap_or(0.0)
    }

    pub fn max_principal(&self) -> f64 {
        self.max_principal
    }

    /// Grouped text shown in the input box ("250,000"); empty stays empty
    pub fn display(&self, locale: Locale) -> String {
        match self.digits.parse::<u64>() {
            Ok(amount) => format_grouped(amount, locale),
            Err(_) => String::new(),
        }
    }

    pub fn to_request(&self, terms: &LoanTerms) -> LoanQuoteRequest {
        LoanQuoteRequest::new(self.value(), terms.annual_rate(), terms.term_years)
    }
}

impl Default for PrincipalInput {
    fn default() -> Self {
        Self::with_initial(DEFAULT_PRINCIPAL_INPUT, MAX_PRINCIPAL)
    }
}
