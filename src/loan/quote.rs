//! Level-payment amortization quote
//!
//! M = P * [r(1+r)^n] / [(1+r)^n - 1], with r the monthly rate and n the
//! number of monthly payments. Nothing is rounded here; rounding to cents is a
//! presentation concern handled by `format`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::terms::{LoanTerms, MAX_PRINCIPAL};
use crate::input::sanitize_digits;

/// Inputs for a single quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteRequest {
    pub principal: f64,
    /// Annual rate as a decimal (0.0925 for 9.25%)
    pub annual_rate: f64,
    pub term_years: u32,
}

impl LoanQuoteRequest {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
        }
    }

    /// Build a request from raw user text
    ///
    /// Non-digit characters are stripped first, so "$250,000" reads as 250000
    /// and "12a3b" as 123. Text with no digits at all becomes principal 0.
    pub fn from_input(raw: &str, terms: &LoanTerms) -> Self {
        let digits = sanitize_digits(raw);
        let principal = digits.parse::<f64>().unwrap_or(0.0);
        Self::new(principal, terms.annual_rate(), terms.term_years)
    }

    pub fn term_months(&self) -> u32 {
        term_months(self.term_years)
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    pub fn quote(&self) -> LoanQuoteResult {
        compute_quote(self.principal, self.annual_rate, self.term_years)
    }
}

/// Derived payment figures for a request
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanQuoteResult {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub average_annual_interest: f64,
}

impl LoanQuoteResult {
    /// The "no quote" result shown for empty or out-of-range input
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_finite(&self) -> bool {
        self.monthly_payment.is_finite()
            && self.total_paid.is_finite()
            && self.total_interest.is_finite()
            && self.average_annual_interest.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.monthly_payment == 0.0
            && self.total_paid == 0.0
            && self.total_interest == 0.0
            && self.average_annual_interest == 0.0
    }
}

pub fn term_months(term_years: u32) -> u32 {
    term_years.saturating_mul(12)
}

/// Level payment per unit of principal
///
/// Evaluated as r / (1 - (1+r)^-n) through `ln_1p`/`exp_m1`, which equals the
/// closed form but stays finite when (1+r)^n rounds to 1 or overflows. Falls
/// back to straight-line repayment when the monthly rate is zero. Returns 0
/// for a zero term or a negative or non-finite rate.
pub fn payment_factor(monthly_rate: f64, months: u32) -> f64 {
    if months == 0 || !monthly_rate.is_finite() || monthly_rate < 0.0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return 1.0 / months as f64;
    }
    let discounted = -(-(months as f64) * monthly_rate.ln_1p()).exp_m1();
    monthly_rate / discounted
}

/// Compute the monthly payment and interest totals for a fixed-rate loan
///
/// Returns the zero result, never an error, when the principal is not in
/// (0, 5,000,000], the rate is negative or not finite, or the term is zero.
pub fn compute_quote(principal: f64, annual_rate: f64, term_years: u32) -> LoanQuoteResult {
    quote_with_cap(principal, annual_rate, term_years, MAX_PRINCIPAL)
}

pub(crate) fn quote_with_cap(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
    max_principal: f64,
) -> LoanQuoteResult {
    let in_domain = principal.is_finite()
        && principal > 0.0
        && principal <= max_principal
        && annual_rate.is_finite()
        && annual_rate >= 0.0
        && term_years > 0;
    if !in_domain {
        debug!(
            "No quote for principal={} rate={} term_years={}",
            principal, annual_rate, term_years
        );
        return LoanQuoteResult::zero();
    }

    let months = term_months(term_years);
    let monthly_rate = annual_rate / 12.0;

    let monthly_payment = if monthly_rate == 0.0 {
        principal / months as f64
    } else {
        principal * payment_factor(monthly_rate, months)
    };

    let total_paid = monthly_payment * months as f64;
    let total_interest = total_paid - principal;
    let average_annual_interest = total_interest / term_years as f64;

    let result = LoanQuoteResult {
        monthly_payment,
        total_paid,
        total_interest,
        average_annual_interest,
    };
    if !result.is_finite() {
        debug!(
            "Quote overflowed for principal={} rate={} term_years={}",
            principal, annual_rate, term_years
        );
        return LoanQuoteResult::zero();
    }
    result
}
