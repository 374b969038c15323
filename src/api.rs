//! JSON quote endpoint logic, shared by the Lambda handler
//!
//! Request body:
//! ```json
//! {"principal": "250,000", "lang": "es", "annual_rate": 0.0925, "term_years": 10, "schedule": true}
//! ```
//! Only `principal` is required. It may be a number or the raw text typed into
//! the amount box.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::display::QuoteView;
use crate::error::ApiError;
use crate::format::Locale;
use crate::input::sanitize_digits;
use crate::loan::{LoanQuoteRequest, LoanQuoteResult, LoanTerms, YearSummary};

/// Principal as sent by the client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PrincipalField {
    Amount(f64),
    Text(String),
}

impl PrincipalField {
    fn value(&self) -> f64 {
        match self {
            PrincipalField::Amount(amount) => *amount,
            PrincipalField::Text(raw) => sanitize_digits(raw).parse::<f64>().unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteApiRequest {
    pub principal: PrincipalField,

    #[serde(default, alias = "locale")]
    pub lang: Locale,

    /// Overrides the configured APR
    #[serde(default)]
    pub annual_rate: Option<f64>,

    #[serde(default)]
    pub term_years: Option<u32>,

    /// Include the yearly amortization summary
    #[serde(default)]
    pub schedule: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteApiResponse {
    pub request: LoanQuoteRequest,
    pub result: LoanQuoteResult,
    pub formatted: QuoteView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<YearSummary>>,
}

/// Parse a request body and quote it against `defaults`
///
/// Malformed JSON and invalid rate/term overrides are errors; a bad principal
/// is not, it simply quotes to zero.
pub fn handle_quote(body: &str, defaults: &LoanTerms) -> Result<QuoteApiResponse, ApiError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    let request: QuoteApiRequest = serde_json::from_str(body)?;
    quote_request(&request, defaults)
}

pub fn quote_request(
    request: &QuoteApiRequest,
    defaults: &LoanTerms,
) -> Result<QuoteApiResponse, ApiError> {
    let mut terms = *defaults;
    if let Some(rate) = request.annual_rate {
        terms = terms.with_annual_rate(rate);
    }
    if let Some(years) = request.term_years {
        terms = terms.with_term_years(years);
    }
    terms.validate()?;

    let principal = request.principal.value();
    let result = terms.quote(principal);
    let loan = LoanQuoteRequest::new(principal, terms.annual_rate(), terms.term_years);
    debug!("Quoted {:?} -> {:?}", loan, result);

    let schedule = if request.schedule {
        Some(terms.schedule(principal).yearly_summary())
    } else {
        None
    };

    Ok(QuoteApiResponse {
        request: loan,
        result,
        formatted: QuoteView::new(principal, &result, &terms, request.lang),
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_numeric_principal() {
        let response = handle_quote(r#"{"principal": 250000}"#, &LoanTerms::default()).unwrap();
        assert_abs_diff_eq!(response.result.monthly_payment, 3200.82, epsilon = 0.01);
        assert_eq!(response.formatted.monthly_payment, "$3,200.82");
        assert!(response.schedule.is_none());
    }

    #[test]
    fn test_text_principal_and_spanish() {
        let body = r#"{"principal": "$250,000", "lang": "es"}"#;
        let response = handle_quote(body, &LoanTerms::default()).unwrap();
        assert_eq!(response.request.principal, 250_000.0);
        assert_eq!(response.formatted.monthly_payment, "3200,82 US$");
    }

    #[test]
    fn test_overrides() {
        let body = r#"{"principal": 120000, "annual_rate": 0, "term_years": 5}"#;
        let response = handle_quote(body, &LoanTerms::default()).unwrap();
        assert_eq!(response.request.term_years, 5);
        assert_eq!(response.result.monthly_payment, 2_000.0);
        assert_eq!(response.result.total_interest, 0.0);
    }

    #[test]
    fn test_bad_principal_is_zero_quote() {
        for body in [
            r#"{"principal": "abc"}"#,
            r#"{"principal": -100}"#,
            r#"{"principal": 9000000}"#,
        ] {
            let response = handle_quote(body, &LoanTerms::default()).unwrap();
            assert!(response.result.is_zero(), "expected zero quote for {}", body);
            assert_eq!(response.formatted.monthly_payment, "$0.00");
        }
    }

    #[test]
    fn test_schedule_included() {
        let body = r#"{"principal": 250000, "schedule": true}"#;
        let response = handle_quote(body, &LoanTerms::default()).unwrap();
        let schedule = response.schedule.unwrap();
        assert_eq!(schedule.len(), 10);
        assert_abs_diff_eq!(schedule[9].ending_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_json() {
        let err = handle_quote("{principal:", &LoanTerms::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson(_)));
        assert_eq!(err.status_code(), 400);

        // Empty body has no principal
        assert!(matches!(
            handle_quote("", &LoanTerms::default()),
            Err(ApiError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_invalid_terms() {
        let body = r#"{"principal": 1000, "annual_rate": -0.05}"#;
        let err = handle_quote(body, &LoanTerms::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidTerms(_)));

        let body = r#"{"principal": 1000, "term_years": 0}"#;
        assert!(handle_quote(body, &LoanTerms::default()).is_err());
    }

    #[test]
    fn test_oversized_term_is_rejected() {
        for body in [
            r#"{"principal": 1000, "term_years": 400000000}"#,
            r#"{"principal": 1000, "term_years": 51, "schedule": true}"#,
        ] {
            let err = handle_quote(body, &LoanTerms::default()).unwrap_err();
            assert!(matches!(err, ApiError::InvalidTerms(_)), "expected rejection for {}", body);
            assert_eq!(err.status_code(), 400);
        }

        let body = r#"{"principal": 1000, "term_years": 50, "schedule": true}"#;
        let response = handle_quote(body, &LoanTerms::default()).unwrap();
        assert_eq!(response.schedule.unwrap().len(), 50);
    }

    #[test]
    fn test_response_serializes() {
        let response = handle_quote(r#"{"principal": 1000}"#, &LoanTerms::default()).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["result"]["monthly_payment"].as_f64().unwrap() > 0.0);
        assert_eq!(json["formatted"]["locale"], "en");
        assert!(json.get("schedule").is_none());
    }
}
