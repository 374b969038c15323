//! Batch quoting from CSV
//!
//! Input columns: `principal` (raw text, sanitized like the amount box) and
//! optional `annual_rate` / `term_years` overriding the configured terms.

use csv::{Reader, Writer};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::BatchError;
use crate::loan::{LoanQuoteRequest, LoanQuoteResult, LoanTerms};

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    principal: String,
    #[serde(default)]
    annual_rate: Option<String>,
    #[serde(default)]
    term_years: Option<String>,
}

impl CsvRow {
    fn to_request(self, row: usize, defaults: &LoanTerms) -> Result<LoanQuoteRequest, BatchError> {
        let mut terms = *defaults;

        if let Some(raw) = non_blank(self.annual_rate) {
            let rate: f64 = raw.parse().map_err(|_| BatchError::InvalidOverride {
                row,
                field: "annual_rate",
                value: raw.clone(),
            })?;
            terms = terms.with_annual_rate(rate);
        }

        if let Some(raw) = non_blank(self.term_years) {
            let years: u32 = raw.parse().map_err(|_| BatchError::InvalidOverride {
                row,
                field: "term_years",
                value: raw.clone(),
            })?;
            terms = terms.with_term_years(years);
        }

        Ok(LoanQuoteRequest::from_input(&self.principal, &terms))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One quoted row of a batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchQuote {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: u32,
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub average_annual_interest: f64,
}

impl BatchQuote {
    fn new(request: &LoanQuoteRequest, result: &LoanQuoteResult) -> Self {
        Self {
            principal: request.principal,
            annual_rate: request.annual_rate,
            term_years: request.term_years,
            monthly_payment: result.monthly_payment,
            total_paid: result.total_paid,
            total_interest: result.total_interest,
            average_annual_interest: result.average_annual_interest,
        }
    }
}

/// Load quote requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(
    path: P,
    defaults: &LoanTerms,
) -> Result<Vec<LoanQuoteRequest>, BatchError> {
    let reader = Reader::from_path(path)?;
    collect_requests(reader, defaults)
}

/// Load quote requests from any reader (e.g., string buffer, network stream)
pub fn load_requests_from_reader<R: Read>(
    reader: R,
    defaults: &LoanTerms,
) -> Result<Vec<LoanQuoteRequest>, BatchError> {
    collect_requests(Reader::from_reader(reader), defaults)
}

fn collect_requests<R: Read>(
    mut reader: Reader<R>,
    defaults: &LoanTerms,
) -> Result<Vec<LoanQuoteRequest>, BatchError> {
    let mut requests = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Row numbers count the header as row 1
        requests.push(row.to_request(i + 2, defaults)?);
    }

    Ok(requests)
}

/// Quote every request in parallel, preserving input order
///
/// Each row is capped at `max_principal` from `defaults`.
pub fn quote_all(requests: &[LoanQuoteRequest], defaults: &LoanTerms) -> Vec<BatchQuote> {
    requests
        .par_iter()
        .map(|request| {
            let terms = LoanTerms {
                prime_rate: 0.0,
                spread: request.annual_rate,
                term_years: request.term_years,
                ..*defaults
            };
            BatchQuote::new(request, &terms.quote(request.principal))
        })
        .collect()
}

/// Write quoted rows as CSV
pub fn write_quotes<W: Write>(writer: W, quotes: &[BatchQuote]) -> Result<(), BatchError> {
    let mut csv_writer = Writer::from_writer(writer);
    for quote in quotes {
        csv_writer.serialize(quote)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read `input`, quote every row and write the results to `output`
pub fn run_batch<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    defaults: &LoanTerms,
) -> Result<Vec<BatchQuote>, BatchError> {
    let requests = load_requests(&input, defaults)?;
    info!("Loaded {} quote requests from {}", requests.len(), input.as_ref().display());

    let quotes = quote_all(&requests, defaults);
    let zero_count = quotes.iter().filter(|q| q.monthly_payment == 0.0).count();
    if zero_count > 0 {
        info!("{} of {} rows produced no quote", zero_count, quotes.len());
    }

    let file = std::fs::File::create(&output)?;
    write_quotes(file, &quotes)?;
    info!("Wrote {} quotes to {}", quotes.len(), output.as_ref().display());

    Ok(quotes)
}
