//! Month-by-month amortization schedule behind a quote

use serde::{Deserialize, Serialize};
use std::io::Write;

use log::debug;

use super::quote::{LoanQuoteRequest, LoanQuoteResult};
use super::terms::MAX_TERM_YEARS;

/// A single month of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number, 1-based
    pub month: u32,
    /// Loan year the payment falls in, 1-based
    pub year: u32,
    pub beginning_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub ending_balance: f64,
}

/// Interest and principal repaid over one loan year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub payments: f64,
    pub interest: f64,
    pub principal: f64,
    pub ending_balance: f64,
}

/// Full amortization of a quoted loan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<ScheduleRow>,
}

impl AmortizationSchedule {
    /// Amortize the request at its level monthly payment
    ///
    /// Requests that quote to zero produce an empty schedule.
    pub fn build(request: &LoanQuoteRequest) -> Self {
        Self::from_quote(request, &request.quote())
    }

    /// Amortize the request at an already computed quote
    ///
    /// Terms longer than `MAX_TERM_YEARS` produce an empty schedule.
    pub fn from_quote(request: &LoanQuoteRequest, quote: &LoanQuoteResult) -> Self {
        if quote.is_zero() {
            return Self::default();
        }
        if request.term_years > MAX_TERM_YEARS {
            debug!("No schedule for a {} year term", request.term_years);
            return Self::default();
        }

        let monthly_rate = request.monthly_rate();
        let months = request.term_months();
        let mut rows = Vec::with_capacity(months as usize);
        let mut balance = request.principal;

        for month in 1..=months {
            let interest = balance * monthly_rate;
            let principal = quote.monthly_payment - interest;
            let ending_balance = balance - principal;

            rows.push(ScheduleRow {
                month,
                year: (month - 1) / 12 + 1,
                beginning_balance: balance,
                payment: quote.monthly_payment,
                interest,
                principal,
                ending_balance,
            });

            balance = ending_balance;
        }

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }

    /// Balance remaining after the last payment (zero up to float error)
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.ending_balance).unwrap_or(0.0)
    }

    /// Roll the monthly rows up into loan years
    pub fn yearly_summary(&self) -> Vec<YearSummary> {
        let mut years: Vec<YearSummary> = Vec::new();

        for row in &self.rows {
            match years.last_mut() {
                Some(summary) if summary.year == row.year => {
                    summary.payments += row.payment;
                    summary.interest += row.interest;
                    summary.principal += row.principal;
                    summary.ending_balance = row.ending_balance;
                }
                _ => years.push(YearSummary {
                    year: row.year,
                    payments: row.payment,
                    interest: row.interest,
                    principal: row.principal,
                    ending_balance: row.ending_balance,
                }),
            }
        }

        years
    }

    /// Write the monthly rows as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the yearly summary as CSV
    pub fn write_yearly_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for summary in self.yearly_summary() {
            csv_writer.serialize(summary)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference_request() -> LoanQuoteRequest {
        LoanQuoteRequest::new(250_000.0, 0.0925, 10)
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let schedule = AmortizationSchedule::build(&reference_request());
        assert_eq!(schedule.len(), 120);
        assert_abs_diff_eq!(schedule.final_balance(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(schedule.total_principal(), 250_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_interest_matches_quote() {
        let request = reference_request();
        let schedule = AmortizationSchedule::build(&request);
        let quote = request.quote();
        assert_abs_diff_eq!(schedule.total_interest(), quote.total_interest, epsilon = 1e-5);
    }

    #[test]
    fn test_first_month_split() {
        let schedule = AmortizationSchedule::build(&reference_request());
        let first = schedule.rows[0];

        // 250,000 * 0.0925 / 12
        assert_abs_diff_eq!(first.interest, 1927.083333, epsilon = 1e-5);
        assert_abs_diff_eq!(first.principal, first.payment - first.interest, epsilon = 1e-9);
        assert_eq!(first.year, 1);
        assert_eq!(schedule.rows[12].year, 2);
    }

    #[test]
    fn test_interest_share_declines() {
        let schedule = AmortizationSchedule::build(&reference_request());
        for pair in schedule.rows.windows(2) {
            assert!(pair[1].interest < pair[0].interest);
            assert!(pair[1].principal > pair[0].principal);
        }
    }

    #[test]
    fn test_yearly_summary() {
        let schedule = AmortizationSchedule::build(&reference_request());
        let years = schedule.yearly_summary();
        assert_eq!(years.len(), 10);
        assert_eq!(years[0].year, 1);
        assert_abs_diff_eq!(years[0].payments, schedule.rows[0].payment * 12.0, epsilon = 1e-6);

        let interest: f64 = years.iter().map(|y| y.interest).sum();
        assert_abs_diff_eq!(interest, schedule.total_interest(), epsilon = 1e-6);
        assert_abs_diff_eq!(years[9].ending_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = AmortizationSchedule::build(&LoanQuoteRequest::new(12_000.0, 0.0, 1));
        assert_eq!(schedule.len(), 12);
        assert!(schedule.rows.iter().all(|r| r.interest == 0.0));
        assert_abs_diff_eq!(schedule.final_balance(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_quote_has_empty_schedule() {
        let schedule = AmortizationSchedule::build(&LoanQuoteRequest::new(0.0, 0.0925, 10));
        assert!(schedule.is_empty());
        assert!(schedule.yearly_summary().is_empty());
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_oversized_term_has_empty_schedule() {
        let request = LoanQuoteRequest::new(1_000.0, 0.0925, 400_000_000);
        assert!(!request.quote().is_zero());
        assert!(AmortizationSchedule::build(&request).is_empty());

        let longest = LoanQuoteRequest::new(1_000.0, 0.0925, MAX_TERM_YEARS);
        assert_eq!(AmortizationSchedule::build(&longest).len(), 600);
    }

    #[test]
    fn test_write_csv() {
        let schedule = AmortizationSchedule::build(&LoanQuoteRequest::new(12_000.0, 0.06, 1));
        let mut buffer = Vec::new();
        schedule.write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("month,year,beginning_balance,payment,interest,principal,ending_balance")
        );
        assert_eq!(lines.count(), 12);
    }
}
