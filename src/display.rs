//! Formatted view of a quote, as the calculator widget presents it

use serde::Serialize;

use crate::format::{format_currency, format_grouped, format_percent, Locale};
use crate::input::PrincipalInput;
use crate::labels::CalculatorLabels;
use crate::loan::{LoanQuoteResult, LoanTerms};

/// Display strings for every field of the widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteView {
    pub locale: Locale,
    pub principal: String,
    pub term_years: u32,
    pub term_months: u32,
    pub annual_rate: String,
    pub monthly_payment: String,
    pub average_annual_interest: String,
    pub total_paid: String,
    pub total_interest: String,
}

impl QuoteView {
    /// Format `quote` for a principal under `terms`
    ///
    /// A zero quote renders every amount as zero currency.
    pub fn new(principal: f64, quote: &LoanQuoteResult, terms: &LoanTerms, locale: Locale) -> Self {
        let whole = if principal.is_finite() && principal > 0.0 {
            principal.trunc() as u64
        } else {
            0
        };

        Self {
            locale,
            principal: format_grouped(whole, locale),
            term_years: terms.term_years,
            term_months: terms.term_months(),
            annual_rate: format_percent(terms.annual_rate(), locale),
            monthly_payment: format_currency(quote.monthly_payment, locale),
            average_annual_interest: format_currency(quote.average_annual_interest, locale),
            total_paid: format_currency(quote.total_paid, locale),
            total_interest: format_currency(quote.total_interest, locale),
        }
    }

    /// Quote the input's current value and format it
    pub fn from_input(input: &PrincipalInput, terms: &LoanTerms, locale: Locale) -> Self {
        let principal = input.value();
        let quote = terms.quote(principal);
        Self::new(principal, &quote, terms, locale)
    }

    /// Labelled plain-text rendering of the widget
    pub fn render_text(&self, terms: &LoanTerms) -> String {
        let labels = CalculatorLabels::for_locale(self.locale);
        let rows = [
            (labels.enter_amount, self.principal.clone()),
            (
                labels.loan_term,
                format!(
                    "{} {} ({} {})",
                    self.term_years, labels.years, self.term_months, labels.months
                ),
            ),
            (labels.interest_rate, format!("{} APR", self.annual_rate)),
            (labels.monthly_payment, self.monthly_payment.clone()),
            (labels.avg_annual_interest, self.average_annual_interest.clone()),
            (labels.total_paid, self.total_paid.clone()),
            (labels.total_interest, self.total_interest.clone()),
        ];
        let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        out.push_str(labels.title);
        out.push('\n');
        out.push_str(&labels.current_rate_line(terms, self.locale));
        out.push_str("\n\n");
        for (label, value) in rows.iter() {
            let pad = width - label.chars().count();
            out.push_str(&format!("  {}{}  {:>16}\n", label, " ".repeat(pad), value));
        }
        out.push('\n');
        out.push_str(labels.disclaimer);
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_view() {
        let terms = LoanTerms::default();
        let input = PrincipalInput::default();
        let view = QuoteView::from_input(&input, &terms, Locale::En);

        assert_eq!(view.principal, "250,000");
        assert_eq!(view.term_months, 120);
        assert_eq!(view.annual_rate, "9.25%");
        assert_eq!(view.monthly_payment, "$3,200.82");
        assert_eq!(view.average_annual_interest, "$13,409.82");
        assert_eq!(view.total_paid, "$384,098.17");
        assert_eq!(view.total_interest, "$134,098.17");
    }

    #[test]
    fn test_empty_input_renders_zero() {
        let terms = LoanTerms::default();
        let mut input = PrincipalInput::default();
        input.clear();
        let view = QuoteView::from_input(&input, &terms, Locale::En);

        assert_eq!(view.principal, "0");
        assert_eq!(view.monthly_payment, "$0.00");
        assert_eq!(view.average_annual_interest, "$0.00");
    }

    #[test]
    fn test_spanish_view() {
        let terms = LoanTerms::default();
        let view = QuoteView::from_input(&PrincipalInput::default(), &terms, Locale::Es);
        assert_eq!(view.principal, "250.000");
        assert_eq!(view.monthly_payment, "3200,82 US$");
        assert_eq!(view.average_annual_interest, "13.409,82 US$");
        assert_eq!(view.annual_rate, "9,25 %");
    }

    #[test]
    fn test_render_text() {
        let terms = LoanTerms::default();
        let view = QuoteView::from_input(&PrincipalInput::default(), &terms, Locale::Es);
        let text = view.render_text(&terms);

        assert!(text.starts_with("Calculadora de Préstamos SBA\n"));
        assert!(text.contains("10 años (120 meses)"));
        assert!(text.contains("Pago mensual estimado"));
        assert!(text.contains("3200,82 US$"));
    }
}
