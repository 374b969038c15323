//! English and Spanish copy for the calculator widget

use crate::format::{format_percent, Locale};
use crate::loan::LoanTerms;

/// Static strings rendered around the quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorLabels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub current_rate: &'static str,
    pub enter_amount: &'static str,
    pub loan_term: &'static str,
    pub years: &'static str,
    pub months: &'static str,
    pub interest_rate: &'static str,
    pub monthly_payment: &'static str,
    pub avg_annual_interest: &'static str,
    pub total_paid: &'static str,
    pub total_interest: &'static str,
    pub cta_text: &'static str,
    pub apply_now: &'static str,
    pub or: &'static str,
    pub launch_pfs: &'static str,
    pub disclaimer: &'static str,
    pub as_of: &'static str,
}

const EN: CalculatorLabels = CalculatorLabels {
    title: "SBA Loan Calculator",
    subtitle: "Estimate your monthly payment on a 10-year SBA 7(a) loan",
    current_rate: "Current rate",
    enter_amount: "Enter loan amount",
    loan_term: "Loan term",
    years: "years",
    months: "months",
    interest_rate: "Interest rate",
    monthly_payment: "Estimated monthly payment",
    avg_annual_interest: "Average annual interest",
    total_paid: "Total paid",
    total_interest: "Total interest",
    cta_text: "Ready to take the next step?",
    apply_now: "Apply now",
    or: "or",
    launch_pfs: "Launch PFS Copilot",
    disclaimer: "This calculator provides estimates for illustration only. \
                 Actual rates, terms and payments are set by participating lenders \
                 and depend on your qualifications.",
    as_of: "as of",
};

const ES: CalculatorLabels = CalculatorLabels {
    title: "Calculadora de Préstamos SBA",
    subtitle: "Calcule su pago mensual estimado para un préstamo SBA 7(a) a 10 años",
    current_rate: "Tasa actual",
    enter_amount: "Ingrese el monto del préstamo",
    loan_term: "Plazo del préstamo",
    years: "años",
    months: "meses",
    interest_rate: "Tasa de interés",
    monthly_payment: "Pago mensual estimado",
    avg_annual_interest: "Interés anual promedio",
    total_paid: "Total pagado",
    total_interest: "Interés total",
    cta_text: "¿Listo para dar el siguiente paso?",
    apply_now: "Solicite ahora",
    or: "o",
    launch_pfs: "Iniciar PFS Copilot",
    disclaimer: "Esta calculadora ofrece estimaciones solo con fines ilustrativos. \
                 Las tasas, plazos y pagos reales los establecen los prestamistas \
                 participantes y dependen de su calificación.",
    as_of: "al",
};

impl CalculatorLabels {
    pub fn for_locale(locale: Locale) -> &'static CalculatorLabels {
        match locale {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }

    /// "Current rate: Prime 6.75% + 2.5% = 9.25%", with the publication date when known
    pub fn current_rate_line(&self, terms: &LoanTerms, locale: Locale) -> String {
        let mut line = format!(
            "{}: Prime {} + {} = {}",
            self.current_rate,
            format_percent(terms.prime_rate, locale),
            format_percent(terms.spread, locale),
            format_percent(terms.annual_rate(), locale),
        );
        if let Some(date) = terms.rate_as_of {
            let date = match locale {
                Locale::En => date.format("%m/%d/%Y"),
                Locale::Es => date.format("%d/%m/%Y"),
            };
            line.push_str(&format!(" ({} {})", self.as_of, date));
        }
        line
    }
}
