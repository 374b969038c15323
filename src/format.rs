//! Locale-aware number formatting for quote display
//!
//! Values are rounded to cents here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Locale::En => ',',
            Locale::Es => '.',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::En => '.',
            Locale::Es => ',',
        }
    }

    /// Fewest integer digits that get grouped; Spanish leaves "3200" whole
    fn min_grouping_digits(&self) -> usize {
        match self {
            Locale::En => 4,
            Locale::Es => 5,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts bare language codes and region tags ("es", "ES", "es-MX", "en_US")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Insert the locale's group separators into a run of ASCII digits
fn group_digits(digits: &str, locale: Locale) -> String {
    if digits.len() < locale.min_grouping_digits() {
        return digits.to_string();
    }
    let separator = locale.group_separator();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Whole number with locale grouping ("250,000" / "250.000", "1,000" / "1000")
pub fn format_grouped(value: u64, locale: Locale) -> String {
    group_digits(&value.to_string(), locale)
}

/// US dollar amount at two decimals
///
/// English renders `$3,200.82`, Spanish `3200,82 US$` and `12.000,00 US$`.
/// Non-finite values are shown as zero.
pub fn format_currency(value: f64, locale: Locale) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let negative = value < 0.0 && fixed != "0.00";
    let sign = if negative { "-" } else { "" };
    let whole = group_digits(whole, locale);

    match locale {
        Locale::En => format!("{}${}.{}", sign, whole, cents),
        Locale::Es => format!("{}{}{}{} US$", sign, whole, locale.decimal_separator(), cents),
    }
}

/// Rate as a percentage with at most two decimals ("9.25%" / "9,25 %")
pub fn format_percent(rate: f64, locale: Locale) -> String {
    let rate = if rate.is_finite() { rate } else { 0.0 };
    let fixed = format!("{:.2}", rate * 100.0);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    match locale {
        Locale::En => format!("{}%", trimmed),
        Locale::Es => format!("{} %", trimmed.replace('.', ",")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("ES".parse::<Locale>(), Ok(Locale::Es));
        assert_eq!("es-MX".parse::<Locale>(), Ok(Locale::Es));
        assert_eq!("en_US".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_serde() {
        let locale: Locale = serde_json::from_str(r#""es-US""#).unwrap();
        assert_eq!(locale, Locale::Es);
        assert_eq!(serde_json::to_string(&Locale::En).unwrap(), r#""en""#);
        assert!(serde_json::from_str::<Locale>(r#""de""#).is_err());
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0, Locale::En), "0");
        assert_eq!(format_grouped(999, Locale::En), "999");
        assert_eq!(format_grouped(1_000, Locale::En), "1,000");
        assert_eq!(format_grouped(250_000, Locale::En), "250,000");
        assert_eq!(format_grouped(5_000_000, Locale::Es), "5.000.000");
        assert_eq!(format_grouped(7_500, Locale::Es), "7500");
        assert_eq!(format_grouped(10_000, Locale::Es), "10.000");
    }

    #[test]
    fn test_format_currency_en() {
        assert_eq!(format_currency(3200.818049, Locale::En), "$3,200.82");
        assert_eq!(format_currency(0.0, Locale::En), "$0.00");
        assert_eq!(format_currency(13409.816593, Locale::En), "$13,409.82");
        assert_eq!(format_currency(1_234_567.5, Locale::En), "$1,234,567.50");
        assert_eq!(format_currency(12.0, Locale::En), "$12.00");
    }

    #[test]
    fn test_format_currency_es() {
        assert_eq!(format_currency(3200.818049, Locale::Es), "3200,82 US$");
        assert_eq!(format_currency(9999.994, Locale::Es), "9999,99 US$");
        assert_eq!(format_currency(12_000.0, Locale::Es), "12.000,00 US$");
        assert_eq!(format_currency(1_234_567.5, Locale::Es), "1.234.567,50 US$");
        assert_eq!(format_currency(-3200.82, Locale::Es), "-3200,82 US$");
        assert_eq!(format_currency(0.0, Locale::Es), "0,00 US$");
    }

    #[test]
    fn test_format_currency_edge_values() {
        assert_eq!(format_currency(-42.5, Locale::En), "-$42.50");
        assert_eq!(format_currency(-0.001, Locale::En), "$0.00");
        assert_eq!(format_currency(f64::NAN, Locale::En), "$0.00");
        assert_eq!(format_currency(999.999, Locale::En), "$1,000.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0925, Locale::En), "9.25%");
        assert_eq!(format_percent(0.025, Locale::En), "2.5%");
        assert_eq!(format_percent(0.0675, Locale::Es), "6,75 %");
        assert_eq!(format_percent(0.10, Locale::En), "10%");
        assert_eq!(format_percent(0.0, Locale::En), "0%");
    }
}
