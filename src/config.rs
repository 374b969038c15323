//! Calculator configuration
//!
//! Loaded from a JSON file, then overridden from the environment:
//!   SBA_PRIME_RATE, SBA_RATE_SPREAD, SBA_TERM_YEARS, SBA_MAX_PRINCIPAL, SBA_LOCALE

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::format::Locale;
use crate::loan::LoanTerms;

/// Default location of the calculator config file
pub const DEFAULT_CONFIG_PATH: &str = "config/calculator.json";

/// Terms and presentation settings used by the CLI and the quote endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub terms: LoanTerms,

    #[serde(default)]
    pub locale: Locale,
}

impl CalculatorConfig {
    /// Load from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: CalculatorConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded calculator config from {}", path.display());
        Ok(config)
    }

    /// Load from `DEFAULT_CONFIG_PATH`, falling back to the built-in terms
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load_from(path)
        } else {
            info!("No config at {}, using built-in SBA 7(a) terms", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    /// Load (explicit path or default), apply environment overrides, validate
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load_default()?,
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.terms.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = parse_override::<f64, _>(&lookup, "SBA_PRIME_RATE") {
            self.terms.prime_rate = rate;
        }
        if let Some(spread) = parse_override::<f64, _>(&lookup, "SBA_RATE_SPREAD") {
            self.terms.spread = spread;
        }
        if let Some(years) = parse_override::<u32, _>(&lookup, "SBA_TERM_YEARS") {
            self.terms.term_years = years;
        }
        if let Some(max) = parse_override::<f64, _>(&lookup, "SBA_MAX_PRINCIPAL") {
            self.terms.max_principal = max;
        }
        if let Some(locale) = parse_override::<Locale, _>(&lookup, "SBA_LOCALE") {
            self.locale = locale;
        }
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => {
            info!("Using {}={}", key, raw.trim());
            Some(value)
        }
        Err(_) => {
            warn!("Ignoring unparsable {}='{}'", key, raw);
            None
        }
    }
}
