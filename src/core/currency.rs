//! Currency codes and the rate table quoted against the base currency

use crate::core::error::{ConversionError, RateError};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Every rate in a [`RateTable`] is quoted against this currency.
pub const BASE_CURRENCY: &str = "USD";

/// Codes the presentation layer offers for selection.
pub const SUPPORTED_CURRENCIES: [&str; 7] = ["USD", "EUR", "GBP", "JPY", "AUD", "CAD", "PKR"];

/// A three letter, uppercase currency code such as `EUR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wraps a code already known to be well formed.
    pub(crate) fn known(code: &'static str) -> Self {
        CurrencyCode(code.to_string())
    }

    pub fn base() -> Self {
        Self::known(BASE_CURRENCY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_base(&self) -> bool {
        self.0 == BASE_CURRENCY
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_CURRENCIES.contains(&self.0.as_str())
    }

    /// The selectable codes, in display order.
    pub fn supported() -> Vec<CurrencyCode> {
        SUPPORTED_CURRENCIES
            .iter()
            .map(|c| Self::known(*c))
            .collect()
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CurrencyCode(code.to_ascii_uppercase()))
        } else {
            Err(ConversionError::Validation(format!(
                "'{}' is not a currency code",
                s.trim()
            )))
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Rates keyed by currency code, each expressing units of that currency per
/// one unit of [`BASE_CURRENCY`].
///
/// A table is built whole and never mutated afterwards; a newer fetch
/// produces a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
    date: Option<NaiveDate>,
}

impl RateTable {
    /// Builds a table, rejecting any rate that is not positive and finite.
    pub fn new(rates: HashMap<String, f64>) -> Result<Self, RateError> {
        if let Some((code, rate)) = rates.iter().find(|(_, r)| !(r.is_finite() && **r > 0.0)) {
            return Err(RateError::MalformedResponse(format!(
                "rate for {code} is not a positive number: {rate}"
            )));
        }
        Ok(Self { rates, date: None })
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Date the provider quoted these rates for, if it reported one.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Rate of `currency` against the base.
    ///
    /// The base is 1.0 whether or not the provider listed it, but only once
    /// a table has been loaded: an empty table knows no currencies at all.
    pub fn rate(&self, currency: &CurrencyCode) -> Result<f64, ConversionError> {
        if self.rates.is_empty() {
            return Err(ConversionError::UnknownCurrency(currency.to_string()));
        }
        match self.rates.get(currency.as_str()) {
            Some(rate) => Ok(*rate),
            None if currency.is_base() => Ok(1.0),
            None => Err(ConversionError::UnknownCurrency(currency.to_string())),
        }
    }
}

/// Source of complete rate tables quoted against [`BASE_CURRENCY`].
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable, RateError>;
}
