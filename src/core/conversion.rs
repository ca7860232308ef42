//! Cross-rate conversion through the base currency.

use crate::core::currency::{CurrencyCode, RateTable};
use crate::core::error::ConversionError;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// A validated request to convert `amount` units of `source` into `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

impl ConversionRequest {
    pub fn new(amount: f64, source: CurrencyCode, target: CurrencyCode) -> Self {
        Self {
            amount,
            source,
            target,
        }
    }

    /// Builds a request from raw user input. Any missing field, an amount
    /// that does not parse, or a malformed code is a validation failure.
    pub fn from_input(
        amount: Option<&str>,
        source: Option<&str>,
        target: Option<&str>,
    ) -> Result<Self, ConversionError> {
        let amount = amount
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ConversionError::Validation("amount is missing".to_string()))?;
        let amount: f64 = amount
            .parse()
            .map_err(|_| ConversionError::Validation(format!("'{amount}' is not a number")))?;
        let source = source
            .ok_or_else(|| ConversionError::Validation("source currency is missing".to_string()))?
            .parse::<CurrencyCode>()?;
        let target = target
            .ok_or_else(|| ConversionError::Validation("target currency is missing".to_string()))?
            .parse::<CurrencyCode>()?;

        let request = Self::new(amount, source, target);
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<(), ConversionError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ConversionError::Validation(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Outcome of one successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRecord {
    pub amount: f64,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    /// Converted amount, always with exactly two decimals.
    pub result: String,
}

/// Rate that turns one unit of `source` into units of `target`.
///
/// A source in the base currency reads the target's rate directly; any other
/// pair is crossed through the base. Converting a currency into itself is
/// 1.0, provided the table knows the currency.
pub fn effective_rate(
    source: &CurrencyCode,
    target: &CurrencyCode,
    rates: &RateTable,
) -> Result<f64, ConversionError> {
    let target_rate = rates.rate(target)?;
    if source == target {
        return Ok(1.0);
    }
    if source.is_base() {
        return Ok(target_rate);
    }
    let source_rate = rates.rate(source)?;
    Ok(target_rate / source_rate)
}

/// Renders `value` with exactly two decimals, rounding halves away from zero.
///
/// Works on the exact binary value of the float, so `0.125` becomes "0.13"
/// while `1.005` (stored just below the half) stays "1.00".
pub fn format_amount(value: f64) -> Option<String> {
    let mut rounded = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    Some(rounded.to_string())
}

pub fn convert(
    request: &ConversionRequest,
    rates: &RateTable,
) -> Result<ConversionRecord, ConversionError> {
    request.validate()?;

    let rate = effective_rate(&request.source, &request.target, rates)?;
    let converted = request.amount * rate;
    let result = format_amount(converted).ok_or_else(|| {
        ConversionError::Validation(format!(
            "amount {} is too large to convert",
            request.amount
        ))
    })?;
    debug!(
        source = %request.source,
        target = %request.target,
        rate,
        "Converted {} at effective rate",
        request.amount
    );

    Ok(ConversionRecord {
        amount: request.amount,
        source: request.source.clone(),
        target: request.target.clone(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn sample_rates() -> RateTable {
        let rates: HashMap<String, f64> = [("USD", 1.0), ("EUR", 0.9), ("PKR", 278.0)]
            .into_iter()
            .map(|(c, r)| (c.to_string(), r))
            .collect();
        RateTable::new(rates).unwrap()
    }

    fn request(amount: f64, from: &str, to: &str) -> ConversionRequest {
        ConversionRequest::new(amount, code(from), code(to))
    }

    #[test]
    fn test_convert_from_base() {
        let record = convert(&request(100.0, "USD", "PKR"), &sample_rates()).unwrap();
        assert_eq!(record.result, "27800.00");
        assert_eq!(record.amount, 100.0);
        assert_eq!(record.source, code("USD"));
        assert_eq!(record.target, code("PKR"));
    }

    #[test]
    fn test_convert_cross_rate() {
        let record = convert(&request(100.0, "EUR", "PKR"), &sample_rates()).unwrap();
        assert_eq!(record.result, "30888.89");
    }

    #[test]
    fn test_convert_into_base() {
        let record = convert(&request(90.0, "EUR", "USD"), &sample_rates()).unwrap();
        assert_eq!(record.result, "100.00");
    }

    #[test]
    fn test_result_keeps_two_decimals() {
        let record = convert(&request(137.0, "USD", "EUR"), &sample_rates()).unwrap();
        assert_eq!(record.result, "123.30");
        let record = convert(&request(0.001, "USD", "EUR"), &sample_rates()).unwrap();
        assert_eq!(record.result, "0.00");
    }

    #[test]
    fn test_identity_conversion() {
        let rates = sample_rates();
        for c in ["USD", "EUR", "PKR"] {
            for (amount, expected) in [(12.345, "12.35"), (0.125, "0.13"), (10.625, "10.63")] {
                let record = convert(&request(amount, c, c), &rates).unwrap();
                assert_eq!(record.result, expected, "identity {amount} for {c}");
            }
        }
    }

    #[test]
    fn test_exact_halves_round_up() {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), 0.5);
        rates.insert("GBP".to_string(), 0.25);
        let rates = RateTable::new(rates).unwrap();

        // 0.25 * 0.5 and 2.5 * 0.25 are exact in binary
        let record = convert(&request(0.25, "USD", "EUR"), &rates).unwrap();
        assert_eq!(record.result, "0.13");
        let record = convert(&request(2.5, "USD", "GBP"), &rates).unwrap();
        assert_eq!(record.result, "0.63");
        // Cross rate GBP/EUR = 0.5
        let record = convert(&request(4.75, "EUR", "GBP"), &rates).unwrap();
        assert_eq!(record.result, "2.38");
        let record = convert(&request(2.375, "USD", "USD"), &rates).unwrap();
        assert_eq!(record.result, "2.38");
    }

    #[test]
    fn test_values_below_half_round_down() {
        assert_eq!(format_amount(1.005).as_deref(), Some("1.00"));
        assert_eq!(format_amount(1.015).as_deref(), Some("1.01"));
        assert_eq!(format_amount(27800.0).as_deref(), Some("27800.00"));
        assert_eq!(format_amount(0.5).as_deref(), Some("0.50"));
        assert_eq!(format_amount(f64::INFINITY), None);
        assert_eq!(format_amount(f64::NAN), None);
    }

    #[test]
    fn test_identity_requires_known_currency() {
        let result = convert(&request(10.0, "GBP", "GBP"), &sample_rates());
        assert_eq!(
            result,
            Err(ConversionError::UnknownCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn test_unknown_target() {
        let result = convert(&request(10.0, "USD", "ZZZ"), &sample_rates());
        assert_eq!(
            result,
            Err(ConversionError::UnknownCurrency("ZZZ".to_string()))
        );
    }

    #[test]
    fn test_unknown_source() {
        let result = convert(&request(10.0, "JPY", "EUR"), &sample_rates());
        assert_eq!(
            result,
            Err(ConversionError::UnknownCurrency("JPY".to_string()))
        );
    }

    #[test]
    fn test_empty_table_rejects_everything() {
        let empty = RateTable::default();
        for (from, to) in [("USD", "EUR"), ("USD", "USD"), ("EUR", "PKR")] {
            assert!(matches!(
                convert(&request(10.0, from, to), &empty),
                Err(ConversionError::UnknownCurrency(_))
            ));
        }
    }

    #[test]
    fn test_invalid_amounts() {
        let rates = sample_rates();
        for amount in [f64::NAN, f64::INFINITY, 0.0, -5.0] {
            assert!(
                matches!(
                    convert(&request(amount, "USD", "EUR"), &rates),
                    Err(ConversionError::Validation(_))
                ),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflowing_result_is_rejected() {
        let result = convert(&request(f64::MAX, "USD", "PKR"), &sample_rates());
        assert!(matches!(result, Err(ConversionError::Validation(_))));
    }

    #[test]
    fn test_request_from_input() {
        let req = ConversionRequest::from_input(Some(" 42.5 "), Some("eur"), Some("PKR")).unwrap();
        assert_eq!(req, request(42.5, "EUR", "PKR"));

        for (amount, from, to) in [
            (None, Some("USD"), Some("EUR")),
            (Some(""), Some("USD"), Some("EUR")),
            (Some("abc"), Some("USD"), Some("EUR")),
            (Some("NaN"), Some("USD"), Some("EUR")),
            (Some("-1"), Some("USD"), Some("EUR")),
            (Some("1"), None, Some("EUR")),
            (Some("1"), Some("USD"), None),
            (Some("1"), Some("US"), Some("EUR")),
        ] {
            assert!(
                matches!(
                    ConversionRequest::from_input(amount, from, to),
                    Err(ConversionError::Validation(_))
                ),
                "input {amount:?} {from:?} {to:?} should be rejected"
            );
        }
    }
}
