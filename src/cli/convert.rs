use super::ui;
use crate::core::currency::SUPPORTED_CURRENCIES;
use crate::core::{ConversionError, ConversionRecord, ConversionRequest, RateError, Session};
use anyhow::{Context, Result};
use tracing::debug;

/// Parses user input into a request, accepting only the selectable currencies.
pub fn build_request(
    amount: &str,
    from: &str,
    to: &str,
) -> Result<ConversionRequest, ConversionError> {
    let request = ConversionRequest::from_input(Some(amount), Some(from), Some(to))?;
    for code in [&request.source, &request.target] {
        if !code.is_supported() {
            return Err(ConversionError::Validation(format!(
                "{code} is not supported, choose one of {}",
                SUPPORTED_CURRENCIES.join(", ")
            )));
        }
    }
    Ok(request)
}

/// One line summary, e.g. `100 USD = 27800.00 PKR`.
pub fn format_record(record: &ConversionRecord) -> String {
    format!(
        "{} {} = {} {}",
        record.amount,
        record.source,
        ui::style_text(&record.result, ui::StyleType::Result),
        record.target
    )
}

/// Loads rates into the session while a spinner tracks the load state.
pub async fn load_rates(session: &mut Session) -> Result<(), RateError> {
    let spinner = ui::spin_while_loading(session.subscribe());
    let result = session.load_rates().await;
    if let Err(e) = spinner.await {
        debug!(error = %e, "Spinner task ended abnormally");
    }
    result
}

pub async fn run(
    session: &mut Session,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<ConversionRecord> {
    let request = build_request(amount, from, to)?;
    load_rates(session)
        .await
        .context("Could not load exchange rates")?;

    let record = session.convert(&request)?;
    println!("{}", format_record(&record));
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_accepts_supported_pair() {
        let request = build_request("100", "usd", "pkr").unwrap();
        assert_eq!(request.amount, 100.0);
        assert_eq!(request.source.as_str(), "USD");
        assert_eq!(request.target.as_str(), "PKR");
    }

    #[test]
    fn test_build_request_rejects_unsupported_currency() {
        let err = build_request("100", "USD", "CHF").unwrap_err();
        assert!(
            matches!(err, ConversionError::Validation(msg) if msg.starts_with("CHF is not supported"))
        );
    }

    #[test]
    fn test_build_request_rejects_bad_amount() {
        assert!(matches!(
            build_request("ten", "USD", "EUR"),
            Err(ConversionError::Validation(_))
        ));
    }

    #[test]
    fn test_format_record() {
        let record = ConversionRecord {
            amount: 12.5,
            source: "EUR".parse().unwrap(),
            target: "GBP".parse().unwrap(),
            result: "10.75".to_string(),
        };
        let line = console::strip_ansi_codes(&format_record(&record)).to_string();
        assert_eq!(line, "12.5 EUR = 10.75 GBP");
    }
}
