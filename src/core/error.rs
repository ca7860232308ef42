//! Error types surfaced by the conversion core

use thiserror::Error;

/// Failure while retrieving a rate table from a provider.
///
/// Both variants drive the rate store into its `Failed` state; callers may
/// retry by loading again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// Transport failure, timeout or non-success HTTP status.
    #[error("Failed to fetch exchange rates: {0}")]
    Fetch(String),
    /// The payload was received but `rates` was missing or had the wrong shape.
    #[error("Malformed exchange rate response: {0}")]
    MalformedResponse(String),
}

/// Recoverable failure of a single conversion. History is never touched
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Invalid conversion request: {0}")]
    Validation(String),
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}
