//! Core conversion logic and abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod rates;
pub mod session;

// Re-export main types for cleaner imports
pub use conversion::{ConversionRecord, ConversionRequest};
pub use currency::{BASE_CURRENCY, CurrencyCode, RateProvider, RateTable};
pub use error::{ConversionError, RateError};
pub use history::ConversionHistory;
pub use rates::{LoadState, RateStore};
pub use session::Session;
