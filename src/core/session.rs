//! One conversion session: a rate store plus the history of its conversions.

use crate::core::conversion::{self, ConversionRecord, ConversionRequest};
use crate::core::currency::{RateProvider, RateTable};
use crate::core::error::{ConversionError, RateError};
use crate::core::history::ConversionHistory;
use crate::core::rates::{LoadState, RateStore};
use std::sync::Arc;
use tokio::sync::watch;

pub struct Session {
    rates: RateStore,
    history: ConversionHistory,
}

impl Session {
    pub fn new(provider: Box<dyn RateProvider>) -> Self {
        Self {
            rates: RateStore::new(provider),
            history: ConversionHistory::new(),
        }
    }

    pub async fn load_rates(&mut self) -> Result<(), RateError> {
        self.rates.load().await
    }

    /// Converts against the current table and logs the result. Failed
    /// conversions leave the history as it was.
    pub fn convert(
        &mut self,
        request: &ConversionRequest,
    ) -> Result<ConversionRecord, ConversionError> {
        let record = conversion::convert(request, &self.rates.table())?;
        self.history.record(record.clone());
        Ok(record)
    }

    pub fn history(&self) -> &ConversionHistory {
        &self.history
    }

    pub fn rates(&self) -> Arc<RateTable> {
        self.rates.table()
    }

    pub fn state(&self) -> LoadState {
        self.rates.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.rates.subscribe()
    }
}
