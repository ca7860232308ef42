//! Holds the most recently fetched rate table and tracks its load lifecycle.

use crate::core::currency::{CurrencyCode, RateProvider, RateTable};
use crate::core::error::{ConversionError, RateError};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Lifecycle of the rate table within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(RateError),
}

impl Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadState::Idle => write!(f, "idle"),
            LoadState::Loading => write!(f, "loading"),
            LoadState::Ready => write!(f, "ready"),
            LoadState::Failed(e) => write!(f, "failed ({e})"),
        }
    }
}

pub struct RateStore {
    provider: Box<dyn RateProvider>,
    table: Arc<RateTable>,
    state: watch::Sender<LoadState>,
}

impl RateStore {
    pub fn new(provider: Box<dyn RateProvider>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            provider,
            table: Arc::new(RateTable::default()),
            state,
        }
    }

    /// Fetches a fresh table and swaps it in whole.
    ///
    /// On failure the previous table stays in place and the state becomes
    /// `Failed`. Dropping the returned future mid-flight leaves the table
    /// untouched as well.
    pub async fn load(&mut self) -> Result<(), RateError> {
        self.set_state(LoadState::Loading);

        match self.provider.fetch_rates().await {
            Ok(table) => {
                info!(
                    currencies = table.len(),
                    date = ?table.date(),
                    "Loaded exchange rates"
                );
                self.table = Arc::new(table);
                self.set_state(LoadState::Ready);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Exchange rate load failed, keeping previous rates");
                self.set_state(LoadState::Failed(e.clone()));
                Err(e)
            }
        }
    }

    pub fn get_rate(&self, currency: &CurrencyCode) -> Result<f64, ConversionError> {
        self.table.rate(currency)
    }

    /// Snapshot of the current table. Later loads do not affect it.
    pub fn table(&self) -> Arc<RateTable> {
        Arc::clone(&self.table)
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    fn set_state(&self, next: LoadState) {
        let to = next.to_string();
        let previous = self.state.send_replace(next);
        debug!(from = %previous, to = %to, "Rate store state change");
    }
}
