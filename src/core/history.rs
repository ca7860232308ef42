use crate::core::conversion::ConversionRecord;
use std::collections::VecDeque;

/// Session log of successful conversions, most recent first.
#[derive(Debug, Default, Clone)]
pub struct ConversionHistory {
    entries: VecDeque<ConversionRecord>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ConversionRecord) {
        self.entries.push_front(entry);
    }

    /// All records, newest first.
    pub fn list(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ConversionRecord> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
