//! Revenue reporter: normalizes paid impressions and forwards them to the
//! revenue tracker.

use std::sync::Arc;
use tracing::debug;

use adlift_core::{RevenueRecord, RevenueTracker, TrackError};

/// Forwards paid-impression events into a [`RevenueTracker`].
///
/// Normalization is the only logic here: raw micro-unit payouts become
/// major currency units. Tracker failures are not caught; they propagate
/// to whoever observed the paid event.
pub struct RevenueReporter {
    tracker: Arc<dyn RevenueTracker>,
}

impl RevenueReporter {
    /// Creates a reporter forwarding into the given tracker.
    pub fn new(tracker: Arc<dyn RevenueTracker>) -> Self {
        Self { tracker }
    }

    /// Normalizes a raw payout and records it, returning the record.
    pub fn report(
        &self,
        raw_micros: i64,
        network: &str,
        unit_id: &str,
        format: &str,
    ) -> Result<RevenueRecord, TrackError> {
        let record = RevenueRecord::from_micros(raw_micros, network, unit_id, format);
        self.forward(&record)?;
        Ok(record)
    }

    /// Records an already-normalized revenue record.
    pub fn forward(&self, record: &RevenueRecord) -> Result<(), TrackError> {
        debug!(
            amount = record.amount,
            network = %record.network,
            unit = %record.unit_id,
            format = %record.format,
            "Forwarding paid impression"
        );
        self.tracker.record(record)
    }
}

// ============================================================================
// Tests
// ============================================================================
