//! Revenue tracker implementations.

use std::sync::Mutex;

use tracing::info;

use adlift_core::{RevenueRecord, RevenueTracker, TrackError};

// ============================================================================
// Log Tracker
// ============================================================================

/// Tracker that logs each record through `tracing`. The default sink for
/// demos and local runs.
#[derive(Debug, Default)]
pub struct LogRevenueTracker;

impl RevenueTracker for LogRevenueTracker {
    fn record(&self, record: &RevenueRecord) -> Result<(), TrackError> {
        info!(
            amount = record.amount,
            network = %record.network,
            unit = %record.unit_id,
            format = %record.format,
            "Ad revenue"
        );
        Ok(())
    }
}

// ============================================================================
// Recording Tracker
// ============================================================================

/// Tracker that stores every record in memory, for assertions.
#[derive(Debug, Default)]
pub struct RecordingTracker {
    records: Mutex<Vec<RevenueRecord>>,
}

impl RecordingTracker {
    /// Creates an empty recording tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records received so far, in order.
    pub fn records(&self) -> Vec<RevenueRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of records received.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// True if no record was received yet.
    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

impl RevenueTracker for RecordingTracker {
    fn record(&self, record: &RevenueRecord) -> Result<(), TrackError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// ============================================================================
// Failing Tracker
// ============================================================================

/// Tracker that rejects every record, for failure-propagation tests.
#[derive(Debug)]
pub struct FailingTracker {
    reason: String,
}

impl FailingTracker {
    /// Creates a tracker that rejects with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RevenueTracker for FailingTracker {
    fn record(&self, _record: &RevenueRecord) -> Result<(), TrackError> {
        Err(TrackError::Rejected(self.reason.clone()))
    }
}

// ============================================================================
// Tests
// ============================================================================
