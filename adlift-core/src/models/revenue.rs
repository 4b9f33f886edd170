//! Revenue record types.

use serde::{Deserialize, Serialize};

/// Divisor converting provider micro-units into currency major units.
const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// A normalized paid-impression record.
///
/// Immutable value handed to the revenue tracker. The amount is in major
/// currency units, derived from the provider's raw micro-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    /// Payout in major currency units.
    pub amount: f64,
    /// Display name of the network that paid.
    pub network: String,
    /// The unit that earned the impression.
    pub unit_id: String,
    /// Ad format tag, e.g. "NativeOverlayAd".
    pub format: String,
}

impl RevenueRecord {
    /// Builds a record from a raw micro-unit payout.
    pub fn from_micros(
        micros: i64,
        network: impl Into<String>,
        unit_id: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            amount: micros as f64 / MICROS_PER_UNIT,
            network: network.into(),
            unit_id: unit_id.into(),
            format: format.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
