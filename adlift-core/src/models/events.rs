//! Lifecycle and creative event types.
//!
//! Two event vocabularies meet here:
//! - [`CreativeEvent`] - what a provider-held creative emits after a fill
//! - [`AdEventKind`] - what the lifecycle controller surfaces to observers

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Paid Value
// ============================================================================

/// Raw payout reported by the provider for a paid impression.
///
/// Networks report payouts in micro-units of the account currency;
/// division by 1,000,000 yields major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidValue {
    /// Payout in micro-units (1/1,000,000 of the currency's major unit).
    pub micros: i64,
    /// ISO currency code, e.g. "USD".
    pub currency: String,
}

impl PaidValue {
    /// Creates a paid value.
    pub fn new(micros: i64, currency: impl Into<String>) -> Self {
        Self {
            micros,
            currency: currency.into(),
        }
    }
}

// ============================================================================
// Creative Events
// ============================================================================

/// Events emitted by a held creative while it is live.
///
/// The provider delivers these asynchronously on the unit's event queue;
/// they never arrive re-entrantly inside a lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreativeEvent {
    /// The impression was paid.
    Paid(PaidValue),
    /// The user clicked the creative.
    Clicked,
    /// The creative opened full-screen content.
    Opened,
    /// Full-screen content was closed.
    Closed,
}

// ============================================================================
// Observer Event Kinds
// ============================================================================

/// Observer-facing lifecycle event taxonomy.
///
/// Each kind carries both an optional one-shot callback (fired once, then
/// cleared) and a persistent subscription list on the unit's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdEventKind {
    /// A load request completed with a fill.
    Loaded,
    /// A load request failed; a retry is scheduled.
    FailedToLoad,
    /// The creative was displayed (opened full-screen content).
    Displayed,
    /// The creative was clicked.
    Clicked,
    /// Full-screen content was closed.
    Closed,
    /// The impression was paid.
    Paid,
}

impl AdEventKind {
    /// Returns the display name for this event kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loaded => "Loaded",
            Self::FailedToLoad => "FailedToLoad",
            Self::Displayed => "Displayed",
            Self::Clicked => "Clicked",
            Self::Closed => "Closed",
            Self::Paid => "Paid",
        }
    }
}

impl fmt::Display for AdEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display() {
        assert_eq!(AdEventKind::FailedToLoad.display_name(), "FailedToLoad");
        assert_eq!(AdEventKind::Paid.to_string(), "Paid");
    }

    #[test]
    fn test_paid_value() {
        let value = PaidValue::new(2_500_000, "USD");
        assert_eq!(value.micros, 2_500_000);
        assert_eq!(value.currency, "USD");
    }
}
