//! Network-related types.
//!
//! This module contains types identifying ad networks and ad formats:
//! - [`AdNetwork`] - Enum of supported networks
//! - [`AdFormat`] - The format tag attached to revenue records

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Ad Network
// ============================================================================

/// Supported ad network kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdNetwork {
    /// Google AdMob
    Admob,
    /// AppLovin MAX
    AppLovin,
    /// Unity LevelPlay (ironSource)
    IronSource,
    /// Built-in scripted network for demos and tests
    Simulated,
}

impl AdNetwork {
    /// Returns the display name for this network.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admob => "AdMob",
            Self::AppLovin => "AppLovin",
            Self::IronSource => "ironSource",
            Self::Simulated => "Simulated",
        }
    }

    /// Returns all known network kinds.
    pub fn all() -> &'static [AdNetwork] {
        &[
            Self::Admob,
            Self::AppLovin,
            Self::IronSource,
            Self::Simulated,
        ]
    }

    /// Returns the CLI name for this network (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Admob => "admob",
            Self::AppLovin => "applovin",
            Self::IronSource => "ironsource",
            Self::Simulated => "sim",
        }
    }
}

impl fmt::Display for AdNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Ad Format
// ============================================================================

/// The format of an ad unit, as tagged on revenue records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdFormat {
    /// Native overlay rendered by the provider over host UI.
    NativeOverlay,
    /// Classic banner.
    Banner,
    /// Full-screen interstitial.
    Interstitial,
    /// Rewarded video.
    Rewarded,
}

impl AdFormat {
    /// Returns the display name for this format.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NativeOverlay => "NativeOverlayAd",
            Self::Banner => "BannerAd",
            Self::Interstitial => "InterstitialAd",
            Self::Rewarded => "RewardedAd",
        }
    }
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Tests
// ============================================================================
