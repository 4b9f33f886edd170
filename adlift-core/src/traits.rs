//! Trait definitions for adlift.
//!
//! This module defines the seams between the lifecycle core and its
//! external collaborators: the ad network provider, the creative handle
//! it returns, and the revenue tracker.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{LoadError, ProviderError, TrackError};
use crate::models::{AdNetwork, Color, CreativeEvent, NativeOptions, RevenueRecord};

// ============================================================================
// Template Style
// ============================================================================

/// Provider-facing styling for a native template render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStyle {
    /// Provider template identifier ("small", "medium").
    pub template_id: String,
    /// Template background color.
    pub background_color: Color,
}

// ============================================================================
// Placement
// ============================================================================

/// Where and how large a creative should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Provider-anchored placement from the unit's configured enums.
    Anchored {
        /// Anchored size.
        size: crate::models::AdSize,
        /// Anchored position.
        position: crate::models::AdPosition,
    },
    /// Explicit overlay coordinates, provider default size.
    Point {
        /// Device-independent x coordinate.
        x: i32,
        /// Device-independent y coordinate.
        y: i32,
    },
    /// Explicit overlay coordinates and size.
    Frame {
        /// Device-independent x coordinate.
        x: i32,
        /// Device-independent y coordinate.
        y: i32,
        /// Width in device-independent pixels.
        width: i32,
        /// Height in device-independent pixels.
        height: i32,
    },
}

// ============================================================================
// Load Request
// ============================================================================

/// A single asynchronous fill request issued to a provider.
///
/// The `events` sender is wired into the creative on a successful fill:
/// every paid/clicked/opened/closed occurrence is delivered through it
/// onto the requesting unit's event queue.
#[derive(Debug)]
pub struct LoadRequest {
    /// Network-assigned unit identifier.
    pub unit_id: String,
    /// Native-format request options.
    pub native: NativeOptions,
    /// Template styling for subsequent renders.
    pub style: TemplateStyle,
    /// Sink for creative events emitted after the fill.
    pub events: UnboundedSender<CreativeEvent>,
}

// ============================================================================
// Ad Provider
// ============================================================================

/// An ad network that fulfills load requests.
///
/// `load` is the only asynchronous operation in the system: it resolves to
/// a creative handle on fill or a [`LoadError`] on no-fill/failure. The
/// lifecycle controller never blocks on it directly; it awaits the result
/// on a spawned task and observes completion through its event queue.
#[async_trait]
pub trait AdProvider: Send + Sync {
    /// The network this provider talks to.
    fn network(&self) -> AdNetwork;

    /// Requests a fill for the given unit.
    async fn load(&self, request: LoadRequest) -> Result<Box<dyn LoadedAd>, LoadError>;
}

// ============================================================================
// Loaded Ad
// ============================================================================

/// Handle to a provider-held creative.
///
/// Owned exclusively by the lifecycle controller; at most one exists per
/// unit at any time. All calls are non-blocking requests to the provider;
/// on-screen state is owned by the provider, and failures propagate
/// uncaught to the caller.
pub trait LoadedAd: Send {
    /// Asks the provider to display the creative.
    fn show(&mut self) -> Result<(), ProviderError>;

    /// Asks the provider to hide the creative without destroying it.
    fn hide(&mut self) -> Result<(), ProviderError>;

    /// Asks the provider to tear the creative down.
    fn destroy(&mut self) -> Result<(), ProviderError>;

    /// Asks the provider to render the creative at the given placement.
    fn render(&mut self, style: &TemplateStyle, placement: Placement) -> Result<(), ProviderError>;
}

// ============================================================================
// Revenue Tracker
// ============================================================================

/// External sink for normalized paid-impression records.
pub trait RevenueTracker: Send + Sync {
    /// Records a paid impression. Called synchronously; errors propagate
    /// to the caller of the operation that observed the paid event.
    fn record(&self, record: &RevenueRecord) -> Result<(), TrackError>;
}
