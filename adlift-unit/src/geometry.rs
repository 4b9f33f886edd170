//! Overlay geometry adapter.
//!
//! Converts a UI element's screen position (and optionally a size) into
//! the device-independent coordinates a provider expects for a native
//! overlay. Pure functions; no provider state is touched here.
//!
//! Provider overlay coordinates are density-independent pixels with the
//! origin at the top-left, while host UI positions arrive in raw screen
//! pixels with a bottom-left origin, hence the `height - y` flip and the
//! division by the DPI scale.

use adlift_core::Placement;

/// Baseline screen density; `dpi / 160` is the overlay scale factor.
const BASELINE_DPI: f32 = 160.0;

// ============================================================================
// Input Types
// ============================================================================

/// A position in raw screen pixels, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal position in screen pixels.
    pub x: f32,
    /// Vertical position in screen pixels, measured from the bottom.
    pub y: f32,
}

/// A UI element's size in raw screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSize {
    /// Width in screen pixels.
    pub width: f32,
    /// Height in screen pixels.
    pub height: f32,
}

/// Screen parameters needed for the conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    /// Screen height in raw pixels.
    pub height: f32,
    /// Screen density in dots per inch.
    pub dpi: f32,
}

impl ScreenMetrics {
    /// Returns the density scale factor (`dpi / 160`).
    pub fn scale(&self) -> f32 {
        self.dpi / BASELINE_DPI
    }
}

/// How the overlay's size is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeMode {
    /// Position only; the provider keeps its default size and the element
    /// center is not offset.
    PositionOnly,
    /// Match the UI element's own size; the position is offset by half of
    /// it so the overlay is centered on the element.
    Element(ElementSize),
    /// Explicit size in device-independent pixels; the position is offset
    /// by half the override.
    Override {
        /// Overlay width.
        width: i32,
        /// Overlay height.
        height: i32,
    },
}

// ============================================================================
// Overlay Frame
// ============================================================================

/// Result of the conversion: device-independent overlay coordinates, plus
/// the overlay size when one was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFrame {
    /// Overlay x coordinate.
    pub x: i32,
    /// Overlay y coordinate.
    pub y: i32,
    /// Overlay size `(width, height)`, if size matching was requested.
    pub size: Option<(i32, i32)>,
}

impl From<OverlayFrame> for Placement {
    fn from(frame: OverlayFrame) -> Self {
        match frame.size {
            Some((width, height)) => Placement::Frame {
                x: frame.x,
                y: frame.y,
                width,
                height,
            },
            None => Placement::Point {
                x: frame.x,
                y: frame.y,
            },
        }
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Computes the overlay frame for a UI element.
///
/// All call shapes reduce to the same formula; only the effective size
/// differs per [`SizeMode`]. Casting truncates toward zero, identically in
/// every shape.
pub fn overlay_frame(position: ScreenPoint, metrics: ScreenMetrics, mode: SizeMode) -> OverlayFrame {
    let scale = metrics.scale();
    let (effective_width, effective_height, size) = match mode {
        SizeMode::PositionOnly => (0.0, 0.0, None),
        SizeMode::Element(element) => (
            element.width,
            element.height,
            Some((element.width as i32, element.height as i32)),
        ),
        SizeMode::Override { width, height } => {
            (width as f32, height as f32, Some((width, height)))
        }
    };

    let x = ((position.x - effective_width / 2.0) / scale) as i32;
    let y = ((metrics.height - position.y - effective_height / 2.0) / scale) as i32;

    OverlayFrame { x, y, size }
}

// ============================================================================
// Tests
// ============================================================================
