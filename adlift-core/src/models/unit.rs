//! Unit configuration types.
//!
//! This module contains everything an ad unit needs to describe a fill
//! request and an anchored placement:
//! - [`AdUnitConfig`] - The full per-unit configuration
//! - [`AdSize`] / [`AdPosition`] - Anchored placement enums
//! - [`TemplateVariant`] / [`Color`] - Native template styling
//! - [`NativeOptions`] - Native-format request options
//! - [`Platform`] - Host platform, used for test unit-ID selection

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Placement Enums
// ============================================================================

/// Standard anchored ad sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdSize {
    /// 320x50 banner.
    Banner,
    /// 300x250 medium rectangle.
    MediumRectangle,
    /// 468x60 IAB full banner.
    IabBanner,
    /// 728x90 leaderboard.
    Leaderboard,
}

impl AdSize {
    /// Returns the pixel dimensions `(width, height)` of this size.
    pub fn dimensions(&self) -> (i32, i32) {
        match self {
            Self::Banner => (320, 50),
            Self::MediumRectangle => (300, 250),
            Self::IabBanner => (468, 60),
            Self::Leaderboard => (728, 90),
        }
    }
}

/// Anchored screen positions for a provider-placed overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdPosition {
    /// Top center.
    Top,
    /// Bottom center.
    Bottom,
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
    /// Screen center.
    Center,
}

// ============================================================================
// Native Template Styling
// ============================================================================

/// Native template variants offered by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    /// Compact template.
    Small,
    /// Full-height template with media view.
    Medium,
}

impl TemplateVariant {
    /// Returns the provider-facing template identifier.
    pub fn template_id(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }
}

/// RGBA color used for template backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Creates an opaque color from RGB channels.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// ============================================================================
// Native Request Options
// ============================================================================

/// Placement of the ad-choices icon inside a native creative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChoicesPlacement {
    /// Top right corner (network default).
    #[default]
    TopRight,
    /// Top left corner.
    TopLeft,
    /// Bottom right corner.
    BottomRight,
    /// Bottom left corner.
    BottomLeft,
}

/// Preferred aspect ratio for native media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaAspectRatio {
    /// No preference.
    #[default]
    Any,
    /// Landscape media.
    Landscape,
    /// Portrait media.
    Portrait,
    /// Square media.
    Square,
}

/// Video playback options for native video creatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoOptions {
    /// Start video playback muted.
    pub start_muted: bool,
    /// Allow click-to-expand on video content.
    pub click_to_expand: bool,
    /// Render custom playback controls instead of the network's.
    pub custom_controls: bool,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            start_muted: true,
            click_to_expand: false,
            custom_controls: false,
        }
    }
}

/// Options attached to a native-format load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NativeOptions {
    /// Ad-choices icon placement.
    #[serde(default)]
    pub choices_placement: ChoicesPlacement,
    /// Preferred media aspect ratio.
    #[serde(default)]
    pub media_aspect_ratio: MediaAspectRatio,
    /// Video playback options.
    #[serde(default)]
    pub video: VideoOptions,
}

// ============================================================================
// Platform
// ============================================================================

/// Host platform, used to pick the right sample unit ID in test mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android devices.
    Android,
    /// iOS devices.
    Ios,
}

// ============================================================================
// Unit Configuration
// ============================================================================

/// Full configuration for a single ad unit.
///
/// Constructed once at configuration time and handed to the lifecycle
/// controller. A unit with an empty `id` is inert: every lifecycle
/// operation on it is a silent no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdUnitConfig {
    /// Network-assigned unit identifier. Required for any operation.
    pub id: String,
    /// Substitute the platform sample unit ID at configuration time.
    #[serde(default)]
    pub test_mode: bool,
    /// Native template variant.
    #[serde(default = "default_template")]
    pub template: TemplateVariant,
    /// Template background color.
    #[serde(default)]
    pub background_color: Color,
    /// Anchored size used by the default render path.
    #[serde(default = "default_size")]
    pub size: AdSize,
    /// Anchored position used by the default render path.
    #[serde(default = "default_position")]
    pub position: AdPosition,
    /// Native-format request options.
    #[serde(default)]
    pub native: NativeOptions,
}

fn default_template() -> TemplateVariant {
    TemplateVariant::Medium
}

fn default_size() -> AdSize {
    AdSize::MediumRectangle
}

fn default_position() -> AdPosition {
    AdPosition::Bottom
}

impl AdUnitConfig {
    /// Creates a configuration with defaults for the given unit ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            test_mode: false,
            template: default_template(),
            background_color: Color::WHITE,
            size: default_size(),
            position: default_position(),
            native: NativeOptions::default(),
        }
    }

    /// Parses and validates a configuration from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// A blank id is rejected here: an empty-id config constructed in code
    /// makes an inert unit on purpose, but coming from a config file it is
    /// a mistake.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty_id() {
            return Err(CoreError::InvalidConfig(
                "unit id must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if this unit has no usable identity.
    pub fn is_empty_id(&self) -> bool {
        self.id.trim().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
