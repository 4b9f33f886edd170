//! Domain models for adlift.
//!
//! This module contains the core data structures describing ad units,
//! networks, lifecycle events, and revenue records.
//!
//! ## Submodules
//!
//! - [`unit`] - Unit configuration (`AdUnitConfig`, placement/style enums)
//! - [`network`] - Network types (`AdNetwork`, `AdFormat`)
//! - [`events`] - Event types (`AdEventKind`, `CreativeEvent`, `PaidValue`)
//! - [`revenue`] - Revenue records (`RevenueRecord`)

mod events;
mod network;
mod revenue;
mod unit;

// Re-export everything at the models level
pub use events::{AdEventKind, CreativeEvent, PaidValue};
pub use network::{AdFormat, AdNetwork};
pub use revenue::RevenueRecord;
pub use unit::{
    AdPosition, AdSize, AdUnitConfig, ChoicesPlacement, Color, MediaAspectRatio, NativeOptions,
    Platform, TemplateVariant, VideoOptions,
};
