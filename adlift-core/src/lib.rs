// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # adlift Core
//!
//! Core types, models, and traits for the adlift ad-unit lifecycle toolkit.
//!
//! This crate provides the foundational abstractions used across all other
//! adlift crates, including:
//!
//! - Domain models (unit configuration, networks, events, revenue records)
//! - Error types
//! - Trait definitions for ad network providers and revenue trackers
//!
//! ## Key Types
//!
//! ### Configuration Types
//! - [`AdUnitConfig`] - Everything a unit needs to request a fill
//! - [`AdNetwork`] - Enum of supported ad networks
//! - [`AdSize`] / [`AdPosition`] - Anchored placement enums
//! - [`NativeOptions`] - Native-format request options
//!
//! ### Event Types
//! - [`AdEventKind`] - Observer-facing lifecycle event taxonomy
//! - [`CreativeEvent`] - Events emitted by a held creative after a fill
//! - [`PaidValue`] - Raw micro-currency payout from the provider
//!
//! ### Revenue
//! - [`RevenueRecord`] - Normalized paid-impression record
//!
//! ### Collaborator Seams
//! - [`AdProvider`] - Asynchronous ad network (load requests)
//! - [`LoadedAd`] - Handle to a provider-held creative
//! - [`RevenueTracker`] - Sink for normalized revenue records

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::{CoreError, LoadError, ProviderError, TrackError};

// Re-export all model types
pub use models::{
    // Configuration types
    AdPosition,
    AdSize,
    AdUnitConfig,
    ChoicesPlacement,
    Color,
    MediaAspectRatio,
    NativeOptions,
    Platform,
    TemplateVariant,
    VideoOptions,
    // Network types
    AdFormat,
    AdNetwork,
    // Event types
    AdEventKind,
    CreativeEvent,
    PaidValue,
    // Revenue
    RevenueRecord,
};

// Re-export traits and request types
pub use traits::{AdProvider, LoadRequest, LoadedAd, Placement, RevenueTracker, TemplateStyle};
