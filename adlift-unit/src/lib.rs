// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # adlift Unit
//!
//! The ad-unit lifecycle engine: everything between "give me an ad" and
//! "the ad paid out".
//!
//! [`NativeOverlayUnit`] owns the single creative slot of one unit,
//! requests fills from an [`AdProvider`](adlift_core::AdProvider), fans
//! lifecycle events out to one-shot and persistent observers, forwards
//! paid impressions into a revenue tracker, retries failed loads on a
//! fixed timer, and positions the creative relative to host UI through
//! the [`geometry`] adapter.
//!
//! ## Modules
//!
//! - [`controller`] - The lifecycle state machine
//! - [`callbacks`] - One-shot + persistent observer registry
//! - [`retry`] - Fixed-delay retry policy and timer handle
//! - [`geometry`] - Overlay coordinate/size computation
//! - [`revenue`] - Paid-impression normalization and forwarding

pub mod callbacks;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod retry;
pub mod revenue;

pub use callbacks::{CallbackRegistry, CallbackSet, SubscriptionId};
pub use controller::{LifecycleState, NativeOverlayUnit, UnitOptions};
pub use error::UnitError;
pub use geometry::{overlay_frame, ElementSize, OverlayFrame, ScreenMetrics, ScreenPoint, SizeMode};
pub use retry::{RetryHandle, RetryPolicy, DEFAULT_RETRY_DELAY};
pub use revenue::RevenueReporter;
