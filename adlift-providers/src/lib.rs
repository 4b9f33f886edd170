// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # adlift Providers
//!
//! Provider implementations for adlift:
//!
//! - [`sim`] - A scripted simulation ad network for demos and tests
//! - [`tracking`] - Revenue tracker implementations
//! - [`registry`] - Network descriptors and platform test unit IDs

pub mod registry;
pub mod sim;
pub mod tracking;

pub use registry::{NetworkDescriptor, NetworkRegistry};
pub use sim::{ScriptedOutcome, SimCallLog, SimCreativeControls, SimProvider};
pub use tracking::{FailingTracker, LogRevenueTracker, RecordingTracker};
