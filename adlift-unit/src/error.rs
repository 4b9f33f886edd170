//! Lifecycle engine error types.

use thiserror::Error;

use adlift_core::{ProviderError, TrackError};

/// Error type for ad-unit lifecycle operations.
///
/// Load failures never appear here: they are non-fatal, surface through
/// the `FailedToLoad` observers, and schedule their own retry. What does
/// appear are collaborator call failures the engine deliberately does not
/// swallow.
#[derive(Debug, Error)]
pub enum UnitError {
    /// A call into the provider-held creative failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The revenue tracker rejected a record.
    #[error("Tracking error: {0}")]
    Track(#[from] TrackError),
}
