//! Core error types for adlift.

use thiserror::Error;

// ============================================================================
// Core Error
// ============================================================================

/// Error type for configuration parsing and validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid unit configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Load Error
// ============================================================================

/// Error type for ad load requests.
///
/// A load failure is non-fatal: the lifecycle controller surfaces the
/// reason through its `FailedToLoad` observers and schedules a retry.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The network returned no ad for this request.
    #[error("No fill: {0}")]
    NoFill(String),

    /// Transport-level failure talking to the network.
    #[error("Network error: {0}")]
    Network(String),

    /// The request itself was malformed (bad unit id, bad options).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The network did not answer in time.
    #[error("Load timed out after {0} seconds")]
    Timeout(u64),
}

// ============================================================================
// Provider Error
// ============================================================================

/// Error type for calls into a held creative.
///
/// These are not caught by the lifecycle core; they propagate to the
/// caller of the operation that touched the creative.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected or failed the call.
    #[error("Provider call failed: {0}")]
    CallFailed(String),

    /// The creative was already torn down on the provider side.
    #[error("Creative already disposed")]
    Disposed,
}

// ============================================================================
// Track Error
// ============================================================================

/// Error type for revenue tracker operations.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The tracker rejected the record.
    #[error("Record rejected: {0}")]
    Rejected(String),

    /// The tracker backend is unavailable.
    #[error("Tracker unavailable: {0}")]
    Unavailable(String),
}
