//! Retry policy for failed ad loads.

use std::time::Duration;
use tokio::task::JoinHandle;

/// Default delay between a load failure and the automatic reload.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

// ============================================================================
// Retry Policy
// ============================================================================

/// Policy for retrying failed ad loads.
///
/// Retries are unbounded and fire at a fixed interval: no backoff growth,
/// no maximum attempt count. Ad networks fill intermittently, so a unit
/// keeps asking until it gets a fill or is destroyed. On a permanently
/// no-fill unit this keeps the radio busy every interval; callers that
/// care can lengthen the delay, the engine never escalates on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with a fixed delay between attempts.
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the delay before the next attempt.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_RETRY_DELAY)
    }
}

// ============================================================================
// Retry Handle
// ============================================================================

/// Handle to a pending retry timer.
///
/// At most one exists per unit; scheduling a new retry must cancel the
/// outstanding one first so reloads never overlap. Dropping the handle
/// aborts the timer task.
pub struct RetryHandle {
    task: JoinHandle<()>,
}

impl RetryHandle {
    /// Wraps a spawned timer task.
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Cancels the pending retry.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for RetryHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ============================================================================
// Tests
// ============================================================================
