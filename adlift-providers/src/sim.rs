//! Scripted simulation ad network.
//!
//! [`SimProvider`] answers load requests from a queue of scripted
//! outcomes, with configurable latency. Fills return a [`SimCreative`]
//! whose calls are visible through a shared [`SimCallLog`], and a
//! [`SimCreativeControls`] handle lets a driver emit paid/clicked/opened/
//! closed events into the requesting unit, exactly as a real network SDK
//! would.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use adlift_core::{
    AdNetwork, AdProvider, CreativeEvent, LoadError, LoadRequest, LoadedAd, NativeOptions,
    PaidValue, Placement, ProviderError, TemplateStyle,
};

// ============================================================================
// Scripted Outcome
// ============================================================================

/// One scripted answer to a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedOutcome {
    /// Return a creative.
    Fill,
    /// Report no fill for this request.
    NoFill,
    /// Fail with a network error message.
    Fail(String),
    /// Time the request out after the given number of seconds.
    Timeout(u64),
}

// ============================================================================
// Call Log
// ============================================================================

/// Record of every call a unit made into a [`SimCreative`].
#[derive(Default)]
pub struct SimCallLog {
    shows: AtomicUsize,
    hides: AtomicUsize,
    destroys: AtomicUsize,
    renders: Mutex<Vec<Placement>>,
    fail_next: Mutex<Option<String>>,
}

impl SimCallLog {
    /// Number of `show` calls.
    pub fn shows(&self) -> usize {
        self.shows.load(Ordering::SeqCst)
    }

    /// Number of `hide` calls.
    pub fn hides(&self) -> usize {
        self.hides.load(Ordering::SeqCst)
    }

    /// Number of `destroy` calls.
    pub fn destroys(&self) -> usize {
        self.destroys.load(Ordering::SeqCst)
    }

    /// Every placement the creative was rendered at, in order.
    pub fn renders(&self) -> Vec<Placement> {
        self.renders.lock().unwrap().clone()
    }
}

// ============================================================================
// Sim Creative
// ============================================================================

/// A creative held by the simulation network.
struct SimCreative {
    log: Arc<SimCallLog>,
    destroyed: bool,
    // Keeps the unit-side event channel open for the creative's lifetime.
    _events: UnboundedSender<CreativeEvent>,
}

impl SimCreative {
    fn guard(&self) -> Result<(), ProviderError> {
        if self.destroyed {
            return Err(ProviderError::Disposed);
        }
        if let Some(reason) = self.log.fail_next.lock().unwrap().take() {
            return Err(ProviderError::CallFailed(reason));
        }
        Ok(())
    }
}

impl LoadedAd for SimCreative {
    fn show(&mut self) -> Result<(), ProviderError> {
        self.guard()?;
        self.log.shows.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn hide(&mut self) -> Result<(), ProviderError> {
        self.guard()?;
        self.log.hides.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), ProviderError> {
        self.guard()?;
        self.destroyed = true;
        self.log.destroys.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn render(&mut self, _style: &TemplateStyle, placement: Placement) -> Result<(), ProviderError> {
        self.guard()?;
        self.log.renders.lock().unwrap().push(placement);
        Ok(())
    }
}

// ============================================================================
// Creative Controls
// ============================================================================

/// Driver-side handle to the most recent fill.
///
/// Lets a test or demo emit the events a live network would deliver, and
/// inspect the calls the unit made into the creative.
#[derive(Clone)]
pub struct SimCreativeControls {
    events: UnboundedSender<CreativeEvent>,
    log: Arc<SimCallLog>,
}

impl SimCreativeControls {
    /// The creative's call log.
    pub fn log(&self) -> &SimCallLog {
        &self.log
    }

    /// Makes the creative's next call fail with the given reason.
    pub fn fail_next_call(&self, reason: impl Into<String>) {
        *self.log.fail_next.lock().unwrap() = Some(reason.into());
    }

    /// Emits a paid impression.
    pub fn emit_paid(&self, micros: i64, currency: &str) {
        let _ = self.events.send(CreativeEvent::Paid(PaidValue::new(micros, currency)));
    }

    /// Emits a click.
    pub fn emit_clicked(&self) {
        let _ = self.events.send(CreativeEvent::Clicked);
    }

    /// Emits a full-screen open.
    pub fn emit_opened(&self) {
        let _ = self.events.send(CreativeEvent::Opened);
    }

    /// Emits a full-screen close.
    pub fn emit_closed(&self) {
        let _ = self.events.send(CreativeEvent::Closed);
    }
}

// ============================================================================
// Recorded Request
// ============================================================================

/// The request details of the most recent load, for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Unit id the load was issued for.
    pub unit_id: String,
    /// Template styling attached to the request.
    pub style: TemplateStyle,
    /// Native options attached to the request.
    pub native: NativeOptions,
}

// ============================================================================
// Sim Provider
// ============================================================================

/// Scripted ad network provider.
///
/// Outcomes are served from a queue; an empty queue keeps filling. Load
/// latency defaults to zero so tests stay fast.
pub struct SimProvider {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    latency: Duration,
    load_calls: AtomicUsize,
    last_controls: Mutex<Option<SimCreativeControls>>,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl SimProvider {
    /// Creates a provider that always fills immediately.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            latency: Duration::ZERO,
            load_calls: AtomicUsize::new(0),
            last_controls: Mutex::new(None),
            last_request: Mutex::new(None),
        }
    }

    /// Sets artificial load latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Appends an outcome to the script.
    pub fn push(&self, outcome: ScriptedOutcome) {
        self.script.lock().unwrap().push_back(outcome);
    }

    /// Replaces the script with the given outcomes.
    pub fn script(&self, outcomes: impl IntoIterator<Item = ScriptedOutcome>) {
        let mut script = self.script.lock().unwrap();
        script.clear();
        script.extend(outcomes);
    }

    /// Number of load requests received so far.
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Controls for the most recent fill, if any.
    pub fn controls(&self) -> Option<SimCreativeControls> {
        self.last_controls.lock().unwrap().clone()
    }

    /// The most recent load request's details, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> ScriptedOutcome {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScriptedOutcome::Fill)
    }
}

impl Default for SimProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdProvider for SimProvider {
    fn network(&self) -> AdNetwork {
        AdNetwork::Simulated
    }

    async fn load(&self, request: LoadRequest) -> Result<Box<dyn LoadedAd>, LoadError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(RecordedRequest {
            unit_id: request.unit_id.clone(),
            style: request.style.clone(),
            native: request.native,
        });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.next_outcome() {
            ScriptedOutcome::Fill => {
                debug!(unit = %request.unit_id, "Sim fill");
                let log = Arc::new(SimCallLog::default());
                let controls = SimCreativeControls {
                    events: request.events.clone(),
                    log: Arc::clone(&log),
                };
                *self.last_controls.lock().unwrap() = Some(controls);
                Ok(Box::new(SimCreative {
                    log,
                    destroyed: false,
                    _events: request.events,
                }))
            }
            ScriptedOutcome::NoFill => {
                debug!(unit = %request.unit_id, "Sim no fill");
                Err(LoadError::NoFill("no ad available".to_string()))
            }
            ScriptedOutcome::Fail(message) => {
                debug!(unit = %request.unit_id, %message, "Sim load failure");
                Err(LoadError::Network(message))
            }
            ScriptedOutcome::Timeout(secs) => {
                debug!(unit = %request.unit_id, secs, "Sim load timeout");
                Err(LoadError::Timeout(secs))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
