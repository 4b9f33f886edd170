//! The ad-unit lifecycle controller.
//!
//! [`NativeOverlayUnit`] owns the single creative slot of one ad unit and
//! drives it through `Unloaded -> Loading -> Ready -> Unloaded`, with a
//! parallel `Failed -> (delayed) -> Loading` retry path. Provider
//! completions, creative events, and retry expirations are all delivered
//! through one internal queue and processed only by [`NativeOverlayUnit::tick`]
//! on the owner's task, so the unit needs no internal locking.

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use adlift_core::{
    AdEventKind, AdFormat, AdProvider, AdUnitConfig, CreativeEvent, LoadError, LoadRequest,
    LoadedAd, Placement, RevenueRecord, RevenueTracker, TemplateStyle,
};

use crate::callbacks::CallbackRegistry;
use crate::error::UnitError;
use crate::geometry::{self, ElementSize, ScreenMetrics, ScreenPoint, SizeMode};
use crate::retry::{RetryHandle, RetryPolicy};
use crate::revenue::RevenueReporter;

// ============================================================================
// Lifecycle State
// ============================================================================

/// Where a unit currently stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No creative held, no request in flight.
    Unloaded,
    /// A load request is in flight.
    Loading,
    /// A creative is held and renderable.
    Ready,
    /// The last load failed; a retry is pending.
    Failed,
}

// ============================================================================
// Unit Options
// ============================================================================

/// Engine options passed explicitly at construction; there is no global
/// ads-disabled state.
#[derive(Debug, Clone, Copy)]
pub struct UnitOptions {
    /// Disable ads for this unit entirely (e.g. the user purchased ad
    /// removal). A disabled unit is inert: every operation is a no-op.
    pub ads_disabled: bool,
    /// Retry policy for failed loads.
    pub retry: RetryPolicy,
}

impl Default for UnitOptions {
    fn default() -> Self {
        Self {
            ads_disabled: false,
            retry: RetryPolicy::default(),
        }
    }
}

// ============================================================================
// Internal Events
// ============================================================================

/// Everything delivered onto the unit's single dispatch queue.
///
/// Each variant carries the generation it belongs to; events from a
/// superseded load or a destroyed slot are discarded on receipt.
enum UnitEvent {
    LoadFinished {
        generation: u64,
        result: Result<Box<dyn LoadedAd>, LoadError>,
    },
    RetryElapsed {
        generation: u64,
    },
    Creative {
        generation: u64,
        event: CreativeEvent,
    },
}

// ============================================================================
// Native Overlay Unit
// ============================================================================

/// Lifecycle controller for a single native overlay ad unit.
pub struct NativeOverlayUnit {
    config: AdUnitConfig,
    options: UnitOptions,
    provider: Arc<dyn AdProvider>,
    reporter: RevenueReporter,
    callbacks: CallbackRegistry,
    handle: Option<Box<dyn LoadedAd>>,
    state: LifecycleState,
    /// Validity token for async completions. Bumped by every `load()` and
    /// `destroy()`; a completion carrying an older value is stale.
    generation: u64,
    retry_task: Option<RetryHandle>,
    tx: UnboundedSender<UnitEvent>,
    rx: UnboundedReceiver<UnitEvent>,
    inert: bool,
    initialized: bool,
    forward_revenue: bool,
}

impl NativeOverlayUnit {
    /// Creates a unit around a provider and a revenue tracker.
    ///
    /// A unit whose id is empty, or whose options disable ads, is inert
    /// from the start: every lifecycle operation no-ops and `is_ready()`
    /// stays false forever.
    pub fn new(
        config: AdUnitConfig,
        options: UnitOptions,
        provider: Arc<dyn AdProvider>,
        tracker: Arc<dyn RevenueTracker>,
    ) -> Self {
        let inert = options.ads_disabled || config.is_empty_id();
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            options,
            provider,
            reporter: RevenueReporter::new(tracker),
            callbacks: CallbackRegistry::new(),
            handle: None,
            state: LifecycleState::Unloaded,
            generation: 0,
            retry_task: None,
            tx,
            rx,
            inert,
            initialized: false,
            forward_revenue: false,
        }
    }

    /// Initializes the unit, arming revenue forwarding for paid events.
    ///
    /// Idempotent; call once at startup. Inert units stay inert.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        if self.inert {
            debug!(unit = %self.config.id, "Unit is inert, skipping init");
            return;
        }
        self.forward_revenue = true;
        debug!(unit = %self.config.id, network = %self.provider.network(), "Unit initialized");
    }

    /// Returns the unit's configuration.
    pub fn config(&self) -> &AdUnitConfig {
        &self.config
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Returns true if this unit ignores all operations.
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Returns true iff a creative is currently held.
    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    /// Observer callback registry for this unit.
    pub fn callbacks(&mut self) -> &mut CallbackRegistry {
        &mut self.callbacks
    }

    // ------------------------------------------------------------------
    // Load path
    // ------------------------------------------------------------------

    /// Issues an asynchronous load request to the provider.
    ///
    /// Any creative already held is destroyed first, and any pending
    /// automatic retry is cancelled. Completion arrives on the event
    /// queue and is observed through [`tick`](Self::tick); there is no
    /// synchronous error return.
    pub fn load(&mut self) {
        if self.inert {
            return;
        }
        if let Some(mut creative) = self.handle.take() {
            // At most one creative per unit: replace only after teardown.
            if let Err(error) = creative.destroy() {
                warn!(unit = %self.config.id, %error, "Failed to destroy previous creative");
            }
        }
        self.cancel_retry();
        self.generation += 1;
        self.state = LifecycleState::Loading;

        let generation = self.generation;
        let (creative_tx, mut creative_rx) = mpsc::unbounded_channel();
        let request = LoadRequest {
            unit_id: self.config.id.clone(),
            native: self.config.native,
            style: self.style(),
            events: creative_tx,
        };

        debug!(unit = %self.config.id, generation, "Requesting load");

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.load(request).await;
            let _ = tx.send(UnitEvent::LoadFinished { generation, result });
        });

        // Forward creative events onto the unit queue, tagged with the
        // generation they belong to. The task ends when the creative (and
        // with it the provider's sender) is dropped.
        let tx = self.tx.clone();
        tokio::spawn(async move {
            while let Some(event) = creative_rx.recv().await {
                if tx.send(UnitEvent::Creative { generation, event }).is_err() {
                    break;
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Creative operations
    // ------------------------------------------------------------------

    /// Asks the provider to display the creative. No-op without a fill;
    /// the `Displayed` observers fire when the provider reports it open.
    pub fn show(&mut self) -> Result<(), UnitError> {
        if self.inert {
            return Ok(());
        }
        if let Some(creative) = self.handle.as_mut() {
            creative.show()?;
        }
        Ok(())
    }

    /// Asks the provider to hide the creative without destroying it. The
    /// creative stays held and the unit stays ready.
    pub fn hide(&mut self) -> Result<(), UnitError> {
        if self.inert {
            return Ok(());
        }
        if let Some(creative) = self.handle.as_mut() {
            creative.hide()?;
        }
        Ok(())
    }

    /// Tears down the held creative and returns the unit to `Unloaded`.
    ///
    /// Registered callbacks survive. Any in-flight load and any pending
    /// retry are invalidated: a completion arriving for the old slot is
    /// discarded, and a stale fill is destroyed rather than leaked.
    pub fn destroy(&mut self) -> Result<(), UnitError> {
        if self.inert {
            return Ok(());
        }
        self.cancel_retry();
        self.generation += 1;
        self.state = LifecycleState::Unloaded;
        if let Some(mut creative) = self.handle.take() {
            info!(unit = %self.config.id, "Destroying creative");
            creative.destroy()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Render surface
    // ------------------------------------------------------------------

    /// Renders at the unit's configured anchored size and position.
    pub fn render(&mut self) -> Result<(), UnitError> {
        let placement = Placement::Anchored {
            size: self.config.size,
            position: self.config.position,
        };
        self.render_placement(placement)
    }

    /// Renders at a UI element's position with the provider's default
    /// size; the element's own size is ignored.
    pub fn render_at(
        &mut self,
        position: ScreenPoint,
        metrics: ScreenMetrics,
    ) -> Result<(), UnitError> {
        let frame = geometry::overlay_frame(position, metrics, SizeMode::PositionOnly);
        self.render_placement(frame.into())
    }

    /// Renders at a UI element's position with an explicit overlay size.
    pub fn render_at_sized(
        &mut self,
        position: ScreenPoint,
        metrics: ScreenMetrics,
        width: i32,
        height: i32,
    ) -> Result<(), UnitError> {
        let frame = geometry::overlay_frame(position, metrics, SizeMode::Override { width, height });
        self.render_placement(frame.into())
    }

    /// Renders centered on a UI element, matching the element's size when
    /// `use_element_size` is set and falling back to position-only
    /// otherwise.
    pub fn render_matching(
        &mut self,
        position: ScreenPoint,
        element: ElementSize,
        metrics: ScreenMetrics,
        use_element_size: bool,
    ) -> Result<(), UnitError> {
        let mode = if use_element_size {
            SizeMode::Element(element)
        } else {
            SizeMode::PositionOnly
        };
        let frame = geometry::overlay_frame(position, metrics, mode);
        self.render_placement(frame.into())
    }

    fn render_placement(&mut self, placement: Placement) -> Result<(), UnitError> {
        if self.inert {
            return Ok(());
        }
        let style = self.style();
        if let Some(creative) = self.handle.as_mut() {
            debug!(unit = %self.config.id, ?placement, "Rendering creative");
            creative.render(&style, placement)?;
        }
        Ok(())
    }

    fn style(&self) -> TemplateStyle {
        TemplateStyle {
            template_id: self.config.template.template_id().to_string(),
            background_color: self.config.background_color,
        }
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Awaits and processes the next queued event, returning the event
    /// kind surfaced to observers, if any.
    ///
    /// This is the unit's single dispatch point: provider completions,
    /// creative events, and retry expirations are only ever applied here,
    /// on the caller's task. A propagated tracker or provider error does
    /// not disturb retry scheduling, which runs on its own timer task.
    pub async fn tick(&mut self) -> Result<Option<AdEventKind>, UnitError> {
        match self.rx.recv().await {
            Some(event) => self.handle_event(event),
            // The unit holds a sender, so the queue cannot close; guard
            // anyway for completeness.
            None => Ok(None),
        }
    }

    fn handle_event(&mut self, event: UnitEvent) -> Result<Option<AdEventKind>, UnitError> {
        match event {
            UnitEvent::LoadFinished { generation, result } => {
                if generation != self.generation {
                    // A newer load or a destroy superseded this request.
                    if let Ok(mut creative) = result {
                        debug!(unit = %self.config.id, generation, "Discarding stale fill");
                        let _ = creative.destroy();
                    }
                    return Ok(None);
                }
                match result {
                    Ok(creative) => self.on_loaded(creative),
                    Err(error) => self.on_load_failed(&error),
                }
            }
            UnitEvent::RetryElapsed { generation } => {
                if generation != self.generation {
                    return Ok(None);
                }
                self.retry_task = None;
                debug!(unit = %self.config.id, "Retry delay elapsed, reloading");
                self.load();
                Ok(None)
            }
            UnitEvent::Creative { generation, event } => {
                if generation != self.generation {
                    return Ok(None);
                }
                self.on_creative_event(event)
            }
        }
    }

    fn on_loaded(
        &mut self,
        creative: Box<dyn LoadedAd>,
    ) -> Result<Option<AdEventKind>, UnitError> {
        self.handle = Some(creative);
        self.state = LifecycleState::Ready;
        info!(unit = %self.config.id, network = %self.provider.network(), "Ad loaded");
        self.callbacks.loaded.fire(&());
        Ok(Some(AdEventKind::Loaded))
    }

    fn on_load_failed(&mut self, error: &LoadError) -> Result<Option<AdEventKind>, UnitError> {
        self.state = LifecycleState::Failed;
        let reason = error.to_string();
        warn!(unit = %self.config.id, %reason, "Ad failed to load");
        self.callbacks.failed.fire(&reason);
        self.schedule_retry();
        Ok(Some(AdEventKind::FailedToLoad))
    }

    fn on_creative_event(
        &mut self,
        event: CreativeEvent,
    ) -> Result<Option<AdEventKind>, UnitError> {
        match event {
            CreativeEvent::Opened => {
                debug!(unit = %self.config.id, "Creative displayed");
                self.callbacks.displayed.fire(&());
                Ok(Some(AdEventKind::Displayed))
            }
            CreativeEvent::Clicked => {
                debug!(unit = %self.config.id, "Creative clicked");
                self.callbacks.clicked.fire(&());
                Ok(Some(AdEventKind::Clicked))
            }
            CreativeEvent::Closed => {
                debug!(unit = %self.config.id, "Creative closed");
                self.callbacks.closed.fire(&());
                Ok(Some(AdEventKind::Closed))
            }
            CreativeEvent::Paid(value) => {
                let record = RevenueRecord::from_micros(
                    value.micros,
                    self.provider.network().display_name(),
                    &self.config.id,
                    AdFormat::NativeOverlay.display_name(),
                );
                self.callbacks.paid.fire(&record);
                if self.forward_revenue {
                    self.reporter.forward(&record)?;
                }
                Ok(Some(AdEventKind::Paid))
            }
        }
    }

    // ------------------------------------------------------------------
    // Retry timer
    // ------------------------------------------------------------------

    fn schedule_retry(&mut self) {
        self.cancel_retry();
        let generation = self.generation;
        let delay = self.options.retry.delay();
        let tx = self.tx.clone();
        debug!(unit = %self.config.id, ?delay, "Scheduling retry");
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(UnitEvent::RetryElapsed { generation });
        });
        self.retry_task = Some(RetryHandle::new(task));
    }

    fn cancel_retry(&mut self) {
        if let Some(pending) = self.retry_task.take() {
            debug!(unit = %self.config.id, "Cancelling pending retry");
            pending.cancel();
        }
    }
}
