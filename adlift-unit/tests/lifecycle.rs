//! End-to-end lifecycle tests against the simulation provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use adlift_core::{AdEventKind, AdPosition, AdSize, AdUnitConfig, Placement, RevenueTracker};
use adlift_providers::{FailingTracker, RecordingTracker, ScriptedOutcome, SimProvider};
use adlift_unit::{
    ElementSize, LifecycleState, NativeOverlayUnit, ScreenMetrics, ScreenPoint, UnitError,
    UnitOptions,
};

fn unit_with(
    config: AdUnitConfig,
    options: UnitOptions,
    provider: Arc<SimProvider>,
    tracker: Arc<dyn RevenueTracker>,
) -> NativeOverlayUnit {
    NativeOverlayUnit::new(config, options, provider, tracker)
}

fn ready_unit(provider: Arc<SimProvider>) -> NativeOverlayUnit {
    unit_with(
        AdUnitConfig::new("unit-1"),
        UnitOptions::default(),
        provider,
        Arc::new(RecordingTracker::new()),
    )
}

// ============================================================================
// Inert Units
// ============================================================================

#[tokio::test]
async fn test_empty_id_unit_is_inert() {
    let provider = Arc::new(SimProvider::new());
    let mut empty = unit_with(
        AdUnitConfig::new(""),
        UnitOptions::default(),
        Arc::clone(&provider),
        Arc::new(RecordingTracker::new()),
    );

    empty.init();
    empty.load();
    assert!(empty.show().is_ok());
    assert!(empty.hide().is_ok());
    assert!(empty.destroy().is_ok());
    assert!(empty.render().is_ok());

    assert!(empty.is_inert());
    assert!(!empty.is_ready());
    assert_eq!(empty.state(), LifecycleState::Unloaded);
    assert_eq!(provider.load_calls(), 0);
}

#[tokio::test]
async fn test_ads_disabled_unit_is_inert() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = unit_with(
        AdUnitConfig::new("unit-1"),
        UnitOptions {
            ads_disabled: true,
            ..UnitOptions::default()
        },
        Arc::clone(&provider),
        Arc::new(RecordingTracker::new()),
    );

    unit.init();
    unit.load();

    assert!(unit.is_inert());
    assert!(!unit.is_ready());
    assert_eq!(provider.load_calls(), 0);
}

// ============================================================================
// Load & Ready
// ============================================================================

#[tokio::test]
async fn test_successful_load_makes_unit_ready() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = ready_unit(Arc::clone(&provider));

    unit.init();
    assert!(!unit.is_ready());
    unit.load();
    assert_eq!(unit.state(), LifecycleState::Loading);

    let event = unit.tick().await.unwrap();
    assert_eq!(event, Some(AdEventKind::Loaded));
    assert!(unit.is_ready());
    assert_eq!(unit.state(), LifecycleState::Ready);

    unit.destroy().unwrap();
    assert!(!unit.is_ready());
    assert_eq!(unit.state(), LifecycleState::Unloaded);
}

#[tokio::test]
async fn test_load_passes_configured_options() {
    let provider = Arc::new(SimProvider::new());
    let mut config = AdUnitConfig::new("unit-42");
    config.template = adlift_core::TemplateVariant::Small;
    let mut unit = unit_with(
        config,
        UnitOptions::default(),
        Arc::clone(&provider),
        Arc::new(RecordingTracker::new()),
    );

    unit.init();
    unit.load();
    unit.tick().await.unwrap();

    let request = provider.last_request().unwrap();
    assert_eq!(request.unit_id, "unit-42");
    assert_eq!(request.style.template_id, "small");
}

#[tokio::test]
async fn test_reload_destroys_previous_creative_first() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = ready_unit(Arc::clone(&provider));

    unit.init();
    unit.load();
    unit.tick().await.unwrap();
    let first = provider.controls().unwrap();
    assert_eq!(first.log().destroys(), 0);

    // Replacement load: the old handle is torn down before the request.
    unit.load();
    assert_eq!(first.log().destroys(), 1);
    assert!(!unit.is_ready());

    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Loaded));
    assert!(unit.is_ready());
    assert_eq!(provider.load_calls(), 2);
}

// ============================================================================
// Failure & Retry
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_failure_fires_observers_and_schedules_one_retry() {
    let provider = Arc::new(SimProvider::new());
    provider.script([ScriptedOutcome::NoFill, ScriptedOutcome::Fill]);
    let mut unit = ready_unit(Arc::clone(&provider));

    let once_hits = Arc::new(AtomicUsize::new(0));
    let persistent_hits = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&once_hits);
    unit.callbacks().failed.set_once(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let c = Arc::clone(&persistent_hits);
    unit.callbacks().failed.subscribe(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    unit.init();
    unit.load();

    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::FailedToLoad));
    assert_eq!(unit.state(), LifecycleState::Failed);
    assert_eq!(once_hits.load(Ordering::SeqCst), 1);
    assert_eq!(persistent_hits.load(Ordering::SeqCst), 1);

    // The retry timer elapses (paused clock auto-advances) and reloads.
    assert_eq!(unit.tick().await.unwrap(), None);
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Loaded));
    assert_eq!(provider.load_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_one_shot_not_reinvoked_on_second_failure() {
    let provider = Arc::new(SimProvider::new());
    provider.script([
        ScriptedOutcome::NoFill,
        ScriptedOutcome::Fail("connection reset".to_string()),
        ScriptedOutcome::Fill,
    ]);
    let mut unit = ready_unit(Arc::clone(&provider));

    let once_hits = Arc::new(AtomicUsize::new(0));
    let persistent_hits = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&once_hits);
    unit.callbacks().failed.set_once(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let c = Arc::clone(&persistent_hits);
    unit.callbacks().failed.subscribe(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    unit.init();
    unit.load();

    // Two failures, each followed by an automatic reload.
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::FailedToLoad));
    assert_eq!(unit.tick().await.unwrap(), None);
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::FailedToLoad));
    assert_eq!(unit.tick().await.unwrap(), None);
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Loaded));

    assert_eq!(once_hits.load(Ordering::SeqCst), 1);
    assert_eq!(persistent_hits.load(Ordering::SeqCst), 2);
    assert_eq!(provider.load_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_failure_reports_reason_and_retries() {
    let provider = Arc::new(SimProvider::new());
    provider.script([ScriptedOutcome::Timeout(30), ScriptedOutcome::Fill]);
    let mut unit = ready_unit(Arc::clone(&provider));

    let reasons = Arc::new(std::sync::Mutex::new(Vec::new()));
    let r = Arc::clone(&reasons);
    unit.callbacks().failed.subscribe(move |reason: &String| {
        r.lock().unwrap().push(reason.clone());
    });

    unit.init();
    unit.load();

    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::FailedToLoad));
    assert_eq!(
        *reasons.lock().unwrap(),
        vec!["Load timed out after 30 seconds".to_string()]
    );

    // A timeout retries like any other failure.
    assert_eq!(unit.tick().await.unwrap(), None);
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Loaded));
    assert_eq!(provider.load_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_manual_load_cancels_pending_retry() {
    let provider = Arc::new(SimProvider::new());
    provider.script([ScriptedOutcome::NoFill, ScriptedOutcome::Fill]);
    let mut unit = ready_unit(Arc::clone(&provider));

    unit.init();
    unit.load();
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::FailedToLoad));

    // Manual reload before the timer fires; the automatic retry must not
    // produce a second request.
    unit.load();
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Loaded));
    assert_eq!(provider.load_calls(), 2);

    let idle = tokio::time::timeout(Duration::from_secs(60), unit.tick()).await;
    assert!(idle.is_err(), "no further load should be scheduled");
    assert_eq!(provider.load_calls(), 2);
}

// ============================================================================
// Stale Completions
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_destroy_discards_in_flight_fill() {
    let provider = Arc::new(SimProvider::new().with_latency(Duration::from_secs(1)));
    let mut unit = ready_unit(Arc::clone(&provider));

    unit.init();
    unit.load();
    unit.destroy().unwrap();

    // The provider still answers, but the fill belongs to a dead slot:
    // it is torn down instead of resurrecting the unit.
    assert_eq!(unit.tick().await.unwrap(), None);
    assert!(!unit.is_ready());
    assert_eq!(unit.state(), LifecycleState::Unloaded);
    assert_eq!(provider.controls().unwrap().log().destroys(), 1);
}

// ============================================================================
// Creative Events
// ============================================================================

#[tokio::test]
async fn test_show_and_creative_events_propagate() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = ready_unit(Arc::clone(&provider));

    let displayed = Arc::new(AtomicUsize::new(0));
    let clicked = Arc::new(AtomicUsize::new(0));
    let closed = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&displayed);
    unit.callbacks().displayed.subscribe(move |()| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let c = Arc::clone(&clicked);
    unit.callbacks().clicked.subscribe(move |()| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let c = Arc::clone(&closed);
    unit.callbacks().closed.subscribe(move |()| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    unit.init();
    unit.load();
    unit.tick().await.unwrap();
    unit.show().unwrap();

    let controls = provider.controls().unwrap();
    assert_eq!(controls.log().shows(), 1);

    controls.emit_opened();
    controls.emit_clicked();
    controls.emit_closed();

    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Displayed));
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Clicked));
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Closed));
    assert_eq!(displayed.load(Ordering::SeqCst), 1);
    assert_eq!(clicked.load(Ordering::SeqCst), 1);
    assert_eq!(closed.load(Ordering::SeqCst), 1);

    // Hide keeps the creative and readiness.
    unit.hide().unwrap();
    assert_eq!(controls.log().hides(), 1);
    assert!(unit.is_ready());
}

#[tokio::test]
async fn test_creative_call_failure_propagates() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = ready_unit(Arc::clone(&provider));

    unit.init();
    unit.load();
    unit.tick().await.unwrap();

    let controls = provider.controls().unwrap();
    controls.fail_next_call("surface lost");
    assert!(matches!(unit.show(), Err(UnitError::Provider(_))));

    // The failure was transient; the unit keeps its creative.
    assert!(unit.is_ready());
    unit.show().unwrap();
    assert_eq!(controls.log().shows(), 1);
}

// ============================================================================
// Revenue
// ============================================================================

#[tokio::test]
async fn test_every_paid_event_produces_one_tracker_record() {
    let provider = Arc::new(SimProvider::new());
    let tracker = Arc::new(RecordingTracker::new());
    let mut unit = unit_with(
        AdUnitConfig::new("unit-1"),
        UnitOptions::default(),
        Arc::clone(&provider),
        Arc::clone(&tracker) as Arc<dyn RevenueTracker>,
    );

    unit.init();
    unit.load();
    unit.tick().await.unwrap();

    let controls = provider.controls().unwrap();
    controls.emit_paid(2_500_000, "USD");
    controls.emit_paid(990_000, "USD");

    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Paid));
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Paid));

    let records = tracker.records();
    assert_eq!(records.len(), 2);
    assert!((records[0].amount - 2.5).abs() < f64::EPSILON);
    assert!((records[1].amount - 0.99).abs() < f64::EPSILON);
    assert_eq!(records[0].network, "Simulated");
    assert_eq!(records[0].unit_id, "unit-1");
    assert_eq!(records[0].format, "NativeOverlayAd");
}

#[tokio::test]
async fn test_paid_without_init_fires_callbacks_but_skips_tracker() {
    let provider = Arc::new(SimProvider::new());
    let tracker = Arc::new(RecordingTracker::new());
    let mut unit = unit_with(
        AdUnitConfig::new("unit-1"),
        UnitOptions::default(),
        Arc::clone(&provider),
        Arc::clone(&tracker) as Arc<dyn RevenueTracker>,
    );

    let paid_hits = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&paid_hits);
    unit.callbacks().paid.subscribe(move |_record| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    // No init(): revenue forwarding is not armed.
    unit.load();
    unit.tick().await.unwrap();
    provider.controls().unwrap().emit_paid(1_000_000, "USD");

    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Paid));
    assert_eq!(paid_hits.load(Ordering::SeqCst), 1);
    assert!(tracker.is_empty());
}

#[tokio::test]
async fn test_tracker_failure_propagates_without_breaking_unit() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = unit_with(
        AdUnitConfig::new("unit-1"),
        UnitOptions::default(),
        Arc::clone(&provider),
        Arc::new(FailingTracker::new("quota exceeded")),
    );

    unit.init();
    unit.load();
    unit.tick().await.unwrap();

    let controls = provider.controls().unwrap();
    controls.emit_paid(1_000_000, "USD");
    assert!(matches!(unit.tick().await, Err(UnitError::Track(_))));

    // The unit keeps dispatching after the propagated error.
    controls.emit_clicked();
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Clicked));
    assert!(unit.is_ready());
}

#[tokio::test(start_paused = true)]
async fn test_stale_paid_during_pending_retry_leaves_retry_intact() {
    let provider = Arc::new(SimProvider::new());
    provider.script([
        ScriptedOutcome::Fill,
        ScriptedOutcome::NoFill,
        ScriptedOutcome::Fill,
    ]);
    let mut unit = unit_with(
        AdUnitConfig::new("unit-1"),
        UnitOptions::default(),
        Arc::clone(&provider),
        Arc::new(FailingTracker::new("quota exceeded")),
    );

    unit.init();
    unit.load();
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Loaded));
    let first = provider.controls().unwrap();

    // The replacement load fails and schedules a retry; the first
    // creative's paid event now belongs to a dead slot.
    unit.load();
    first.emit_paid(1_000_000, "USD");

    // One tick dispatches the failure, one discards the stale paid. The
    // tracker rejects every record, so an Ok(None) for the paid proves it
    // was never reached.
    let first_two = [unit.tick().await.unwrap(), unit.tick().await.unwrap()];
    assert!(first_two.contains(&Some(AdEventKind::FailedToLoad)));
    assert!(first_two.contains(&None));
    assert_eq!(unit.state(), LifecycleState::Failed);

    // The pending retry is undisturbed and reloads.
    assert_eq!(unit.tick().await.unwrap(), None);
    assert_eq!(unit.tick().await.unwrap(), Some(AdEventKind::Loaded));
    assert_eq!(provider.load_calls(), 3);
}

// ============================================================================
// Render Surface
// ============================================================================

#[tokio::test]
async fn test_render_shapes_reach_the_creative() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = ready_unit(Arc::clone(&provider));

    unit.init();
    unit.load();
    unit.tick().await.unwrap();

    let metrics = ScreenMetrics {
        height: 800.0,
        dpi: 320.0,
    };
    unit.render().unwrap();
    unit.render_matching(
        ScreenPoint { x: 100.0, y: 200.0 },
        ElementSize {
            width: 50.0,
            height: 30.0,
        },
        metrics,
        true,
    )
    .unwrap();
    unit.render_at(ScreenPoint { x: 100.0, y: 200.0 }, metrics).unwrap();
    unit.render_at_sized(ScreenPoint { x: 400.0, y: 100.0 }, metrics, 300, 250)
        .unwrap();

    let renders = provider.controls().unwrap().log().renders();
    assert_eq!(
        renders,
        vec![
            Placement::Anchored {
                size: AdSize::MediumRectangle,
                position: AdPosition::Bottom,
            },
            Placement::Frame {
                x: 37,
                y: 292,
                width: 50,
                height: 30,
            },
            Placement::Point { x: 50, y: 300 },
            Placement::Frame {
                x: 125,
                y: 287,
                width: 300,
                height: 250,
            },
        ]
    );
}

#[tokio::test]
async fn test_render_without_fill_is_a_noop() {
    let provider = Arc::new(SimProvider::new());
    let mut unit = ready_unit(Arc::clone(&provider));
    unit.init();

    assert!(unit.render().is_ok());
    assert!(provider.controls().is_none());
}
