//! `run` command: drive a scripted ad session end to end.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use adlift_core::{AdEventKind, AdNetwork, Platform};
use adlift_providers::{LogRevenueTracker, NetworkRegistry, ScriptedOutcome, SimProvider};
use adlift_unit::{
    ElementSize, NativeOverlayUnit, RetryPolicy, ScreenMetrics, ScreenPoint, UnitOptions,
};

use crate::{config, Cli, OutputFormat};

// ============================================================================
// Arguments
// ============================================================================

/// Platform choice for test unit-ID substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// Android sample unit IDs.
    Android,
    /// iOS sample unit IDs.
    Ios,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Android => Platform::Android,
            PlatformArg::Ios => Platform::Ios,
        }
    }
}

/// Arguments for the run command.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to a unit config JSON file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scripted load failures before the fill.
    #[arg(long, default_value_t = 2)]
    pub failures: u32,

    /// Retry delay in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub retry_ms: u64,

    /// Platform used for test unit-ID substitution.
    #[arg(long, value_enum, default_value_t = PlatformArg::Android)]
    pub platform: PlatformArg,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            config: None,
            failures: 2,
            retry_ms: 500,
            platform: PlatformArg::Android,
        }
    }
}

// ============================================================================
// Session Log
// ============================================================================

/// One entry of the session event log.
#[derive(Debug, Clone, Serialize)]
struct SessionEvent {
    at: DateTime<Utc>,
    event: String,
    detail: String,
}

#[derive(Default, Clone)]
struct SessionLog(Arc<Mutex<Vec<SessionEvent>>>);

impl SessionLog {
    fn push(&self, event: impl Into<String>, detail: impl Into<String>) {
        self.0.lock().unwrap().push(SessionEvent {
            at: Utc::now(),
            event: event.into(),
            detail: detail.into(),
        });
    }

    fn entries(&self) -> Vec<SessionEvent> {
        self.0.lock().unwrap().clone()
    }
}

// ============================================================================
// Session Driver
// ============================================================================

/// Runs a scripted session: the configured number of no-fills, a fill,
/// a render pass, and the creative events a live network would deliver.
pub async fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
    let mut unit_config = config::load(args.config.as_deref())?;
    NetworkRegistry::apply_test_id(
        &mut unit_config,
        AdNetwork::Simulated,
        args.platform.into(),
    );

    let provider = Arc::new(SimProvider::new());
    provider.script(
        std::iter::repeat(ScriptedOutcome::NoFill)
            .take(args.failures as usize)
            .chain(std::iter::once(ScriptedOutcome::Fill)),
    );

    let options = UnitOptions {
        ads_disabled: false,
        retry: RetryPolicy::fixed(Duration::from_millis(args.retry_ms)),
    };
    let mut unit = NativeOverlayUnit::new(
        unit_config,
        options,
        Arc::clone(&provider) as Arc<dyn adlift_core::AdProvider>,
        Arc::new(LogRevenueTracker),
    );

    let log = SessionLog::default();
    let once_log = log.clone();
    unit.callbacks()
        .loaded
        .set_once(move |()| once_log.push("loaded_once", "one-shot callback consumed"));
    let paid_log = log.clone();
    unit.callbacks().paid.subscribe(move |record| {
        paid_log.push(
            "revenue",
            format!("{:.4} {} via {}", record.amount, record.format, record.network),
        );
    });

    unit.init();
    log.push("load", format!("unit {}", unit.config().id));
    unit.load();

    // Pump until the fill lands; every failure schedules its own retry.
    let mut ticks = 0usize;
    let tick_budget = (args.failures as usize + 1) * 2 + 2;
    loop {
        ticks += 1;
        anyhow::ensure!(ticks <= tick_budget, "session never reached a fill");
        match unit.tick().await? {
            Some(AdEventKind::Loaded) => {
                log.push("loaded", "fill received");
                break;
            }
            Some(AdEventKind::FailedToLoad) => {
                log.push("failed_to_load", format!("retry in {}ms", args.retry_ms));
            }
            Some(kind) => log.push(kind.display_name().to_lowercase(), String::new()),
            None => {}
        }
    }

    unit.show()?;
    unit.render()?;
    unit.render_matching(
        ScreenPoint { x: 100.0, y: 200.0 },
        ElementSize {
            width: 50.0,
            height: 30.0,
        },
        ScreenMetrics {
            height: 800.0,
            dpi: 320.0,
        },
        true,
    )?;
    log.push("rendered", "anchored + element-matched overlay");

    // Replay the events a live creative would emit.
    let controls = provider
        .controls()
        .ok_or_else(|| anyhow::anyhow!("no creative controls after fill"))?;
    controls.emit_opened();
    controls.emit_paid(2_500_000, "USD");
    controls.emit_clicked();
    controls.emit_closed();
    for _ in 0..4 {
        if let Some(kind) = unit.tick().await? {
            log.push(kind.display_name().to_lowercase(), String::new());
        }
    }

    unit.destroy()?;
    log.push("destroyed", "session complete");

    print_log(&log, cli)
}

fn print_log(log: &SessionLog, cli: &Cli) -> Result<()> {
    let entries = log.entries();
    if cli.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        if entry.detail.is_empty() {
            println!("{}  {}", entry.at.format("%H:%M:%S%.3f"), entry.event);
        } else {
            println!(
                "{}  {:<16} {}",
                entry.at.format("%H:%M:%S%.3f"),
                entry.event,
                entry.detail
            );
        }
    }
    Ok(())
}
