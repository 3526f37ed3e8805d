use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use refresh_core::{RefreshConfig, RefreshState};
use refresh_engine::{refresh_fn, refreshable, RefreshHandle, ScrollEvent};

use super::args::Args;
use super::effects::{LoggingAnimator, LoggingHaptics};
use super::script::{demo_gestures, Gesture, FRAME_INTERVAL};
use super::trace::{write_trace, TraceEntry};
use super::{logging, settings, ui};

/// Top safe-area inset reported by the simulated scroll view.
const TOP_INSET: f64 = 47.0;

/// How long to wait for a gesture to come back to rest. The controller itself
/// has no timeout; this only keeps the demo from hanging on a stuck action.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder for whatever scrollable content the host wraps.
#[derive(Debug, Default)]
struct ActivityFeed {
    refreshes: Arc<AtomicU32>,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.log, args.level(), &args.log_file);

    if let Some(path) = &args.write_default_config {
        return settings::write_config(path, &RefreshConfig::default());
    }

    let config = settings::load_config(args.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    runtime.block_on(replay(args, config))
}

async fn replay(args: Args, config: RefreshConfig) -> anyhow::Result<()> {
    let feed = ActivityFeed::default();
    let refreshes = feed.refreshes.clone();
    let latency = args.latency;

    let wrapped = refreshable(
        feed,
        refresh_fn(move || {
            let refreshes = refreshes.clone();
            async move {
                engine_info!("fetching latest activity");
                tokio::time::sleep(latency).await;
                refreshes.fetch_add(1, Ordering::SeqCst);
            }
        }),
    )
    .with_haptics(LoggingHaptics)
    .with_animator(LoggingAnimator)
    .with_config(config)
    .spawn()?;

    let trace = Arc::new(Mutex::new(Vec::new()));
    let mut start = Duration::ZERO;
    for gesture in demo_gestures() {
        println!("== {}", gesture.name);
        let renderer = spawn_renderer(wrapped.handle(), gesture.name, trace.clone());
        start = play(wrapped.handle(), &gesture, start).await?;
        wait_for_rest(wrapped.handle()).await;
        // Give the renderer a frame to print the final idle view.
        tokio::time::sleep(FRAME_INTERVAL).await;
        renderer.abort();
    }

    let (feed, handle) = wrapped.into_parts();
    handle.shutdown();
    println!("refreshes completed: {}", feed.refreshes.load(Ordering::SeqCst));

    if let Some(path) = &args.trace {
        let entries = trace
            .lock()
            .map(|entries| entries.to_vec())
            .unwrap_or_default();
        write_trace(path, &entries)?;
        engine_info!("wrote {} trace entries to {:?}", entries.len(), path);
    }
    Ok(())
}

/// Sends the gesture one frame at a time, like a display-linked scroll view.
async fn play(
    handle: &RefreshHandle,
    gesture: &Gesture,
    start: Duration,
) -> anyhow::Result<Duration> {
    let events = gesture.events(TOP_INSET, start);
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    let mut last = start;
    for event in events {
        ticker.tick().await;
        if let ScrollEvent::DragEnded { timestamp } = event {
            last = timestamp;
        }
        handle.send(event)?;
    }
    Ok(last + FRAME_INTERVAL)
}

async fn wait_for_rest(handle: &RefreshHandle) {
    let mut views = handle.subscribe();
    // Let the release be processed before judging whether we are at rest.
    tokio::time::sleep(FRAME_INTERVAL).await;
    let at_rest = views.wait_for(|view| view.state == RefreshState::Idle);
    if tokio::time::timeout(SETTLE_TIMEOUT, at_rest).await.is_err() {
        engine_warn!("indicator did not return to idle within {:?}", SETTLE_TIMEOUT);
    }
}

fn spawn_renderer(
    handle: &RefreshHandle,
    gesture: &'static str,
    trace: Arc<Mutex<Vec<TraceEntry>>>,
) -> tokio::task::JoinHandle<()> {
    let mut views = handle.subscribe();
    tokio::spawn(async move {
        let mut frame = 0u64;
        while views.changed().await.is_ok() {
            let view = *views.borrow_and_update();
            frame += 1;
            println!("{}", ui::render::render(&view, frame));
            if let Ok(mut entries) = trace.lock() {
                entries.push(TraceEntry::now(gesture, view));
            }
        }
    })
}
