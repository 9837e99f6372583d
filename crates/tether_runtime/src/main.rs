//! Tether Runtime
//!
//! Boots logging and services, builds the demo scene and drives it for the
//! configured number of frames.
//!
//! Usage: `tether [settings.json]`

mod demo;

use anyhow::{Context, Result};
use tether_core::{FrameDriver, Registry};
use tether_metrics::{time_pass, Counter, FrameTimer, PassProfiler};
use tether_services::Settings;

fn main() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("could not load settings from {path}"))?,
        None => Settings::default(),
    };

    let level: tracing::Level = settings
        .runtime
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.runtime.log_level))?;
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("Tether v{}", tether_core::VERSION);
    tether_services::init_services(settings)?;
    let settings = tether_services::settings();

    let registry = Registry::global();
    let spawned = demo::build_scene(&registry, &settings.demo);
    let mut driver = FrameDriver::new(registry.clone())
        .with_tick_rate(settings.runtime.tick_rate_hz)
        .with_options(settings.runtime.frame_options());
    tracing::info!(
        entities = registry.len(),
        frames = settings.runtime.frames,
        "scene ready"
    );

    let mut timer = FrameTimer::new(60);
    let mut counters = Counter::new();
    let mut profiler = PassProfiler::new();

    for _ in 0..settings.runtime.frames {
        timer.begin();
        let report = time_pass!(profiler, "frame", { driver.run_frame() });
        timer.end();

        counters.increment("updated", report.updated);
        counters.increment("drawn", report.drawn);
        counters.increment("swept", report.swept);
        if report.swept > 0 {
            tracing::debug!(
                tick = report.tick,
                swept = report.swept,
                remaining = registry.len(),
                "entities swept"
            );
        }
    }

    // Anything destroyed in the last frame with per-frame sweeping disabled.
    counters.increment("swept", registry.collect_entities());
    counters.set("spawned", spawned.get());

    tracing::info!(
        ticks = driver.clock().tick_count(),
        simulated_ms = driver.clock().total_time().as_millis() as u64,
        entities = registry.len(),
        fps = timer.fps(),
        frame_ms = timer.frame_time_ms(),
        frame_total_ms = profiler.total("frame").as_secs_f64() * 1000.0,
        "run finished"
    );
    for (name, value) in counters.iter() {
        tracing::info!(counter = name, value, "metric");
    }

    Ok(())
}
