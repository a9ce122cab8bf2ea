//! Desktop simulator and budget check for the watch face.
//!
//! Drives a face through a scripted wake / hold / sleep / wake timeline,
//! rendering into the in-memory [`MockPanel`], and reports how long full
//! redraws and incremental second-hand updates took. Exits non-zero when the
//! worst incremental update exceeds the budget.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin face_sim --features sim -- [COMPOSITOR] [WIDTHxHEIGHT]
//! ```
//!
//! - `COMPOSITOR`: `buffered` (default), `layered` or `direct`
//! - `WIDTHxHEIGHT`: screen size, default `260x260`
//!
//! # Environment
//!
//! - `RUST_LOG`: log filter (default `info`)
//! - `TICKFACE_BUDGET_US`: incremental budget in microseconds (default 3000)

use std::env;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};

use tickface::config::{DeviceConfig, DisplayConfig};
use tickface::hal::{MockClock, MockPanel, MockStatus};
use tickface::{
    BufferedCompositor, ClockReading, Compositor, CompositorKind, DirectCompositor, FaceConfig,
    FrameInputs, LayeredCompositor, StaticTheme, WatchFace,
};

const DEFAULT_BUDGET_US: u64 = 3000;

/// Simulated seconds run much faster than real ones.
const TICK: Duration = Duration::from_millis(2);

// ============================================================================
// Timeline
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Hold,
    Sleep,
    Wake,
    BatteryLow,
}

struct Timeline {
    hold_at: u32,
    sleep_at: u32,
    battery_low_at: u32,
    wake_at: u32,
    end: u32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            hold_at: 20,
            sleep_at: 90,
            battery_low_at: 150,
            wake_at: 210,
            end: 240,
        }
    }
}

impl Timeline {
    fn event(&self, tick: u32) -> Option<Event> {
        match tick {
            t if t == self.hold_at => Some(Event::Hold),
            t if t == self.sleep_at => Some(Event::Sleep),
            t if t == self.battery_low_at => Some(Event::BatteryLow),
            t if t == self.wake_at => Some(Event::Wake),
            _ => None,
        }
    }
}

// ============================================================================
// Timing
// ============================================================================

#[derive(Default)]
struct PathStats {
    count: u32,
    total: Duration,
    worst: Duration,
}

impl PathStats {
    fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
        self.worst = self.worst.max(elapsed);
    }

    fn mean(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        self.total / self.count
    }
}

#[derive(Default)]
struct Report {
    full: PathStats,
    incremental: PathStats,
}

impl Report {
    fn log(&self, kind: CompositorKind) {
        info!("{} compositor", kind);
        info!(
            "  full redraw: {} runs, mean {:?}, worst {:?}",
            self.full.count,
            self.full.mean(),
            self.full.worst
        );
        info!(
            "  incremental: {} runs, mean {:?}, worst {:?}",
            self.incremental.count,
            self.incremental.mean(),
            self.incremental.worst
        );
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let kind = match args.next() {
        Some(text) => CompositorKind::from_text(&text)
            .ok_or_else(|| anyhow!("unknown compositor '{}'", text))?,
        None => CompositorKind::default(),
    };
    let display = match args.next() {
        Some(text) => parse_size(&text)?,
        None => DisplayConfig::default(),
    };
    let budget = match env::var("TICKFACE_BUDGET_US") {
        Ok(text) => text
            .trim()
            .parse::<u64>()
            .context("TICKFACE_BUDGET_US must be a number of microseconds")?,
        Err(_) => DEFAULT_BUDGET_US,
    };

    let config = FaceConfig::default()
        .with_display(display)
        .with_device(DeviceConfig::default().with_compositor(kind));

    let report = match kind {
        CompositorKind::Buffered => simulate::<BufferedCompositor>(&config).await?,
        CompositorKind::Layered => simulate::<LayeredCompositor>(&config).await?,
        CompositorKind::Direct => simulate::<DirectCompositor>(&config).await?,
    };
    report.log(kind);

    let budget = Duration::from_micros(budget);
    if report.incremental.worst > budget {
        bail!(
            "incremental update took {:?}, budget is {:?}",
            report.incremental.worst,
            budget
        );
    }
    Ok(())
}

fn parse_size(text: &str) -> Result<DisplayConfig> {
    let lower = text.to_ascii_lowercase();
    let (w, h) = lower
        .split_once('x')
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got '{}'", text))?;
    let width = w.trim().parse().context("invalid width")?;
    let height = h.trim().parse().context("invalid height")?;
    Ok(DisplayConfig::new(width, height))
}

async fn simulate<C: Compositor>(config: &FaceConfig) -> Result<Report> {
    let mut face = WatchFace::<C>::new(config)?;
    let mut panel = MockPanel::new(config.display.size());
    let theme = StaticTheme::new(&config.theme);
    let mut status = MockStatus::new()
        .with_battery(64)
        .with_phone(true)
        .with_notifications(2)
        .with_day(19);
    let mut clock = MockClock::new(ClockReading::new(10, 8, 50));

    let timeline = Timeline::default();
    let mut ticker = tokio::time::interval(TICK);
    let mut report = Report::default();

    for tick in 0..timeline.end {
        ticker.tick().await;

        match timeline.event(tick) {
            Some(Event::Hold) => {
                face.on_hold();
            }
            Some(Event::Sleep) => {
                face.on_sleep();
            }
            Some(Event::Wake) => face.on_wake(),
            Some(Event::BatteryLow) => status = status.with_battery(8),
            None => {}
        }

        let awake = face.state().power().is_awake();
        let frame = FrameInputs::gather(&theme, &clock, &status, awake);
        // In low power the host only calls the full entry point once a minute
        let partial =
            !awake && face.state().last_full_redraw_minute() == Some(frame.reading.minute_of_day());

        panel.reset_tracking();
        let start = Instant::now();
        if partial {
            let area = face.on_partial_update(&mut panel, frame.reading, frame.accent)?;
            let elapsed = start.elapsed();
            if area.is_some() {
                report.incremental.record(elapsed);
            }
        } else {
            let outcome = face.on_update(&mut panel, &frame)?;
            let elapsed = start.elapsed();
            if outcome.full_redraw {
                report.full.record(elapsed);
            } else if outcome.second_drawn.is_some() {
                report.incremental.record(elapsed);
            }
        }
        debug!(
            "tick {} {:02}:{:02}:{:02} {} px",
            tick,
            frame.reading.hour,
            frame.reading.minute,
            frame.reading.second,
            panel.write_count()
        );

        clock.advance(1);
    }

    Ok(report)
}
