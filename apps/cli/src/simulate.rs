//! Replays a scripted series of resizes through the debounced orchestrator.

use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};

use circuitbg_core::{Palette, Viewport};
use circuitbg_io::BackgroundConfig;
use circuitbg_renderer::RasterSurface;
use circuitbg_runtime::{Background, BackgroundOptions, HeadlessHost, RasterProvider};

use crate::commands::read_font;

/// One scripted resize: `WIDTHxHEIGHT@MS`, `MS` after the start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub width: f64,
    pub height: f64,
    pub at: Duration,
}

impl Step {
    fn viewport(&self, density: f64) -> Viewport {
        Viewport::new(self.width, self.height).with_density(density)
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("expected WIDTHxHEIGHT@MS, got {s:?}");
        let (size, ms) = s.split_once('@').ok_or_else(bad)?;
        let (w, h) = size.split_once('x').ok_or_else(bad)?;
        Ok(Step {
            width: w.trim().parse().map_err(|_| bad())?,
            height: h.trim().parse().map_err(|_| bad())?,
            at: Duration::from_millis(ms.trim().parse().map_err(|_| bad())?),
        })
    }
}

type Board = Background<RasterProvider, HeadlessHost>;

fn background(config: &BackgroundConfig) -> anyhow::Result<Board> {
    let mut provider = RasterProvider::new();
    if let Some(bytes) = read_font(config)? {
        provider = provider.with_font(bytes);
    }
    let options = BackgroundOptions {
        layout: config.layout.clone(),
        palette: Palette::PCB,
        max_pixel_density: config.render.max_pixel_density,
        debounce: Duration::from_millis(config.render.debounce_ms),
    };
    Ok(Background::new(provider, HeadlessHost::default(), options))
}

fn finish(mut board: Board, notifications: usize) -> anyhow::Result<RasterSurface> {
    log::info!(
        "{} redraw(s) for {} resize notification(s)",
        board.redraw_count(),
        notifications
    );
    board.shutdown();
    let (provider, _) = board.into_parts();
    provider.into_surface().context("no frame was painted")
}

/// Fire every redraw that falls due at or before `now`, at its own deadline.
fn fire_due(board: &mut Board, now: Instant) {
    while let Some(deadline) = board.deadline().filter(|d| *d <= now) {
        board.poll(deadline);
    }
}

/// Step a virtual clock through `steps`. The first step initializes the
/// board; the rest are resize notifications.
pub fn replay(config: &BackgroundConfig, density: f64, steps: &[Step]) -> anyhow::Result<RasterSurface> {
    let Some((first, rest)) = steps.split_first() else {
        bail!("nothing to simulate");
    };
    let start = Instant::now();
    let mut board = background(config)?;

    board.initialize(&first.viewport(density));
    for step in rest {
        let at = start + step.at;
        fire_due(&mut board, at);
        board.notify(step.viewport(density), at);
    }
    if let Some(deadline) = board.deadline() {
        board.poll(deadline);
    }
    finish(board, rest.len())
}

/// Same as [`replay`], but on the tokio driver and the wall clock.
pub fn replay_realtime(
    config: &BackgroundConfig,
    density: f64,
    steps: &[Step],
) -> anyhow::Result<RasterSurface> {
    let Some((first, rest)) = steps.split_first() else {
        bail!("nothing to simulate");
    };
    let board = background(config)?;
    let settle = Duration::from_millis(config.render.debounce_ms) + Duration::from_millis(50);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let board = runtime.block_on(async {
        let start = tokio::time::Instant::now();
        let (notifier, task) = circuitbg_runtime::spawn(board, first.viewport(density));
        for step in rest {
            tokio::time::sleep_until(start + step.at).await;
            notifier.notify(step.viewport(density));
        }
        tokio::time::sleep(settle).await;
        drop(notifier);
        task.await
    })?;
    finish(board, rest.len())
}
