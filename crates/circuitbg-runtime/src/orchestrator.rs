use std::time::{Duration, Instant};

use circuitbg_core::{LayoutConfig, Palette, Viewport};
use circuitbg_renderer::{Painter, RenderFrame, SurfaceMetrics, MAX_PIXEL_DENSITY};

use crate::host::{HostAttachment, SurfaceProvider, ViewportOracle};
use crate::scheduler::{DebounceScheduler, DEFAULT_DEBOUNCE};

/// Knobs for a [`Background`].
#[derive(Debug, Clone)]
pub struct BackgroundOptions {
    pub layout: LayoutConfig,
    pub palette: Palette,
    pub max_pixel_density: f64,
    pub debounce: Duration,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            palette: Palette::PCB,
            max_pixel_density: MAX_PIXEL_DENSITY,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// What a redraw did.
#[derive(Debug, Clone, PartialEq)]
pub enum RedrawOutcome {
    Painted { viewport: Viewport, primitives: usize },
    /// The surface could not be prepared. Nothing was painted.
    Failed { reason: String },
}

impl RedrawOutcome {
    pub fn is_painted(&self) -> bool {
        matches!(self, RedrawOutcome::Painted { .. })
    }
}

/// The decorative background: owns the surface, schedules redraws, and
/// repaints the whole frame when the viewport settles.
///
/// Failures never escape. A redraw that cannot get a surface logs a warning
/// and reports [`RedrawOutcome::Failed`].
pub struct Background<P: SurfaceProvider, H: HostAttachment> {
    provider: P,
    host: H,
    options: BackgroundOptions,
    scheduler: DebounceScheduler,
    painter: Option<Painter>,
    initialized: bool,
    redraws: u64,
}

impl<P: SurfaceProvider, H: HostAttachment> Background<P, H> {
    pub fn new(provider: P, host: H, options: BackgroundOptions) -> Self {
        let scheduler = DebounceScheduler::new(options.debounce);
        Self {
            provider,
            host,
            options,
            scheduler,
            painter: None,
            initialized: false,
            redraws: 0,
        }
    }

    /// Attach to the host and paint the first frame.
    ///
    /// Idempotent: returns `None` without touching anything if already
    /// initialized.
    pub fn initialize(&mut self, oracle: &impl ViewportOracle) -> Option<RedrawOutcome> {
        if self.initialized {
            log::debug!("background already initialized");
            return None;
        }
        self.initialized = true;
        self.host.attach();
        self.host.mark_active(true);
        Some(self.redraw(oracle.viewport()))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Viewport changed. The repaint happens once the debounce delay elapses
    /// with no further notifications. Ignored unless initialized.
    pub fn notify(&mut self, viewport: Viewport, now: Instant) {
        if !self.initialized {
            log::debug!(
                "ignoring resize to {}x{}: background not attached",
                viewport.width,
                viewport.height
            );
            return;
        }
        self.scheduler.notify(viewport, now);
    }

    /// When the pending redraw is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Run the pending redraw if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<RedrawOutcome> {
        if !self.initialized {
            return None;
        }
        self.scheduler.poll(now).map(|viewport| self.redraw(viewport))
    }

    /// Resize the surface and repaint everything for `viewport`.
    pub fn redraw(&mut self, viewport: Viewport) -> RedrawOutcome {
        let metrics = SurfaceMetrics::for_viewport_with_max(&viewport, self.options.max_pixel_density);
        let surface = match self.provider.resize(metrics) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!(
                    "background redraw failed for {}x{}: {e}",
                    viewport.width,
                    viewport.height
                );
                return RedrawOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let palette = self.options.palette;
        let painter = *self
            .painter
            .get_or_insert_with(|| Painter::for_surface(&*surface, palette));
        let frame = RenderFrame::build(viewport, &self.options.layout);
        let primitives = frame.paint(&painter, surface);
        self.provider.present();

        self.redraws += 1;
        log::debug!(
            "redraw #{} at {}x{} @{}x: {} primitives",
            self.redraws,
            viewport.width,
            viewport.height,
            metrics.scale,
            primitives
        );
        RedrawOutcome::Painted {
            viewport,
            primitives,
        }
    }

    /// Cancel any pending redraw and detach from the host.
    pub fn shutdown(&mut self) {
        if self.scheduler.cancel() {
            log::debug!("dropped pending redraw on shutdown");
        }
        if self.initialized {
            self.host.mark_active(false);
            self.host.detach();
            self.initialized = false;
        }
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_parts(self) -> (P, H) {
        (self.provider, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use circuitbg_renderer::{DrawOp, RecordingSurface, SurfaceError};

    #[derive(Default)]
    struct Recorder {
        surface: RecordingSurface,
        sizes: Vec<(u32, u32)>,
        presented: usize,
    }

    impl SurfaceProvider for Recorder {
        type Surface = RecordingSurface;

        fn resize(&mut self, metrics: SurfaceMetrics) -> Result<&mut RecordingSurface, SurfaceError> {
            if metrics.is_empty() {
                return Err(SurfaceError::Allocation {
                    width: metrics.pixel_width,
                    height: metrics.pixel_height,
                });
            }
            self.sizes.push((metrics.pixel_width, metrics.pixel_height));
            self.surface.take_ops();
            Ok(&mut self.surface)
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    fn background() -> Background<Recorder, HeadlessHost> {
        Background::new(Recorder::default(), HeadlessHost::default(), BackgroundOptions::default())
    }

    #[test]
    fn test_initialize_attaches_and_paints() {
        let mut bg = background();
        let outcome = bg.initialize(&Viewport::new(1440.0, 900.0)).unwrap();
        assert!(outcome.is_painted());
        assert_eq!(bg.host(), &HeadlessHost { attached: true, active: true });
        assert_eq!(bg.provider().sizes, vec![(1440, 900)]);
        assert_eq!(bg.provider().presented, 1);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut bg = background();
        assert!(bg.initialize(&Viewport::new(800.0, 600.0)).is_some());
        assert!(bg.initialize(&Viewport::new(800.0, 600.0)).is_none());
        assert_eq!(bg.redraw_count(), 1);
    }

    #[test]
    fn test_redraw_clears_before_painting() {
        let mut bg = background();
        bg.redraw(Viewport::new(1440.0, 900.0));
        let ops = bg.provider().surface.ops();
        assert!(matches!(ops[0], DrawOp::Clear { .. }));
        assert!(matches!(ops[2], DrawOp::FillRect { .. }));
    }

    #[test]
    fn test_density_clamped_when_sizing_surface() {
        let mut bg = background();
        bg.redraw(Viewport::new(100.0, 50.0).with_density(3.0));
        assert_eq!(bg.provider().sizes, vec![(200, 100)]);
    }

    #[test]
    fn test_surface_failure_is_contained() {
        let mut bg = background();
        let outcome = bg.redraw(Viewport::new(0.0, 0.0));
        assert!(matches!(outcome, RedrawOutcome::Failed { .. }));
        assert_eq!(bg.redraw_count(), 0);
        assert!(bg.redraw(Viewport::new(10.0, 10.0)).is_painted());
    }

    #[test]
    fn test_debounced_poll() {
        let mut bg = background();
        bg.initialize(&Viewport::new(800.0, 600.0));
        let t0 = Instant::now();
        bg.notify(Viewport::new(1024.0, 768.0), t0);
        bg.notify(Viewport::new(1280.0, 720.0), t0 + Duration::from_millis(100));
        assert!(bg.poll(t0 + Duration::from_millis(300)).is_none());
        let outcome = bg.poll(t0 + Duration::from_millis(350)).unwrap();
        assert_eq!(
            outcome,
            RedrawOutcome::Painted {
                viewport: Viewport::new(1280.0, 720.0),
                primitives: circuitbg_core::plan(&Viewport::new(1280.0, 720.0)).len(),
            }
        );
        assert_eq!(bg.provider().sizes, vec![(800, 600), (1280, 720)]);
    }

    #[test]
    fn test_shutdown_cancels_and_detaches() {
        let mut bg = background();
        bg.initialize(&Viewport::new(800.0, 600.0));
        let t0 = Instant::now();
        bg.notify(Viewport::new(900.0, 600.0), t0);
        bg.shutdown();
        assert_eq!(bg.deadline(), None);
        assert!(bg.poll(t0 + Duration::from_secs(1)).is_none());
        assert_eq!(bg.host(), &HeadlessHost::default());
        assert!(!bg.is_initialized());
    }

    #[test]
    fn test_resize_after_shutdown_is_ignored() {
        let mut bg = background();
        bg.initialize(&Viewport::new(800.0, 600.0));
        bg.shutdown();
        let t0 = Instant::now();
        bg.notify(Viewport::new(1024.0, 768.0), t0);
        assert_eq!(bg.deadline(), None);
        assert!(bg.poll(t0 + Duration::from_millis(250)).is_none());
        assert_eq!(bg.redraw_count(), 1);
        assert_eq!(bg.provider().sizes, vec![(800, 600)]);
        assert_eq!(bg.host(), &HeadlessHost::default());
    }

    #[test]
    fn test_resize_before_initialize_is_ignored() {
        let mut bg = background();
        let t0 = Instant::now();
        bg.notify(Viewport::new(1024.0, 768.0), t0);
        assert_eq!(bg.deadline(), None);
        assert!(bg.poll(t0 + Duration::from_millis(250)).is_none());
        assert_eq!(bg.redraw_count(), 0);
        assert!(bg.provider().sizes.is_empty());
    }
}
