//! Collaborators the orchestrator needs from its host environment.

use circuitbg_core::Viewport;
use circuitbg_renderer::{DrawSurface, RasterSurface, SurfaceError, SurfaceMetrics};

/// Reports the current size and pixel density of the display area.
pub trait ViewportOracle {
    fn viewport(&self) -> Viewport;
}

impl ViewportOracle for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

/// Owns the drawing surface and resizes it on demand.
pub trait SurfaceProvider {
    type Surface: DrawSurface;

    /// Size the surface for `metrics` and hand it out for a full repaint.
    fn resize(&mut self, metrics: SurfaceMetrics) -> Result<&mut Self::Surface, SurfaceError>;

    /// Called after a repaint completes.
    fn present(&mut self) {}
}

/// Where the surface sits in the host: a full-viewport, non-interactive,
/// hidden-from-accessibility layer beneath the page content.
pub trait HostAttachment {
    fn attach(&mut self);

    /// Toggle the host's "background active" marker.
    fn mark_active(&mut self, active: bool);

    fn detach(&mut self);
}

/// Provides a [`RasterSurface`], created on first use and reallocated on
/// every resize.
#[derive(Default)]
pub struct RasterProvider {
    surface: Option<RasterSurface>,
    font: Option<Vec<u8>>,
}

impl RasterProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font face handed to each surface this provider creates.
    pub fn with_font(mut self, bytes: Vec<u8>) -> Self {
        self.font = Some(bytes);
        self
    }

    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    pub fn into_surface(self) -> Option<RasterSurface> {
        self.surface
    }
}

impl SurfaceProvider for RasterProvider {
    type Surface = RasterSurface;

    fn resize(&mut self, metrics: SurfaceMetrics) -> Result<&mut RasterSurface, SurfaceError> {
        match self.surface {
            Some(ref mut surface) => {
                surface.resize(metrics)?;
                Ok(surface)
            }
            None => {
                let mut surface = RasterSurface::new(metrics)?;
                if let Some(bytes) = &self.font {
                    surface = surface.with_font_bytes(bytes)?;
                }
                Ok(self.surface.insert(surface))
            }
        }
    }
}

/// Attachment for hosts with no display tree: tracks state only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessHost {
    pub attached: bool,
    pub active: bool,
}

impl HostAttachment for HeadlessHost {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn mark_active(&mut self, active: bool) {
        self.active = active;
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}
