use serde::{Deserialize, Serialize};

use circuitbg_core::Viewport;

/// Device pixel ratio above which extra resolution is not worth the memory.
pub const MAX_PIXEL_DENSITY: f64 = 2.0;

/// Pixel-buffer dimensions for a viewport, and the transform from logical
/// coordinates into that buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMetrics {
    /// Logical (CSS) width.
    pub logical_width: f64,
    /// Logical (CSS) height.
    pub logical_height: f64,
    /// Physical pixels per logical pixel.
    pub scale: f64,
    /// Buffer width in physical pixels.
    pub pixel_width: u32,
    /// Buffer height in physical pixels.
    pub pixel_height: u32,
}

impl SurfaceMetrics {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self::for_viewport_with_max(viewport, MAX_PIXEL_DENSITY)
    }

    pub fn for_viewport_with_max(viewport: &Viewport, max_density: f64) -> Self {
        let scale = viewport.effective_density(max_density);
        Self {
            logical_width: viewport.width,
            logical_height: viewport.height,
            scale,
            pixel_width: to_pixels(viewport.width * scale),
            pixel_height: to_pixels(viewport.height * scale),
        }
    }

    /// Convert a logical coordinate to buffer pixels.
    pub fn to_physical(&self, logical: f64) -> f64 {
        logical * self.scale
    }

    /// Convert buffer pixels to a logical coordinate.
    pub fn to_logical(&self, physical: f64) -> f64 {
        logical_or_zero(physical / self.scale)
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_width == 0 || self.pixel_height == 0
    }
}

/// Buffer dimensions truncate; negative or non-finite sizes become zero.
fn to_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn logical_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
