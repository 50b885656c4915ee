use serde::{Deserialize, Serialize};

/// The display area the background covers, in logical (CSS) pixels.
///
/// Supplied by the host on initialisation and on every resize; the engine
/// only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
    /// Physical pixels per logical pixel.
    pub pixel_density: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pixel_density: 1.0,
        }
    }

    pub fn with_density(mut self, pixel_density: f64) -> Self {
        self.pixel_density = pixel_density;
        self
    }

    /// Density clamped to `max`; zero, negative and non-finite values read as 1.
    pub fn effective_density(&self, max: f64) -> f64 {
        if self.pixel_density.is_finite() && self.pixel_density > 0.0 {
            self.pixel_density.min(max)
        } else {
            1.0
        }
    }
}
