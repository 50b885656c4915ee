//! Zone geometry: where the content column, gutters, edge bands and hero
//! exclusion sit for a given viewport.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::geometry::Rect;
use crate::viewport::Viewport;

/// Zones derived from a viewport. Pure data; recomputed on every redraw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneGeometry {
    /// Logical viewport size the zones were computed for.
    pub width: f64,
    pub height: f64,
    /// Centered content column, spanning the full viewport height.
    pub content: Rect,
    pub left_gutter_width: f64,
    pub right_gutter_width: f64,
    /// Area faded out above the fold so the hero copy sits on a clean field.
    pub hero_exclusion: Rect,
    /// y of the top edge bus.
    pub top_band_y: f64,
    /// y of the bottom edge bus.
    pub bottom_band_y: f64,
    pub is_narrow_layout: bool,
}

impl ZoneGeometry {
    /// Compute zones with the stock layout constants.
    pub fn compute(viewport: &Viewport) -> Self {
        Self::compute_with(viewport, &LayoutConfig::default())
    }

    /// Compute zones. Total: degenerate viewports yield degenerate rectangles.
    pub fn compute_with(viewport: &Viewport, config: &LayoutConfig) -> Self {
        let width = viewport.width;
        let height = viewport.height;

        let content_width = config.content_max_width.min(width - config.content_margin);
        let content_left = (width - content_width) / 2.0;
        let content = Rect::new(content_left, 0.0, content_width, height);

        let left_gutter_width = content_left;
        let right_gutter_width = width - content.right();

        let hero_exclusion = Rect::new(
            content_left - config.hero_side_bleed,
            0.0,
            content_width + config.hero_side_bleed * 2.0,
            config.hero_height + config.hero_bleed,
        );

        Self {
            width,
            height,
            content,
            left_gutter_width,
            right_gutter_width,
            hero_exclusion,
            top_band_y: config.edge_band_inset,
            bottom_band_y: height - config.edge_band_inset,
            is_narrow_layout: width < config.narrow_breakpoint,
        }
    }

    /// Horizontal center of the left gutter.
    pub fn left_gutter_center(&self) -> f64 {
        self.left_gutter_width * 0.5
    }

    /// Horizontal center of the right gutter.
    pub fn right_gutter_center(&self) -> f64 {
        self.content.right() + self.right_gutter_width * 0.5
    }

    /// Whether both gutters are wide enough to carry traces.
    pub fn both_gutters_exceed(&self, threshold: f64) -> bool {
        self.left_gutter_width > threshold && self.right_gutter_width > threshold
    }
}
