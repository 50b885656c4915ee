use serde::{Deserialize, Serialize};

/// Tunable constants of the zone geometry and placement passes.
///
/// `Default` yields the stock layout; every field can be overridden from a
/// configuration file, and omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum width of the centered content column.
    pub content_max_width: f64,
    /// Total horizontal margin kept around the content column (both sides).
    pub content_margin: f64,
    /// Viewports narrower than this use edge lanes instead of gutters.
    pub narrow_breakpoint: f64,
    /// Distance of the top/bottom edge buses from the viewport edge.
    pub edge_band_inset: f64,
    /// Height of the hero area that the fade keeps clear.
    pub hero_height: f64,
    /// Extra fade height below the hero area.
    pub hero_bleed: f64,
    /// Extra fade width on either side of the content column.
    pub hero_side_bleed: f64,
    /// Gutter width above which any gutter content is drawn.
    pub gutter_min_width: f64,
    /// Gutter width above which the secondary trace is drawn.
    pub secondary_trace_min_width: f64,
    /// Gutter width above which IC packages and passives are drawn.
    pub component_min_width: f64,
    /// Distance of the cross-connection traces from the top/bottom edges.
    pub cross_connect_inset: f64,
    /// Distance of the border stitching vias from the left/right edges.
    pub border_stitch_inset: f64,
    /// Lower bound on ground-stitch spacing.
    pub stitch_min_spacing: f64,
    /// Ground-stitch spacing as a fraction of the stitched dimension.
    pub stitch_spacing_fraction: f64,
    /// Distance of the narrow-layout edge lanes from the viewport edges.
    pub narrow_lane_inset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            content_max_width: 1200.0,
            content_margin: 48.0,
            narrow_breakpoint: 768.0,
            edge_band_inset: 20.0,
            hero_height: 460.0,
            hero_bleed: 40.0,
            hero_side_bleed: 20.0,
            gutter_min_width: 40.0,
            secondary_trace_min_width: 60.0,
            component_min_width: 80.0,
            cross_connect_inset: 50.0,
            border_stitch_inset: 12.0,
            stitch_min_spacing: 70.0,
            stitch_spacing_fraction: 0.07,
            narrow_lane_inset: 18.0,
        }
    }
}

impl LayoutConfig {
    /// Spacing between ground-stitch vias along a run of `extent` pixels.
    pub fn stitch_spacing(&self, extent: f64) -> f64 {
        self.stitch_min_spacing.max(extent * self.stitch_spacing_fraction)
    }
}
