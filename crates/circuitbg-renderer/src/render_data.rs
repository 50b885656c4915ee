use serde::{Deserialize, Serialize};

use circuitbg_core::{planner, LayoutConfig, PlacementPlan, Viewport, ZoneGeometry};

use crate::paint::Painter;
use crate::surface::DrawSurface;

/// Everything needed to paint one frame, independent of any surface.
///
/// Serializes to JSON so a frame can be inspected or handed to a painter in
/// another process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub zones: ZoneGeometry,
    pub plan: PlacementPlan,
}

impl RenderFrame {
    pub fn build(viewport: Viewport, config: &LayoutConfig) -> Self {
        let zones = ZoneGeometry::compute_with(&viewport, config);
        let plan = planner::plan_zones(&zones, config);
        Self {
            viewport,
            zones,
            plan,
        }
    }

    /// Clear to the board background, then paint the plan. Returns the
    /// number of primitives painted.
    pub fn paint<S: DrawSurface + ?Sized>(&self, painter: &Painter, surface: &mut S) -> usize {
        painter.paint_background(surface, self.viewport.width, self.viewport.height);
        painter.paint_plan(surface, &self.plan)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawOp, RecordingSurface};
    use circuitbg_core::Palette;

    #[test]
    fn test_build_matches_planner() {
        let viewport = Viewport::new(1440.0, 900.0);
        let frame = RenderFrame::build(viewport, &LayoutConfig::default());
        assert_eq!(frame.plan, circuitbg_core::plan(&viewport));
        assert_eq!(frame.zones, ZoneGeometry::compute(&viewport));
    }

    #[test]
    fn test_paint_starts_with_clear() {
        let frame = RenderFrame::build(Viewport::new(1440.0, 900.0), &LayoutConfig::default());
        let mut surface = RecordingSurface::new();
        let painter = Painter::for_surface(&surface, Palette::PCB);
        let painted = frame.paint(&painter, &mut surface);
        assert_eq!(painted, frame.plan.len());
        assert!(matches!(surface.ops().first(), Some(DrawOp::Clear { .. })));
    }

    #[test]
    fn test_json_shape() {
        let frame = RenderFrame::build(Viewport::new(1440.0, 900.0), &LayoutConfig::default());
        let value: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();
        assert_eq!(value["zones"]["left_gutter_width"], 120.0);
        let items = value["plan"]["items"].as_array().unwrap();
        assert_eq!(items.last().unwrap()["pass"], "hero_fade");
        assert_eq!(items.last().unwrap()["primitive"]["type"], "fade_mask");
    }
}
