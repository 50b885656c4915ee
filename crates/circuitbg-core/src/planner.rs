//! Placement planner: turns zone geometry into an ordered list of drawing
//! primitives.
//!
//! Passes run in a fixed order and the order is part of the contract, since
//! later primitives paint over earlier ones:
//!
//! 1. gutter content (narrow edge lanes, or wide gutters), left then right
//! 2. top edge bus and its ground stitching
//! 3. bottom edge bus and its ground stitching
//! 4. cross-connections between the gutters
//! 5. left/right border stitching
//! 6. the hero fade, last, so it composites over everything beneath it

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::palette::Ink;
use crate::primitive::{FadeMask, GradientStop, Orientation, PackageShape, Primitive};
use crate::viewport::Viewport;
use crate::zones::ZoneGeometry;

/// The pass that emitted a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    NarrowLeft,
    NarrowRight,
    LeftGutter,
    RightGutter,
    TopEdge,
    BottomEdge,
    CrossConnect,
    BorderStitch,
    HeroFade,
}

impl Pass {
    /// Passes whose primitives must stay out of the content column.
    pub fn is_gutter(&self) -> bool {
        matches!(self, Pass::LeftGutter | Pass::RightGutter)
    }

    pub fn is_narrow_lane(&self) -> bool {
        matches!(self, Pass::NarrowLeft | Pass::NarrowRight)
    }
}

/// A primitive tagged with the pass that placed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPrimitive {
    pub pass: Pass,
    pub primitive: Primitive,
}

/// Ordered drawing instructions for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    items: Vec<PlacedPrimitive>,
}

impl PlacementPlan {
    pub fn items(&self) -> &[PlacedPrimitive] {
        &self.items
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.items.iter().map(|p| &p.primitive)
    }

    pub fn in_pass(&self, pass: Pass) -> impl Iterator<Item = &Primitive> {
        self.items
            .iter()
            .filter(move |p| p.pass == pass)
            .map(|p| &p.primitive)
    }

    pub fn has_pass(&self, pass: Pass) -> bool {
        self.items.iter().any(|p| p.pass == pass)
    }

    pub fn last(&self) -> Option<&PlacedPrimitive> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<PlacedPrimitive> for PlacementPlan {
    fn from_iter<I: IntoIterator<Item = PlacedPrimitive>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

// ── Per-side layout tables ───────────────────────────────────────────
//
// Horizontal offsets are measured from the lane or gutter bus toward the
// content column, so one table entry serves both sides with the sign flipped.

struct IcSpec {
    y_frac: f64,
    shape: PackageShape,
    label: &'static str,
}

/// A component offset from the bus: `inward` px toward content, `y_frac * H + dy` down.
struct Offset {
    inward: f64,
    y_frac: f64,
    dy: f64,
}

/// Horizontal run from the bus toward content, then a vertical bend of `rise`.
struct BendSpec {
    y_frac: f64,
    rise: f64,
}

struct LaneLayout {
    ics: [IcSpec; 3],
    passives: [f64; 2],
    /// Indices into `ics` that get a capacitor just below them.
    caps_below: [usize; 2],
    vias: [f64; 4],
    /// (y_frac, run, rise): stub from the IC pin edge out to `run`, then `rise`.
    bends: [(f64, f64, f64); 2],
}

struct GutterLayout {
    ics: [IcSpec; 3],
    passives: [f64; 2],
    caps: &'static [Offset],
    bends: [BendSpec; 2],
    labels: &'static [(&'static str, Offset)],
    secondary_vias: [f64; 3],
}

const fn dual(y_frac: f64, label: &'static str) -> IcSpec {
    IcSpec {
        y_frac,
        shape: PackageShape::DualRow,
        label,
    }
}

const fn at(inward: f64, y_frac: f64, dy: f64) -> Offset {
    Offset { inward, y_frac, dy }
}

const NARROW_LEFT: LaneLayout = LaneLayout {
    ics: [dual(0.18, "DAC"), dual(0.48, "CLK"), dual(0.78, "MEM")],
    passives: [0.33, 0.63],
    caps_below: [0, 1],
    vias: [0.1, 0.38, 0.58, 0.88],
    bends: [(0.18, 35.0, 20.0), (0.48, 30.0, -15.0)],
};

const NARROW_RIGHT: LaneLayout = LaneLayout {
    ics: [dual(0.25, "ADC"), dual(0.55, "MUX"), dual(0.85, "QPU")],
    passives: [0.4, 0.7],
    caps_below: [0, 1],
    vias: [0.15, 0.45, 0.65, 0.92],
    bends: [(0.25, 35.0, 20.0), (0.55, 30.0, -15.0)],
};

const LEFT_GUTTER: GutterLayout = GutterLayout {
    ics: [dual(0.2, "DAC"), dual(0.5, "CLK"), dual(0.8, "MEM")],
    passives: [0.35, 0.65],
    caps: &[at(20.0, 0.2, 24.0), at(20.0, 0.5, 24.0), at(-20.0, 0.8, -24.0)],
    bends: [
        BendSpec { y_frac: 0.2, rise: 30.0 },
        BendSpec { y_frac: 0.5, rise: -25.0 },
    ],
    labels: &[
        ("R1", at(0.0, 0.35, 16.0)),
        ("R2", at(0.0, 0.65, 16.0)),
        ("C1", at(20.0, 0.2, 36.0)),
    ],
    secondary_vias: [0.15, 0.45, 0.75],
};

const RIGHT_GUTTER: GutterLayout = GutterLayout {
    ics: [
        dual(0.25, "ADC"),
        dual(0.55, "MUX"),
        IcSpec {
            y_frac: 0.82,
            shape: PackageShape::QuadFlat,
            label: "QPU",
        },
    ],
    passives: [0.4, 0.68],
    caps: &[at(20.0, 0.25, 24.0), at(20.0, 0.55, 24.0)],
    bends: [
        BendSpec { y_frac: 0.25, rise: -20.0 },
        BendSpec { y_frac: 0.55, rise: 30.0 },
    ],
    labels: &[("R3", at(0.0, 0.4, 16.0)), ("C2", at(20.0, 0.25, 36.0))],
    secondary_vias: [0.2, 0.5, 0.85],
};

// Narrow-lane motif dimensions.
const LANE_BUS_WIDTH: f64 = 1.2;
const LANE_IC_SIZE: (f64, f64) = (34.0, 24.0);
const LANE_IC_PINS: u32 = 3;
const LANE_CAP_DROP: f64 = 20.0;
const LANE_VIA_RADIUS: f64 = 3.0;
const LANE_STUB_START: f64 = 17.0;
const LANE_STUB_WIDTH: f64 = 0.8;
const LANE_STUB_VIA_RADIUS: f64 = 2.5;

// Wide-gutter motif dimensions.
const GUTTER_BUS_WIDTH: f64 = 2.5;
const STUB_COUNT: u32 = 5;
const STUB_REACH: f64 = 0.4;
const STUB_CLEARANCE: f64 = 10.0;
const STUB_WIDTH: f64 = 1.5;
const STUB_BUS_VIA_RADIUS: f64 = 5.0;
const STUB_END_VIA_RADIUS: f64 = 4.0;
const GUTTER_IC_SIZE: (f64, f64) = (50.0, 34.0);
const GUTTER_IC_PINS: u32 = 4;
const QFP_SIZE: f64 = 55.0;
const QFP_PINS_PER_SIDE: u32 = 4;
const BEND_START: f64 = 35.0;
const BEND_WIDTH: f64 = 1.0;
const BEND_VIA_RADIUS: f64 = 3.0;
const SILK_LABEL_SIZE: f64 = 7.0;
const SECONDARY_OFFSET: f64 = 0.3;
const SECONDARY_SPAN: (f64, f64) = (0.1, 0.9);
const SECONDARY_WIDTH: f64 = 1.0;
const SECONDARY_VIA_RADIUS: f64 = 3.5;

// Edge, cross-connection and stitching dimensions.
const EDGE_BUS_WIDTH: f64 = 2.0;
const STITCH_VIA_RADIUS: f64 = 3.0;
const CROSS_WIDTH: f64 = 1.0;
const CROSS_BUS_VIA_RADIUS: f64 = 3.5;
const CROSS_VIA_RADIUS: f64 = 3.0;
const CROSS_TOP_FRACS: [f64; 2] = [0.35, 0.65];
const CROSS_BOTTOM_FRACS: [f64; 2] = [0.4, 0.6];

/// Plan the board for `viewport` with the stock layout.
pub fn plan(viewport: &Viewport) -> PlacementPlan {
    plan_with(viewport, &LayoutConfig::default())
}

/// Plan the board for `viewport`. Deterministic: equal inputs give equal plans.
pub fn plan_with(viewport: &Viewport, config: &LayoutConfig) -> PlacementPlan {
    let zones = ZoneGeometry::compute_with(viewport, config);
    plan_zones(&zones, config)
}

/// Plan the board for precomputed zones.
pub fn plan_zones(zones: &ZoneGeometry, config: &LayoutConfig) -> PlacementPlan {
    let mut planner = Planner {
        zones,
        config,
        items: Vec::new(),
        pass: Pass::TopEdge,
    };

    if zones.is_narrow_layout {
        planner.narrow_lanes();
    } else {
        if zones.left_gutter_width > config.gutter_min_width {
            planner.gutter(Side::Left, &LEFT_GUTTER);
        }
        if zones.right_gutter_width > config.gutter_min_width {
            planner.gutter(Side::Right, &RIGHT_GUTTER);
        }
    }
    planner.top_edge();
    planner.bottom_edge();
    if !zones.is_narrow_layout && zones.both_gutters_exceed(config.gutter_min_width) {
        planner.cross_connections();
    }
    planner.border_stitching();
    if !zones.is_narrow_layout {
        planner.hero_fade();
    }

    log::debug!(
        "planned {} primitives for {}x{} (narrow: {}, gutters: {:.1}/{:.1})",
        planner.items.len(),
        zones.width,
        zones.height,
        zones.is_narrow_layout,
        zones.left_gutter_width,
        zones.right_gutter_width,
    );

    PlacementPlan {
        items: planner.items,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the direction pointing from this side toward the content column.
    fn inward(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

struct Planner<'a> {
    zones: &'a ZoneGeometry,
    config: &'a LayoutConfig,
    items: Vec<PlacedPrimitive>,
    pass: Pass,
}

impl Planner<'_> {
    fn emit(&mut self, primitive: Primitive) {
        self.items.push(PlacedPrimitive {
            pass: self.pass,
            primitive,
        });
    }

    // ── Narrow layout ────────────────────────────────────────────────

    fn narrow_lanes(&mut self) {
        let left = self.config.narrow_lane_inset;
        let right = self.zones.width - self.config.narrow_lane_inset;

        self.pass = Pass::NarrowLeft;
        self.narrow_lane(left, &NARROW_LEFT);
        self.pass = Pass::NarrowRight;
        self.narrow_lane(right, &NARROW_RIGHT);

        // Stubs toward the content column are placed after both lanes.
        self.pass = Pass::NarrowLeft;
        self.narrow_stubs(left, Side::Left, &NARROW_LEFT);
        self.pass = Pass::NarrowRight;
        self.narrow_stubs(right, Side::Right, &NARROW_RIGHT);
    }

    fn narrow_lane(&mut self, x: f64, layout: &LaneLayout) {
        let h = self.zones.height;
        let (ic_w, ic_h) = LANE_IC_SIZE;

        self.emit(Primitive::line(x, 0.0, x, h, Ink::Copper, LANE_BUS_WIDTH));
        for ic in &layout.ics {
            self.emit(Primitive::dual_row(x, h * ic.y_frac, ic_w, ic_h, LANE_IC_PINS, ic.label));
        }
        for &frac in &layout.passives {
            self.emit(Primitive::two_pad(x, h * frac, Orientation::Vertical));
        }
        for &idx in &layout.caps_below {
            self.emit(Primitive::capacitor(x, h * layout.ics[idx].y_frac + LANE_CAP_DROP));
        }
        for &frac in &layout.vias {
            self.emit(Primitive::via(x, h * frac, LANE_VIA_RADIUS));
        }
    }

    fn narrow_stubs(&mut self, x: f64, side: Side, layout: &LaneLayout) {
        let h = self.zones.height;
        let dir = side.inward();
        for &(y_frac, run, rise) in &layout.bends {
            let y = h * y_frac;
            let start = x + dir * LANE_STUB_START;
            let corner = x + dir * run;
            self.emit(Primitive::line(start, y, corner, y, Ink::AccentMuted, LANE_STUB_WIDTH));
            self.emit(Primitive::line(corner, y, corner, y + rise, Ink::AccentMuted, LANE_STUB_WIDTH));
            self.emit(Primitive::via(corner, y + rise, LANE_STUB_VIA_RADIUS));
        }
    }

    // ── Wide layout ──────────────────────────────────────────────────

    fn gutter(&mut self, side: Side, layout: &GutterLayout) {
        let h = self.zones.height;
        let content = self.zones.content;
        let dir = side.inward();
        let (gutter, bus_x, stub_end) = match side {
            Side::Left => {
                let g = self.zones.left_gutter_width;
                let x = self.zones.left_gutter_center();
                (g, x, (x + g * STUB_REACH).min(content.left() - STUB_CLEARANCE))
            }
            Side::Right => {
                let g = self.zones.right_gutter_width;
                let x = self.zones.right_gutter_center();
                (g, x, (x - g * STUB_REACH).max(content.right() + STUB_CLEARANCE))
            }
        };
        self.pass = match side {
            Side::Left => Pass::LeftGutter,
            Side::Right => Pass::RightGutter,
        };

        self.emit(Primitive::line(bus_x, 0.0, bus_x, h, Ink::CopperBold, GUTTER_BUS_WIDTH));

        let spacing = h / f64::from(STUB_COUNT);
        for i in 1..STUB_COUNT {
            let y = (spacing * f64::from(i)).round();
            self.emit(Primitive::line(bus_x, y, stub_end, y, Ink::Copper, STUB_WIDTH));
            self.emit(Primitive::via(bus_x, y, STUB_BUS_VIA_RADIUS));
            self.emit(Primitive::via(stub_end, y, STUB_END_VIA_RADIUS));
        }

        if gutter > self.config.component_min_width {
            self.gutter_components(bus_x, dir, stub_end, layout);
        }

        if gutter > self.config.secondary_trace_min_width {
            let x = bus_x + dir * gutter * SECONDARY_OFFSET;
            let (top, bottom) = SECONDARY_SPAN;
            self.emit(Primitive::line(x, h * top, x, h * bottom, Ink::Copper, SECONDARY_WIDTH));
            for &frac in &layout.secondary_vias {
                self.emit(Primitive::via(x, h * frac, SECONDARY_VIA_RADIUS));
            }
        }
    }

    fn gutter_components(&mut self, bus_x: f64, dir: f64, stub_end: f64, layout: &GutterLayout) {
        let h = self.zones.height;
        let (ic_w, ic_h) = GUTTER_IC_SIZE;

        for ic in &layout.ics {
            let y = h * ic.y_frac;
            self.emit(match ic.shape {
                PackageShape::DualRow => {
                    Primitive::dual_row(bus_x, y, ic_w, ic_h, GUTTER_IC_PINS, ic.label)
                }
                PackageShape::QuadFlat => {
                    Primitive::quad_flat(bus_x, y, QFP_SIZE, QFP_PINS_PER_SIDE, ic.label)
                }
            });
        }
        for &frac in &layout.passives {
            self.emit(Primitive::two_pad(bus_x, h * frac, Orientation::Vertical));
        }
        for cap in layout.caps {
            self.emit(Primitive::capacitor(bus_x + dir * cap.inward, h * cap.y_frac + cap.dy));
        }

        for bend in &layout.bends {
            let y = h * bend.y_frac;
            self.emit(Primitive::line(bus_x + dir * BEND_START, y, stub_end, y, Ink::Accent, BEND_WIDTH));
            self.emit(Primitive::line(stub_end, y, stub_end, y + bend.rise, Ink::Accent, BEND_WIDTH));
            self.emit(Primitive::via(stub_end, y + bend.rise, BEND_VIA_RADIUS));
        }

        for (text, pos) in layout.labels {
            self.emit(Primitive::label(
                text,
                bus_x + dir * pos.inward,
                h * pos.y_frac + pos.dy,
                SILK_LABEL_SIZE,
            ));
        }
    }

    // ── Edges ────────────────────────────────────────────────────────

    fn top_edge(&mut self) {
        self.pass = Pass::TopEdge;
        let w = self.zones.width;
        let y = self.zones.top_band_y;
        let spacing = self.config.stitch_spacing(w);
        self.emit(Primitive::line(0.0, y, w, y, Ink::CopperBold, EDGE_BUS_WIDTH));
        for x in stitch_positions(spacing, spacing, w) {
            self.emit(Primitive::via(x, y, STITCH_VIA_RADIUS));
        }
    }

    fn bottom_edge(&mut self) {
        self.pass = Pass::BottomEdge;
        let w = self.zones.width;
        let y = self.zones.bottom_band_y;
        let spacing = self.config.stitch_spacing(w);
        self.emit(Primitive::line(0.0, y, w, y, Ink::CopperBold, EDGE_BUS_WIDTH));
        // Half-phase shifted so top and bottom vias do not line up.
        for x in stitch_positions(spacing * 0.5, spacing, w) {
            self.emit(Primitive::via(x, y, STITCH_VIA_RADIUS));
        }
    }

    fn cross_connections(&mut self) {
        self.pass = Pass::CrossConnect;
        let w = self.zones.width;
        let inset = self.config.cross_connect_inset;
        let rows = [
            (inset, CROSS_TOP_FRACS),
            (self.zones.height - inset, CROSS_BOTTOM_FRACS),
        ];
        for (y, fracs) in rows {
            self.emit(Primitive::line(0.0, y, w, y, Ink::Copper, CROSS_WIDTH));
            self.emit(Primitive::via(self.zones.left_gutter_center(), y, CROSS_BUS_VIA_RADIUS));
            self.emit(Primitive::via(self.zones.right_gutter_center(), y, CROSS_BUS_VIA_RADIUS));
            for frac in fracs {
                self.emit(Primitive::via(w * frac, y, CROSS_VIA_RADIUS));
            }
        }
    }

    fn border_stitching(&mut self) {
        self.pass = Pass::BorderStitch;
        let w = self.zones.width;
        let h = self.zones.height;
        let inset = self.config.border_stitch_inset;
        let spacing = self.config.stitch_spacing(h);
        for y in stitch_positions(spacing, spacing, h) {
            self.emit(Primitive::via(inset, y, STITCH_VIA_RADIUS));
            self.emit(Primitive::via(w - inset, y, STITCH_VIA_RADIUS));
        }
    }

    fn hero_fade(&mut self) {
        self.pass = Pass::HeroFade;
        self.emit(Primitive::FadeMask(FadeMask {
            rect: self.zones.hero_exclusion,
            stops: vec![
                GradientStop::new(0.0, 1.0),
                GradientStop::new(0.85, 0.95),
                GradientStop::new(1.0, 0.0),
            ],
        }));
    }
}

/// `start, start + step, ...` while below `limit`. Empty for a non-positive step.
fn stitch_positions(start: f64, step: f64, limit: f64) -> impl Iterator<Item = f64> {
    std::iter::successors((step > 0.0).then_some(start), move |x| Some(x + step))
        .take_while(move |x| *x < limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{IcPackage, Line};

    fn ics(plan: &PlacementPlan, pass: Pass) -> Vec<&IcPackage> {
        plan.in_pass(pass)
            .filter_map(|p| match p {
                Primitive::IcPackage(ic) => Some(ic),
                _ => None,
            })
            .collect()
    }

    fn lines(plan: &PlacementPlan, pass: Pass) -> Vec<&Line> {
        plan.in_pass(pass)
            .filter_map(|p| match p {
                Primitive::Line(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_stitch_positions() {
        let xs: Vec<f64> = stitch_positions(70.0, 70.0, 300.0).collect();
        assert_eq!(xs, vec![70.0, 140.0, 210.0, 280.0]);
        assert_eq!(stitch_positions(0.0, 0.0, 100.0).count(), 0);
        assert_eq!(stitch_positions(35.0, 70.0, f64::NAN).count(), 0);
    }

    #[test]
    fn test_pass_order_is_fixed() {
        let plan = plan(&Viewport::new(1440.0, 900.0));
        let order = [
            Pass::LeftGutter,
            Pass::RightGutter,
            Pass::TopEdge,
            Pass::BottomEdge,
            Pass::CrossConnect,
            Pass::BorderStitch,
            Pass::HeroFade,
        ];
        let rank = |pass: Pass| order.iter().position(|p| *p == pass).unwrap();
        let ranks: Vec<usize> = plan.items().iter().map(|p| rank(p.pass)).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_left_gutter_stubs_stop_short_of_content() {
        let plan = plan(&Viewport::new(1440.0, 900.0));
        let stubs: Vec<&Line> = lines(&plan, Pass::LeftGutter)
            .into_iter()
            .filter(|l| l.is_horizontal() && l.ink == Ink::Copper)
            .collect();
        assert_eq!(stubs.len(), 4);
        // Gutter 120: bus at 60, reach 60 + 48 = 108 = min(108, 110).
        assert!(stubs.iter().all(|l| l.from.x == 60.0 && l.to.x == 108.0));
        let ys: Vec<f64> = stubs.iter().map(|l| l.from.y).collect();
        assert_eq!(ys, vec![180.0, 360.0, 540.0, 720.0]);
    }

    #[test]
    fn test_right_gutter_has_quad_flat() {
        let plan = plan(&Viewport::new(1440.0, 900.0));
        let right = ics(&plan, Pass::RightGutter);
        let labels: Vec<&str> = right.iter().map(|ic| ic.label.as_str()).collect();
        assert_eq!(labels, vec!["ADC", "MUX", "QPU"]);
        assert_eq!(right[2].shape, PackageShape::QuadFlat);
        assert!(ics(&plan, Pass::LeftGutter)
            .iter()
            .all(|ic| ic.shape == PackageShape::DualRow));
    }

    #[test]
    fn test_right_gutter_mirrors_offsets() {
        let plan = plan(&Viewport::new(1440.0, 900.0));
        let caps: Vec<f64> = plan
            .in_pass(Pass::RightGutter)
            .filter_map(|p| match p {
                Primitive::Passive(c) if c.kind == crate::primitive::PassiveKind::Capacitor => {
                    Some(c.center.x)
                }
                _ => None,
            })
            .collect();
        // Right bus at 1380; capacitors sit 20px toward the content column.
        assert_eq!(caps, vec![1360.0, 1360.0]);
    }

    #[test]
    fn test_bottom_stitching_is_half_phase() {
        let plan = plan(&Viewport::new(900.0, 700.0));
        let first_via_x = |pass| {
            plan.in_pass(pass).find_map(|p| match p {
                Primitive::Via(v) => Some(v.center.x),
                _ => None,
            })
        };
        assert_eq!(first_via_x(Pass::TopEdge), Some(70.0));
        assert_eq!(first_via_x(Pass::BottomEdge), Some(35.0));
    }

    #[test]
    fn test_border_stitching_alternates_sides() {
        let plan = plan(&Viewport::new(1000.0, 700.0));
        let xs: Vec<f64> = plan
            .in_pass(Pass::BorderStitch)
            .filter_map(|p| match p {
                Primitive::Via(v) => Some(v.center.x),
                _ => None,
            })
            .collect();
        assert_eq!(&xs[..4], &[12.0, 988.0, 12.0, 988.0]);
        // Spacing max(70, 49) = 70 over height 700: 70..=630.
        assert_eq!(xs.len(), 18);
    }

    #[test]
    fn test_narrow_stubs_point_inward() {
        let plan = plan(&Viewport::new(600.0, 800.0));
        let accents: Vec<&Line> = plan
            .primitives()
            .filter_map(|p| match p {
                Primitive::Line(l) if l.ink == Ink::AccentMuted => Some(l),
                _ => None,
            })
            .collect();
        assert_eq!(accents.len(), 8);
        assert_eq!(accents[0].from.x, 35.0);
        assert_eq!(accents[0].to.x, 53.0);
        assert_eq!(accents[4].from.x, 565.0);
        assert_eq!(accents[4].to.x, 547.0);
    }

    #[test]
    fn test_secondary_trace_threshold() {
        // Gutter 70: secondary trace but no components.
        let plan = plan(&Viewport::new(1340.0, 900.0));
        let left = lines(&plan, Pass::LeftGutter);
        assert!(left.iter().any(|l| l.is_vertical() && l.ink == Ink::Copper));
        assert!(ics(&plan, Pass::LeftGutter).is_empty());
    }
}
