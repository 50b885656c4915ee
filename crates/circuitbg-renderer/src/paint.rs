//! Paint recipes, one per drawing primitive.
//!
//! Each recipe is a fixed sequence of surface calls against the board
//! palette. Recipes hold no state between calls and never fail; malformed
//! geometry (negative sizes and the like) is the caller's problem.

use std::f64::consts::{FRAC_PI_2, TAU};

use circuitbg_core::primitive::{
    FadeMask, IcPackage, Label, Line, Orientation, PackageShape, PassiveComponent, PassiveKind,
    Via, DUAL_ROW_PIN_LENGTH, DUAL_ROW_PIN_WIDTH, QUAD_FLAT_PIN_LENGTH, QUAD_FLAT_PIN_WIDTH,
};
use circuitbg_core::{Palette, PlacementPlan, Point, Primitive, Rect};

use crate::round_rect::RoundRectPath;
use crate::surface::{ColorStop, DrawSurface, FontSpec, LineCap, Paint, TextAlign, TextBaseline};

const VIA_RING_WIDTH: f64 = 1.4;
const VIA_HOLE_RATIO: f64 = 0.35;
const VIA_HOLE_RING_WIDTH: f64 = 0.7;

const IC_OUTLINE_WIDTH: f64 = 1.2;
const DUAL_ROW_CORNER: f64 = 4.0;
const QUAD_FLAT_CORNER: f64 = 5.0;
const PIN_OUTLINE_WIDTH: f64 = 0.6;
const QUAD_PIN_OUTLINE_WIDTH: f64 = 0.5;
const DIE_INSET: f64 = 0.22;
const DIE_OUTLINE_WIDTH: f64 = 0.6;

const PAD_OUTLINE_WIDTH: f64 = 0.5;

/// Paints primitives onto a surface.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    palette: Palette,
    round_rect: RoundRectPath,
}

impl Painter {
    /// Painter for `surface`, probing its rounded-rectangle support once.
    pub fn for_surface<S: DrawSurface + ?Sized>(surface: &S, palette: Palette) -> Self {
        Self {
            palette,
            round_rect: RoundRectPath::detect(surface),
        }
    }

    /// Wipe the surface and lay down the white board.
    pub fn paint_background<S: DrawSurface + ?Sized>(&self, surface: &mut S, width: f64, height: f64) {
        surface.clear(self.palette.background.with_alpha(0.0));
        surface.set_fill(Paint::Solid(self.palette.background));
        surface.fill_rect(Rect::new(0.0, 0.0, width, height));
    }

    /// Paint every primitive of `plan` in order. Returns the number painted.
    pub fn paint_plan<S: DrawSurface + ?Sized>(&self, surface: &mut S, plan: &PlacementPlan) -> usize {
        let mut painted = 0;
        for placed in plan.items() {
            log::trace!("paint {:?} {}", placed.pass, placed.primitive.kind_name());
            self.paint(surface, &placed.primitive);
            painted += 1;
        }
        painted
    }

    pub fn paint<S: DrawSurface + ?Sized>(&self, surface: &mut S, primitive: &Primitive) {
        match primitive {
            Primitive::Via(via) => self.via(surface, via),
            Primitive::Line(line) => self.line(surface, line),
            Primitive::IcPackage(ic) => match ic.shape {
                PackageShape::DualRow => self.dual_row(surface, ic),
                PackageShape::QuadFlat => self.quad_flat(surface, ic),
            },
            Primitive::Passive(part) => match part.kind {
                PassiveKind::TwoPad => self.two_pad(surface, part),
                PassiveKind::Capacitor => self.capacitor(surface, part),
            },
            Primitive::Label(label) => self.label(surface, label),
            Primitive::FadeMask(mask) => self.fade(surface, mask),
        }
    }

    fn via<S: DrawSurface + ?Sized>(&self, surface: &mut S, via: &Via) {
        let Point { x, y } = via.center;
        let p = &self.palette;

        surface.begin_path();
        surface.arc(x, y, via.radius, 0.0, TAU);
        surface.set_fill(p.via_fill.into());
        surface.fill();
        surface.set_stroke(p.via_ring);
        surface.set_line_width(VIA_RING_WIDTH);
        surface.stroke();

        surface.begin_path();
        surface.arc(x, y, via.radius * VIA_HOLE_RATIO, 0.0, TAU);
        surface.set_fill(p.via_hole.into());
        surface.fill();
        surface.set_stroke(p.via_ring);
        surface.set_line_width(VIA_HOLE_RING_WIDTH);
        surface.stroke();
    }

    fn line<S: DrawSurface + ?Sized>(&self, surface: &mut S, line: &Line) {
        surface.begin_path();
        surface.move_to(line.from.x, line.from.y);
        surface.line_to(line.to.x, line.to.y);
        surface.set_stroke(self.palette.ink(line.ink));
        surface.set_line_width(line.width);
        surface.set_line_cap(LineCap::Round);
        surface.stroke();
    }

    fn package_body<S: DrawSurface + ?Sized>(&self, surface: &mut S, body: Rect, corner: f64) {
        surface.set_fill(self.palette.ic_fill.into());
        surface.set_stroke(self.palette.ic_stroke);
        surface.set_line_width(IC_OUTLINE_WIDTH);
        surface.begin_path();
        self.round_rect.append(surface, body, corner);
        surface.fill();
        surface.stroke();
    }

    fn orientation_dot<S: DrawSurface + ?Sized>(&self, surface: &mut S, x: f64, y: f64, radius: f64) {
        surface.begin_path();
        surface.arc(x, y, radius, 0.0, TAU);
        surface.set_fill(self.palette.ic_stroke.into());
        surface.fill();
    }

    fn pad<S: DrawSurface + ?Sized>(&self, surface: &mut S, rect: Rect) {
        surface.fill_rect(rect);
        surface.stroke_rect(rect);
    }

    fn pad_style<S: DrawSurface + ?Sized>(&self, surface: &mut S, outline: f64) {
        surface.set_fill(self.palette.pad_fill.into());
        surface.set_stroke(self.palette.copper);
        surface.set_line_width(outline);
    }

    fn package_label<S: DrawSurface + ?Sized>(&self, surface: &mut S, text: &str, at: Point, size: f64) {
        if text.is_empty() {
            return;
        }
        surface.set_fill(self.palette.silkscreen.into());
        surface.set_font(FontSpec::mono(600, size));
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.fill_text(text, at.x, at.y);
    }

    fn dual_row<S: DrawSurface + ?Sized>(&self, surface: &mut S, ic: &IcPackage) {
        let body = ic.body();
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = body;
        let cy = ic.center.y;

        self.package_body(surface, body, DUAL_ROW_CORNER);
        self.orientation_dot(surface, x + 6.0, y + 6.0, 2.0);

        // Pin-1 notch on the left edge.
        surface.begin_path();
        surface.arc(x, cy, 3.0, -FRAC_PI_2, FRAC_PI_2);
        surface.set_stroke(self.palette.ic_stroke);
        surface.set_line_width(0.8);
        surface.stroke();

        let spacing = h / f64::from(ic.pin_count + 1);
        let half_pin = DUAL_ROW_PIN_WIDTH / 2.0;
        for i in 1..=ic.pin_count {
            let py = y + f64::from(i) * spacing;
            self.pad_style(surface, PIN_OUTLINE_WIDTH);
            self.pad(
                surface,
                Rect::new(x - DUAL_ROW_PIN_LENGTH, py - half_pin, DUAL_ROW_PIN_LENGTH, DUAL_ROW_PIN_WIDTH),
            );
            self.pad(
                surface,
                Rect::new(x + w, py - half_pin, DUAL_ROW_PIN_LENGTH, DUAL_ROW_PIN_WIDTH),
            );
        }

        self.package_label(surface, &ic.label, ic.center, 9.0);
    }

    fn quad_flat<S: DrawSurface + ?Sized>(&self, surface: &mut S, ic: &IcPackage) {
        let body = ic.body();
        let Rect { x, y, width: size, .. } = body;
        let len = QUAD_FLAT_PIN_LENGTH;
        let pin = QUAD_FLAT_PIN_WIDTH;

        self.package_body(surface, body, QUAD_FLAT_CORNER);

        let inset = size * DIE_INSET;
        surface.set_stroke(self.palette.die_outline);
        surface.set_line_width(DIE_OUTLINE_WIDTH);
        surface.stroke_rect(Rect::new(x + inset, y + inset, size - inset * 2.0, size - inset * 2.0));

        self.orientation_dot(surface, x + 8.0, y + 8.0, 2.5);

        let spacing = size / f64::from(ic.pin_count + 1);
        for i in 1..=ic.pin_count {
            let offset = f64::from(i) * spacing;
            self.pad_style(surface, QUAD_PIN_OUTLINE_WIDTH);
            // Top, bottom, left, right.
            self.pad(surface, Rect::new(x + offset - pin / 2.0, y - len, pin, len));
            self.pad(surface, Rect::new(x + offset - pin / 2.0, y + size, pin, len));
            self.pad(surface, Rect::new(x - len, y + offset - pin / 2.0, len, pin));
            self.pad(surface, Rect::new(x + size, y + offset - pin / 2.0, len, pin));
        }

        self.package_label(surface, &ic.label, ic.center, 10.0);
    }

    fn two_pad<S: DrawSurface + ?Sized>(&self, surface: &mut S, part: &PassiveComponent) {
        let Point { x: cx, y: cy } = part.center;
        self.pad_style(surface, PAD_OUTLINE_WIDTH);
        let (pads, outline) = match part.orientation {
            Orientation::Vertical => (
                [
                    Rect::new(cx - 3.0, cy - 7.0, 6.0, 4.0),
                    Rect::new(cx - 3.0, cy + 3.0, 6.0, 4.0),
                ],
                Rect::new(cx - 2.5, cy - 3.0, 5.0, 6.0),
            ),
            Orientation::Horizontal => (
                [
                    Rect::new(cx - 7.0, cy - 3.0, 4.0, 6.0),
                    Rect::new(cx + 3.0, cy - 3.0, 4.0, 6.0),
                ],
                Rect::new(cx - 3.0, cy - 2.5, 6.0, 5.0),
            ),
        };
        for rect in pads {
            self.pad(surface, rect);
        }
        surface.set_stroke(self.palette.silkscreen);
        surface.set_line_width(0.8);
        surface.stroke_rect(outline);
    }

    fn capacitor<S: DrawSurface + ?Sized>(&self, surface: &mut S, part: &PassiveComponent) {
        let Point { x: cx, y: cy } = part.center;
        self.pad_style(surface, PAD_OUTLINE_WIDTH);
        for dx in [-5.0, 5.0] {
            surface.begin_path();
            surface.arc(cx + dx, cy, 3.0, 0.0, TAU);
            surface.fill();
            surface.stroke();
        }
        surface.set_stroke(self.palette.silkscreen);
        surface.set_line_width(0.6);
        surface.stroke_rect(Rect::new(cx - 4.0, cy - 3.0, 8.0, 6.0));
    }

    fn label<S: DrawSurface + ?Sized>(&self, surface: &mut S, label: &Label) {
        surface.set_fill(self.palette.silkscreen.into());
        surface.set_font(FontSpec::mono(500, label.size));
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.fill_text(&label.text, label.position.x, label.position.y);
    }

    fn fade<S: DrawSurface + ?Sized>(&self, surface: &mut S, mask: &FadeMask) {
        let rect = mask.rect;
        let stops = mask
            .stops
            .iter()
            .map(|stop| ColorStop {
                offset: stop.offset,
                color: self.palette.fade.with_alpha(stop.alpha as f32),
            })
            .collect();
        surface.set_fill(Paint::LinearGradient {
            start: Point::new(rect.x, rect.top()),
            end: Point::new(rect.x, rect.bottom()),
            stops,
        });
        surface.fill_rect(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawOp, RecordingSurface};
    use circuitbg_core::{Ink, Viewport};

    fn record(primitive: Primitive) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        Painter::for_surface(&surface, Palette::default()).paint(&mut surface, &primitive);
        surface
    }

    #[test]
    fn test_via_is_ring_and_hole() {
        let surface = record(Primitive::via(10.0, 20.0, 5.0));
        let arcs: Vec<f64> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![5.0, 5.0 * VIA_HOLE_RATIO]);
        assert!(surface.ops().contains(&DrawOp::SetFill {
            paint: Paint::Solid(Palette::default().via_hole)
        }));
    }

    #[test]
    fn test_line_uses_ink_and_round_cap() {
        let surface = record(Primitive::line(0.0, 20.0, 100.0, 20.0, Ink::CopperBold, 2.0));
        let ops = surface.ops();
        assert!(ops.contains(&DrawOp::SetStroke {
            color: Palette::default().copper_bold
        }));
        assert!(ops.contains(&DrawOp::SetLineCap { cap: LineCap::Round }));
        assert_eq!(ops.last(), Some(&DrawOp::Stroke));
    }

    #[test]
    fn test_dual_row_pins_both_sides() {
        let surface = record(Primitive::dual_row(100.0, 100.0, 50.0, 34.0, 4, "DAC"));
        // Four pins per side, each filled and outlined.
        assert_eq!(surface.count(|op| matches!(op, DrawOp::FillRect { .. })), 8);
        assert_eq!(surface.count(|op| matches!(op, DrawOp::StrokeRect { .. })), 8);
        assert!(surface.ops().contains(&DrawOp::FillText {
            text: "DAC".to_string(),
            x: 100.0,
            y: 100.0
        }));
    }

    #[test]
    fn test_quad_flat_pins_four_sides_and_die() {
        let surface = record(Primitive::quad_flat(100.0, 100.0, 55.0, 4, "QPU"));
        assert_eq!(surface.count(|op| matches!(op, DrawOp::FillRect { .. })), 16);
        // 16 pin outlines plus the die.
        assert_eq!(surface.count(|op| matches!(op, DrawOp::StrokeRect { .. })), 17);
        assert!(surface.ops().contains(&DrawOp::SetFont {
            font: FontSpec::mono(600, 10.0)
        }));
    }

    #[test]
    fn test_unlabelled_package_draws_no_text() {
        let surface = record(Primitive::dual_row(0.0, 0.0, 34.0, 24.0, 3, ""));
        assert_eq!(surface.count(|op| matches!(op, DrawOp::FillText { .. })), 0);
    }

    #[test]
    fn test_capacitor_has_round_pads() {
        let surface = record(Primitive::capacitor(50.0, 50.0));
        let centers: Vec<f64> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Arc { cx, .. } => Some(*cx),
                _ => None,
            })
            .collect();
        assert_eq!(centers, vec![45.0, 55.0]);
    }

    #[test]
    fn test_two_pad_orientation() {
        let vertical = record(Primitive::two_pad(50.0, 50.0, Orientation::Vertical));
        assert!(vertical.ops().contains(&DrawOp::FillRect {
            rect: Rect::new(47.0, 43.0, 6.0, 4.0)
        }));
        let horizontal = record(Primitive::two_pad(50.0, 50.0, Orientation::Horizontal));
        assert!(horizontal.ops().contains(&DrawOp::FillRect {
            rect: Rect::new(43.0, 47.0, 4.0, 6.0)
        }));
    }

    #[test]
    fn test_fade_gradient_runs_top_to_bottom() {
        let plan = circuitbg_core::plan(&Viewport::new(1440.0, 900.0));
        let mask = plan.primitives().last().cloned().unwrap();
        let surface = record(mask);
        match &surface.ops()[0] {
            DrawOp::SetFill {
                paint: Paint::LinearGradient { start, end, stops },
            } => {
                assert_eq!(start.y, 0.0);
                assert_eq!(end.y, 500.0);
                assert_eq!(stops.len(), 3);
                assert_eq!(stops[1].color.a, 0.95);
            }
            other => panic!("unexpected first op {other:?}"),
        }
        assert_eq!(
            surface.ops()[1],
            DrawOp::FillRect {
                rect: Rect::new(100.0, 0.0, 1240.0, 500.0)
            }
        );
    }

    #[test]
    fn test_paint_plan_visits_every_primitive() {
        let plan = circuitbg_core::plan(&Viewport::new(600.0, 800.0));
        let mut surface = RecordingSurface::new();
        let painter = Painter::for_surface(&surface, Palette::default());
        assert_eq!(painter.paint_plan(&mut surface, &plan), plan.len());
    }

    #[test]
    fn test_background_is_white() {
        let mut surface = RecordingSurface::new();
        let painter = Painter::for_surface(&surface, Palette::default());
        painter.paint_background(&mut surface, 800.0, 600.0);
        assert_eq!(
            surface.ops()[2],
            DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, 800.0, 600.0)
            }
        );
    }
}
