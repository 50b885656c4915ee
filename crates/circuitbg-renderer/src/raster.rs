//! CPU pixel surface backed by `tiny-skia`, with optional `fontdue` text.

use std::f64::consts::{FRAC_PI_2, PI};

use tiny_skia::{
    FillRule, LinearGradient, PathBuilder, Pixmap, PixmapPaint, SpreadMode, Stroke, Transform,
};

use circuitbg_core::{Rect, Rgba};

use crate::error::SurfaceError;
use crate::surface::{DrawSurface, FontSpec, LineCap, Paint, TextAlign, TextBaseline};
use crate::viewport::SurfaceMetrics;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Move(f64, f64),
    Line(f64, f64),
    Cubic(f64, f64, f64, f64, f64, f64),
    Close,
}

/// A pixel buffer sized for a viewport.
///
/// Paths are collected in logical coordinates and scaled into the buffer at
/// fill/stroke time, so callers never see the device pixel ratio.
pub struct RasterSurface {
    pixmap: Pixmap,
    metrics: SurfaceMetrics,
    font: Option<fontdue::Font>,

    fill: Paint,
    stroke_color: Rgba,
    line_width: f64,
    line_cap: LineCap,
    font_spec: FontSpec,
    align: TextAlign,
    baseline: TextBaseline,

    path: Vec<Segment>,
    current: Option<(f64, f64)>,
    subpath_start: Option<(f64, f64)>,
}

impl RasterSurface {
    pub fn new(metrics: SurfaceMetrics) -> Result<Self, SurfaceError> {
        Ok(Self {
            pixmap: allocate(&metrics)?,
            metrics,
            font: None,
            fill: Paint::Solid(Rgba::new(0, 0, 0, 1.0)),
            stroke_color: Rgba::new(0, 0, 0, 1.0),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            font_spec: FontSpec::default(),
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
            path: Vec::new(),
            current: None,
            subpath_start: None,
        })
    }

    /// Load a TrueType/OpenType face for silkscreen text.
    ///
    /// Without a face, text calls are skipped.
    pub fn with_font_bytes(mut self, bytes: &[u8]) -> Result<Self, SurfaceError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| SurfaceError::Font(e.to_string()))?;
        self.font = Some(font);
        Ok(self)
    }

    /// Reallocate the buffer for new metrics. Contents are discarded.
    pub fn resize(&mut self, metrics: SurfaceMetrics) -> Result<(), SurfaceError> {
        if metrics.pixel_width != self.pixmap.width() || metrics.pixel_height != self.pixmap.height() {
            self.pixmap = allocate(&metrics)?;
        }
        self.metrics = metrics;
        self.begin_path();
        Ok(())
    }

    pub fn metrics(&self) -> &SurfaceMetrics {
        &self.metrics
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Straight-alpha RGBA of one buffer pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    fn transform(&self) -> Transform {
        let s = self.metrics.scale as f32;
        Transform::from_scale(s, s)
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for seg in &self.path {
            match *seg {
                Segment::Move(x, y) => pb.move_to(x as f32, y as f32),
                Segment::Line(x, y) => pb.line_to(x as f32, y as f32),
                Segment::Cubic(x1, y1, x2, y2, x, y) => pb.cubic_to(
                    x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
                ),
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }

    fn stroke_style(&self) -> Stroke {
        Stroke {
            width: self.line_width as f32,
            line_cap: match self.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            ..Stroke::default()
        }
    }

    fn push_point(&mut self, seg: Segment, x: f64, y: f64) {
        self.path.push(seg);
        self.current = Some((x, y));
    }

    /// Line to (x, y), or start a subpath there if there is no current point.
    fn connect(&mut self, x: f64, y: f64) {
        if self.current.is_some() {
            self.push_point(Segment::Line(x, y), x, y);
        } else {
            self.move_to(x, y);
        }
    }

    /// Cubic approximation of a circular arc, split into quarter turns at most.
    fn arc_segments(&mut self, cx: f64, cy: f64, r: f64, start: f64, sweep: f64) {
        let steps = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / steps as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        for i in 0..steps {
            let a = start + step * i as f64;
            let b = a + step;
            let (sa, ca) = a.sin_cos();
            let (sb, cb) = b.sin_cos();
            let (x0, y0) = (cx + r * ca, cy + r * sa);
            let (x3, y3) = (cx + r * cb, cy + r * sb);
            let (x1, y1) = (x0 - k * r * sa, y0 + k * r * ca);
            let (x2, y2) = (x3 + k * r * sb, y3 - k * r * cb);
            self.push_point(Segment::Cubic(x1, y1, x2, y2, x3, y3), x3, y3);
        }
    }

    fn solid_fill_color(&self) -> Rgba {
        match &self.fill {
            Paint::Solid(color) => *color,
            Paint::LinearGradient { stops, .. } => stops.first().map(|s| s.color).unwrap_or_default(),
        }
    }

    fn blit_glyph(&mut self, metrics: &fontdue::Metrics, coverage: &[u8], left: f32, top: f32, color: Rgba) {
        let (Ok(w), Ok(h)) = (u32::try_from(metrics.width), u32::try_from(metrics.height)) else {
            return;
        };
        let Some(mut glyph) = Pixmap::new(w, h) else {
            return;
        };
        let alpha = color.a.clamp(0.0, 1.0);
        for (px, &cov) in glyph.data_mut().chunks_exact_mut(4).zip(coverage) {
            let a = alpha * f32::from(cov) / 255.0;
            px[0] = (f32::from(color.r) * a).round() as u8;
            px[1] = (f32::from(color.g) * a).round() as u8;
            px[2] = (f32::from(color.b) * a).round() as u8;
            px[3] = (255.0 * a).round() as u8;
        }
        self.pixmap.draw_pixmap(
            left.round() as i32,
            top.round() as i32,
            glyph.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

fn allocate(metrics: &SurfaceMetrics) -> Result<Pixmap, SurfaceError> {
    Pixmap::new(metrics.pixel_width, metrics.pixel_height).ok_or(SurfaceError::Allocation {
        width: metrics.pixel_width,
        height: metrics.pixel_height,
    })
}

fn sk_color(color: Rgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.alpha_u8())
}

fn sk_paint(paint: &Paint) -> tiny_skia::Paint<'static> {
    let mut sk = tiny_skia::Paint {
        anti_alias: true,
        ..tiny_skia::Paint::default()
    };
    match paint {
        Paint::Solid(color) => sk.set_color(sk_color(*color)),
        Paint::LinearGradient { start, end, stops } => {
            let sk_stops = stops
                .iter()
                .map(|s| tiny_skia::GradientStop::new(s.offset as f32, sk_color(s.color)))
                .collect();
            match LinearGradient::new(
                tiny_skia::Point::from_xy(start.x as f32, start.y as f32),
                tiny_skia::Point::from_xy(end.x as f32, end.y as f32),
                sk_stops,
                SpreadMode::Pad,
                Transform::identity(),
            ) {
                Some(shader) => sk.shader = shader,
                None => {
                    if let Some(first) = stops.first() {
                        sk.set_color(sk_color(first.color));
                    }
                }
            }
        }
    }
    sk
}

fn sk_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
}

/// Wrap an angle into (-PI, PI].
fn wrap_angle(mut a: f64) -> f64 {
    while a <= -PI {
        a += 2.0 * PI;
    }
    while a > PI {
        a -= 2.0 * PI;
    }
    a
}

impl DrawSurface for RasterSurface {
    fn clear(&mut self, color: Rgba) {
        self.pixmap.fill(sk_color(color));
    }

    fn set_fill(&mut self, paint: Paint) {
        self.fill = paint;
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn set_font(&mut self, font: FontSpec) {
        self.font_spec = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push_point(Segment::Move(x, y), x, y);
        self.subpath_start = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.connect(x, y);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        if !(radius > 0.0) {
            self.connect(cx, cy);
            return;
        }
        let full = 2.0 * PI;
        let sweep = if end - start >= full {
            full
        } else {
            (end - start).rem_euclid(full)
        };
        self.connect(cx + radius * start.cos(), cy + radius * start.sin());
        self.arc_segments(cx, cy, radius, start, sweep);
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) {
        let Some((x0, y0)) = self.current else {
            self.move_to(x1, y1);
            return;
        };
        let (v1x, v1y) = (x0 - x1, y0 - y1);
        let (v2x, v2y) = (x2 - x1, y2 - y1);
        let l1 = v1x.hypot(v1y);
        let l2 = v2x.hypot(v2y);
        let cross = v1x * v2y - v1y * v2x;
        if !(radius > 0.0) || l1 == 0.0 || l2 == 0.0 || cross.abs() < 1e-9 {
            self.connect(x1, y1);
            return;
        }

        let (u1x, u1y) = (v1x / l1, v1y / l1);
        let (u2x, u2y) = (v2x / l2, v2y / l2);
        let angle = (u1x * u2x + u1y * u2y).clamp(-1.0, 1.0).acos();
        let tangent = radius / (angle / 2.0).tan();
        let (t1x, t1y) = (x1 + u1x * tangent, y1 + u1y * tangent);
        let (t2x, t2y) = (x1 + u2x * tangent, y1 + u2y * tangent);

        let (bx, by) = (u1x + u2x, u1y + u2y);
        let bl = bx.hypot(by);
        let reach = radius / (angle / 2.0).sin();
        let (cx, cy) = (x1 + bx / bl * reach, y1 + by / bl * reach);

        self.connect(t1x, t1y);
        let a0 = (t1y - cy).atan2(t1x - cx);
        let a1 = (t2y - cy).atan2(t2x - cx);
        self.arc_segments(cx, cy, radius, a0, wrap_angle(a1 - a0));
    }

    fn close_path(&mut self) {
        self.path.push(Segment::Close);
        self.current = self.subpath_start;
    }

    fn fill(&mut self) {
        if let Some(path) = self.build_path() {
            let paint = sk_paint(&self.fill);
            let transform = self.transform();
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }

    fn stroke(&mut self) {
        if let Some(path) = self.build_path() {
            let paint = sk_paint(&Paint::Solid(self.stroke_color));
            let stroke = self.stroke_style();
            let transform = self.transform();
            self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        if let Some(r) = sk_rect(rect) {
            let paint = sk_paint(&self.fill);
            let transform = self.transform();
            self.pixmap.fill_rect(r, &paint, transform, None);
        }
    }

    fn stroke_rect(&mut self, rect: Rect) {
        if let Some(path) = sk_rect(rect).map(PathBuilder::from_rect) {
            let paint = sk_paint(&Paint::Solid(self.stroke_color));
            let stroke = self.stroke_style();
            let transform = self.transform();
            self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let Some(font) = self.font.as_ref() else {
            log::trace!("no font loaded, skipping text {text:?}");
            return;
        };
        let scale = self.metrics.scale;
        let px = (self.font_spec.size * scale) as f32;
        let glyphs: Vec<(fontdue::Metrics, Vec<u8>)> =
            text.chars().map(|ch| font.rasterize(ch, px)).collect();
        let (ascent, descent) = font
            .horizontal_line_metrics(px)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((px * 0.8, -px * 0.2));

        let advance: f32 = glyphs.iter().map(|(m, _)| m.advance_width).sum();
        let mut pen = (x * scale) as f32
            - match self.align {
                TextAlign::Start => 0.0,
                TextAlign::Center => advance / 2.0,
                TextAlign::End => advance,
            };
        let baseline = (y * scale) as f32
            + match self.baseline {
                TextBaseline::Alphabetic => 0.0,
                TextBaseline::Top => ascent,
                TextBaseline::Middle => (ascent + descent) / 2.0,
                TextBaseline::Bottom => descent,
            };

        let color = self.solid_fill_color();
        for (metrics, coverage) in &glyphs {
            let left = pen + metrics.xmin as f32;
            let top = baseline - metrics.ymin as f32 - metrics.height as f32;
            self.blit_glyph(metrics, coverage, left, top, color);
            pen += metrics.advance_width;
        }
    }
}
