use serde::{Deserialize, Serialize};

use circuitbg_core::{Rect, Rgba};

use crate::surface::{DrawSurface, FontSpec, LineCap, Paint, TextAlign, TextBaseline};

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Clear { color: Rgba },
    SetFill { paint: Paint },
    SetStroke { color: Rgba },
    SetLineWidth { width: f64 },
    SetLineCap { cap: LineCap },
    SetFont { font: FontSpec },
    SetTextAlign { align: TextAlign },
    SetTextBaseline { baseline: TextBaseline },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { cx: f64, cy: f64, radius: f64, start: f64, end: f64 },
    ArcTo { x1: f64, y1: f64, x2: f64, y2: f64, radius: f64 },
    RoundRect { rect: Rect, radius: f64 },
    ClosePath,
    Fill,
    Stroke,
    FillRect { rect: Rect },
    StrokeRect { rect: Rect },
    FillText { text: String, x: f64, y: f64 },
}

/// A surface that paints nothing and remembers every call.
///
/// Used to inspect recipes and to ship draw lists to out-of-process painters.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    native_round_rect: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise a native rounded-rectangle path builder.
    pub fn with_native_round_rect(mut self, native: bool) -> Self {
        self.native_round_rect = native;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    fn record(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Rgba) {
        self.record(DrawOp::Clear { color });
    }

    fn set_fill(&mut self, paint: Paint) {
        self.record(DrawOp::SetFill { paint });
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.record(DrawOp::SetStroke { color });
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(DrawOp::SetLineWidth { width });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.record(DrawOp::SetLineCap { cap });
    }

    fn set_font(&mut self, font: FontSpec) {
        self.record(DrawOp::SetFont { font });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.record(DrawOp::SetTextAlign { align });
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.record(DrawOp::SetTextBaseline { baseline });
    }

    fn begin_path(&mut self) {
        self.record(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(DrawOp::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(DrawOp::LineTo { x, y });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.record(DrawOp::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) {
        self.record(DrawOp::ArcTo {
            x1,
            y1,
            x2,
            y2,
            radius,
        });
    }

    fn close_path(&mut self) {
        self.record(DrawOp::ClosePath);
    }

    fn fill(&mut self) {
        self.record(DrawOp::Fill);
    }

    fn stroke(&mut self) {
        self.record(DrawOp::Stroke);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.record(DrawOp::FillRect { rect });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.record(DrawOp::StrokeRect { rect });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.record(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn supports_round_rect(&self) -> bool {
        self.native_round_rect
    }

    fn round_rect(&mut self, rect: Rect, radius: f64) {
        self.record(DrawOp::RoundRect { rect, radius });
    }
}
