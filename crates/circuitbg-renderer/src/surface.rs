//! The drawing-surface contract the primitive recipes paint against.
//!
//! The trait mirrors an immediate-mode 2D context: a current path, fill and
//! stroke styles, and rectangle/text shortcuts. All coordinates are logical
//! pixels; surfaces apply their own device-pixel scale.

use serde::{Deserialize, Serialize};

use circuitbg_core::{Point, Rect, Rgba};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Font request. Surfaces without the family fall back to any monospace face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub weight: u16,
    pub size: f64,
    pub family: String,
}

impl FontSpec {
    pub fn mono(weight: u16, size: f64) -> Self {
        Self {
            weight,
            size,
            family: "JetBrains Mono".to_string(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::mono(400, 10.0)
    }
}

/// A color stop along a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Fill style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Rgba),
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<ColorStop>,
    },
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// An immediate-mode 2D drawing surface.
pub trait DrawSurface {
    /// Reset every pixel to `color`.
    fn clear(&mut self, color: Rgba);

    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_font(&mut self, font: FontSpec);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Discard the current path.
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Clockwise circular arc from `start` to `end` radians.
    ///
    /// Connects from the current point with a straight segment, or starts a
    /// new subpath if there is none.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    /// Arc of `radius` tangent to the lines current→(x1, y1) and (x1, y1)→(x2, y2).
    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64);
    fn close_path(&mut self);

    /// Fill the current path with the fill style. The path is kept.
    fn fill(&mut self);
    /// Stroke the current path with the stroke style. The path is kept.
    fn stroke(&mut self);

    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Whether [`round_rect`](Self::round_rect) is implemented natively.
    fn supports_round_rect(&self) -> bool {
        false
    }

    /// Append a closed rounded-rectangle subpath.
    ///
    /// Only called when [`supports_round_rect`](Self::supports_round_rect)
    /// returns true.
    fn round_rect(&mut self, _rect: Rect, _radius: f64) {}
}
