use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Point, Rect, Size};
use crate::palette::Ink;

/// Length of a dual-row package pin, measured outward from the body.
pub const DUAL_ROW_PIN_LENGTH: f64 = 10.0;
/// Thickness of a dual-row package pin.
pub const DUAL_ROW_PIN_WIDTH: f64 = 4.0;
/// Length of a quad-flat package pin, measured outward from the body.
pub const QUAD_FLAT_PIN_LENGTH: f64 = 8.0;
/// Thickness of a quad-flat package pin.
pub const QUAD_FLAT_PIN_WIDTH: f64 = 3.0;

/// A plated through-hole: copper ring with a drilled center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub center: Point,
    pub radius: f64,
}

impl Via {
    pub fn bbox(&self) -> BBox {
        BBox::around(self.center, self.radius, self.radius)
    }
}

/// A straight trace segment with round caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub ink: Ink,
    pub width: f64,
}

impl Line {
    pub fn bbox(&self) -> BBox {
        let half_w = self.width / 2.0;
        BBox::new(
            Point::new(self.from.x.min(self.to.x) - half_w, self.from.y.min(self.to.y) - half_w),
            Point::new(self.from.x.max(self.to.x) + half_w, self.from.y.max(self.to.y) + half_w),
        )
    }

    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }

    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }
}

/// Outline style of an integrated-circuit package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageShape {
    /// Rectangular body with pins along the left and right edges (SOIC-like).
    DualRow,
    /// Square body with pins on all four edges (QFP-like).
    QuadFlat,
}

/// An IC package motif.
///
/// `pin_count` is the number of pins per pinned side. For quad-flat packages
/// only `size.width` is used; the body is square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcPackage {
    pub shape: PackageShape,
    pub center: Point,
    pub size: Size,
    pub pin_count: u32,
    pub label: String,
}

impl IcPackage {
    /// Body plus pins.
    pub fn bbox(&self) -> BBox {
        match self.shape {
            PackageShape::DualRow => BBox::around(
                self.center,
                self.size.width / 2.0 + DUAL_ROW_PIN_LENGTH,
                self.size.height / 2.0,
            ),
            PackageShape::QuadFlat => {
                let reach = self.size.width / 2.0 + QUAD_FLAT_PIN_LENGTH;
                BBox::around(self.center, reach, reach)
            }
        }
    }

    /// Body only, top-left anchored.
    pub fn body(&self) -> Rect {
        let (w, h) = match self.shape {
            PackageShape::DualRow => (self.size.width, self.size.height),
            PackageShape::QuadFlat => (self.size.width, self.size.width),
        };
        Rect::new(self.center.x - w / 2.0, self.center.y - h / 2.0, w, h)
    }
}

/// Discrete two-terminal part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassiveKind {
    /// Resistor-style SMD footprint: two rectangular pads.
    TwoPad,
    /// Capacitor footprint: two round pads.
    Capacitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveComponent {
    pub kind: PassiveKind,
    pub center: Point,
    pub orientation: Orientation,
}

impl PassiveComponent {
    pub fn bbox(&self) -> BBox {
        match (self.kind, self.orientation) {
            (PassiveKind::TwoPad, Orientation::Vertical) => BBox::around(self.center, 3.0, 7.0),
            (PassiveKind::TwoPad, Orientation::Horizontal) => BBox::around(self.center, 7.0, 3.0),
            // Capacitor pads are round and always laid out horizontally.
            (PassiveKind::Capacitor, _) => BBox::around(self.center, 8.0, 3.0),
        }
    }
}

/// Silkscreen text, centered on `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub position: Point,
    /// Font size in logical pixels.
    pub size: f64,
}

impl Label {
    /// Approximate extent assuming a monospace face.
    pub fn bbox(&self) -> BBox {
        let advance = self.size * 0.6;
        let width = advance * self.text.chars().count() as f64;
        BBox::around(self.position, width / 2.0, self.size / 2.0)
    }
}

/// One stop of a fade gradient. `offset` runs 0..=1 along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub alpha: f64,
}

impl GradientStop {
    pub fn new(offset: f64, alpha: f64) -> Self {
        Self { offset, alpha }
    }
}

/// Translucent overlay, graded from the top of `rect` to its bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeMask {
    pub rect: Rect,
    pub stops: Vec<GradientStop>,
}

impl FadeMask {
    pub fn bbox(&self) -> BBox {
        self.rect.bbox()
    }
}

/// A single drawing instruction in a placement plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Via(Via),
    Line(Line),
    IcPackage(IcPackage),
    Passive(PassiveComponent),
    Label(Label),
    FadeMask(FadeMask),
}

impl Primitive {
    pub fn via(x: f64, y: f64, radius: f64) -> Self {
        Primitive::Via(Via {
            center: Point::new(x, y),
            radius,
        })
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, ink: Ink, width: f64) -> Self {
        Primitive::Line(Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            ink,
            width,
        })
    }

    pub fn dual_row(cx: f64, cy: f64, width: f64, height: f64, pins: u32, label: &str) -> Self {
        Primitive::IcPackage(IcPackage {
            shape: PackageShape::DualRow,
            center: Point::new(cx, cy),
            size: Size::new(width, height),
            pin_count: pins,
            label: label.to_string(),
        })
    }

    pub fn quad_flat(cx: f64, cy: f64, size: f64, pins_per_side: u32, label: &str) -> Self {
        Primitive::IcPackage(IcPackage {
            shape: PackageShape::QuadFlat,
            center: Point::new(cx, cy),
            size: Size::square(size),
            pin_count: pins_per_side,
            label: label.to_string(),
        })
    }

    pub fn two_pad(cx: f64, cy: f64, orientation: Orientation) -> Self {
        Primitive::Passive(PassiveComponent {
            kind: PassiveKind::TwoPad,
            center: Point::new(cx, cy),
            orientation,
        })
    }

    pub fn capacitor(cx: f64, cy: f64) -> Self {
        Primitive::Passive(PassiveComponent {
            kind: PassiveKind::Capacitor,
            center: Point::new(cx, cy),
            orientation: Orientation::Horizontal,
        })
    }

    pub fn label(text: &str, x: f64, y: f64, size: f64) -> Self {
        Primitive::Label(Label {
            text: text.to_string(),
            position: Point::new(x, y),
            size,
        })
    }

    pub fn bbox(&self) -> BBox {
        match self {
            Primitive::Via(v) => v.bbox(),
            Primitive::Line(l) => l.bbox(),
            Primitive::IcPackage(ic) => ic.bbox(),
            Primitive::Passive(p) => p.bbox(),
            Primitive::Label(l) => l.bbox(),
            Primitive::FadeMask(m) => m.bbox(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Via(_) => "via",
            Primitive::Line(_) => "line",
            Primitive::IcPackage(_) => "ic_package",
            Primitive::Passive(_) => "passive",
            Primitive::Label(_) => "label",
            Primitive::FadeMask(_) => "fade_mask",
        }
    }
}
