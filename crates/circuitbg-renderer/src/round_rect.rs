use circuitbg_core::Rect;

use crate::surface::DrawSurface;

/// How rounded-rectangle subpaths get built on a given surface.
///
/// Chosen once per surface with [`RoundRectPath::detect`]; the surface itself
/// is never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundRectPath {
    /// The surface builds the path itself.
    Native,
    /// Built here from straight segments and tangent arcs.
    Emulated,
}

impl RoundRectPath {
    pub fn detect<S: DrawSurface + ?Sized>(surface: &S) -> Self {
        if surface.supports_round_rect() {
            RoundRectPath::Native
        } else {
            log::debug!("surface lacks rounded rectangles, emulating with arc_to");
            RoundRectPath::Emulated
        }
    }

    /// Append a closed rounded-rectangle subpath to the surface's current path.
    pub fn append<S: DrawSurface + ?Sized>(self, surface: &mut S, rect: Rect, radius: f64) {
        match self {
            RoundRectPath::Native => surface.round_rect(rect, radius),
            RoundRectPath::Emulated => emulated_round_rect(surface, rect, radius),
        }
    }
}

/// Rounded rectangle from `move_to`/`line_to`/`arc_to`, clockwise from the
/// top edge. The radius is clamped to half the shorter side.
pub fn emulated_round_rect<S: DrawSurface + ?Sized>(surface: &mut S, rect: Rect, radius: f64) {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    let r = radius.max(0.0).min(w.abs() / 2.0).min(h.abs() / 2.0);

    surface.move_to(x + r, y);
    surface.line_to(x + w - r, y);
    surface.arc_to(x + w, y, x + w, y + r, r);
    surface.line_to(x + w, y + h - r);
    surface.arc_to(x + w, y + h, x + w - r, y + h, r);
    surface.line_to(x + r, y + h);
    surface.arc_to(x, y + h, x, y + h - r, r);
    surface.line_to(x, y + r);
    surface.arc_to(x, y, x + r, y, r);
    surface.close_path();
}
