use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same hue, different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Alpha quantised to a byte, clamped to `0..=255`.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(255, 255, 255)
    }
}

const COPPER_RGB: (u8, u8, u8) = (184, 115, 51);
const ACCENT_RGB: (u8, u8, u8) = (234, 88, 12);

const fn copper(a: f32) -> Rgba {
    Rgba::new(COPPER_RGB.0, COPPER_RGB.1, COPPER_RGB.2, a)
}

const fn accent(a: f32) -> Rgba {
    Rgba::new(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2, a)
}

/// Trace colors a [`Line`](crate::primitive::Line) can be stroked with.
///
/// Lines carry an ink token rather than a concrete color so plans stay
/// palette-independent and comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ink {
    /// Ordinary copper trace.
    Copper,
    /// Primary bus.
    CopperBold,
    /// Signal trace.
    Accent,
    /// Signal trace on narrow layouts, where the lanes sit close to content.
    AccentMuted,
}

/// The fixed board palette.
///
/// The five primary inks are the copper trace, the bold copper bus, the
/// accent trace, the pad fill and the silkscreen text; the remaining entries
/// are the shades the primitive recipes derive from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgba,
    pub copper: Rgba,
    pub copper_bold: Rgba,
    pub accent: Rgba,
    pub accent_muted: Rgba,
    pub pad_fill: Rgba,
    pub silkscreen: Rgba,
    pub via_fill: Rgba,
    pub via_ring: Rgba,
    pub via_hole: Rgba,
    pub ic_fill: Rgba,
    pub ic_stroke: Rgba,
    pub die_outline: Rgba,
    /// Color of the hero fade; its alpha comes from the gradient stops.
    pub fade: Rgba,
}

impl Palette {
    pub const PCB: Palette = Palette {
        background: Rgba::opaque(255, 255, 255),
        copper: copper(0.25),
        copper_bold: copper(0.35),
        accent: accent(0.20),
        accent_muted: accent(0.10),
        pad_fill: copper(0.16),
        silkscreen: Rgba::new(100, 116, 139, 0.28),
        via_fill: copper(0.12),
        via_ring: copper(0.32),
        via_hole: Rgba::opaque(255, 255, 255),
        ic_fill: Rgba::new(22, 22, 58, 0.07),
        ic_stroke: copper(0.35),
        die_outline: copper(0.22),
        fade: Rgba::opaque(255, 255, 255),
    };

    pub fn ink(&self, ink: Ink) -> Rgba {
        match ink {
            Ink::Copper => self.copper,
            Ink::CopperBold => self.copper_bold,
            Ink::Accent => self.accent,
            Ink::AccentMuted => self.accent_muted,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::PCB
    }
}
