//! # circuitbg Core
//!
//! Layout and placement engine for the circuit-board background: zone
//! geometry for a viewport, the fixed board palette, drawing primitives, and
//! the deterministic placement planner that fills the gutters and edges while
//! keeping the content column clear.
//!
//! Everything here is pure computation. Painting lives in `circuitbg-renderer`.

pub mod config;
pub mod geometry;
pub mod palette;
pub mod planner;
pub mod primitive;
pub mod spatial;
pub mod viewport;
pub mod zones;

pub use config::LayoutConfig;
pub use geometry::{BBox, Point, Rect, Size};
pub use palette::{Ink, Palette, Rgba};
pub use planner::{plan, plan_with, Pass, PlacedPrimitive, PlacementPlan};
pub use primitive::Primitive;
pub use viewport::Viewport;
pub use zones::ZoneGeometry;
