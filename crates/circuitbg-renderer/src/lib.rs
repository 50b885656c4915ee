//! # circuitbg Renderer
//!
//! Paints a placement plan onto a 2D drawing surface.
//!
//! The [`DrawSurface`] trait mirrors a canvas-style immediate-mode API. Two
//! surfaces ship with the crate: [`RasterSurface`], a `tiny-skia` pixel buffer
//! with optional `fontdue` text, and [`RecordingSurface`], which records calls
//! for inspection or for replay elsewhere.

pub mod error;
pub mod paint;
pub mod raster;
pub mod recording;
pub mod render_data;
pub mod round_rect;
pub mod surface;
pub mod viewport;

pub use error::SurfaceError;
pub use paint::Painter;
pub use raster::RasterSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use render_data::RenderFrame;
pub use round_rect::RoundRectPath;
pub use surface::{DrawSurface, Paint};
pub use viewport::{SurfaceMetrics, MAX_PIXEL_DENSITY};
