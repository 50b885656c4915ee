//! # circuitbg I/O
//!
//! Background configuration files (pretty JSON) and frame export: PNG from a
//! raster surface, JSON from a render frame.

pub mod config;
pub mod export;

pub use config::{BackgroundConfig, ConfigError, RenderSettings};
pub use export::{png_bytes, save_frame_json, write_frame_json, write_png, ExportError};
