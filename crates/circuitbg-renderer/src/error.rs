use thiserror::Error;

/// Failures of a pixel-backed drawing surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("cannot allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },

    #[error("font load error: {0}")]
    Font(String),
}
