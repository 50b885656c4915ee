use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use circuitbg_renderer::{RasterSurface, RenderFrame};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode the surface's pixel buffer as PNG.
pub fn png_bytes(surface: &RasterSurface) -> Result<Vec<u8>, ExportError> {
    surface
        .pixmap()
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))
}

pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), ExportError> {
    let bytes = png_bytes(surface)?;
    std::fs::write(path, &bytes)?;
    log::info!(
        "wrote {}x{} PNG ({} bytes) to {}",
        surface.pixmap().width(),
        surface.pixmap().height(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

pub fn write_frame_json<W: Write>(frame: &RenderFrame, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, frame)?;
    Ok(())
}

pub fn save_frame_json(frame: &RenderFrame, path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_frame_json(frame, &mut writer)?;
    writer.flush()?;
    log::info!("wrote frame with {} primitives to {}", frame.plan.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuitbg_core::{LayoutConfig, Viewport};
    use circuitbg_renderer::SurfaceMetrics;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_png_bytes_have_signature() {
        let surface = RasterSurface::new(SurfaceMetrics::for_viewport(&Viewport::new(8.0, 8.0))).unwrap();
        let bytes = png_bytes(&surface).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_frame_json_to_writer() {
        let frame = RenderFrame::build(Viewport::new(600.0, 800.0), &LayoutConfig::default());
        let mut out = Vec::new();
        write_frame_json(&frame, &mut out).unwrap();
        let back: RenderFrame = serde_json::from_slice(&out).unwrap();
        assert_eq!(back.plan.len(), frame.plan.len());
        assert!(back.zones.is_narrow_layout);
    }
}
