use std::path::Path;

use anyhow::{bail, Context};

use circuitbg_core::{Palette, Viewport};
use circuitbg_drc::Severity;
use circuitbg_io::BackgroundConfig;
use circuitbg_renderer::{Painter, RasterSurface, RenderFrame, SurfaceMetrics};

use crate::ViewArgs;

pub fn load_config(path: Option<&Path>) -> anyhow::Result<BackgroundConfig> {
    match path {
        Some(path) => BackgroundConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(BackgroundConfig::default()),
    }
}

/// Font face named by the config, if any.
pub fn read_font(config: &BackgroundConfig) -> anyhow::Result<Option<Vec<u8>>> {
    let Some(path) = &config.render.font_path else {
        return Ok(None);
    };
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    Ok(Some(bytes))
}

fn viewport(view: &ViewArgs) -> Viewport {
    Viewport::new(view.width, view.height).with_density(view.density)
}

pub fn plan(view: &ViewArgs) -> anyhow::Result<()> {
    let config = load_config(view.config.as_deref())?;
    let frame = RenderFrame::build(viewport(view), &config.layout);
    println!("{}", frame.to_json()?);
    Ok(())
}

pub fn render(view: &ViewArgs, out: &Path) -> anyhow::Result<()> {
    let config = load_config(view.config.as_deref())?;
    let viewport = viewport(view);
    let frame = RenderFrame::build(viewport, &config.layout);

    let metrics = SurfaceMetrics::for_viewport_with_max(&viewport, config.render.max_pixel_density);
    let mut surface = RasterSurface::new(metrics).context("cannot create surface")?;
    if let Some(bytes) = read_font(&config)? {
        surface = surface.with_font_bytes(&bytes)?;
    }

    let painter = Painter::for_surface(&surface, Palette::PCB);
    let painted = frame.paint(&painter, &mut surface);
    log::info!("painted {painted} primitives at {}x{}", viewport.width, viewport.height);

    circuitbg_io::write_png(&surface, out)?;
    Ok(())
}

pub fn check(view: &ViewArgs) -> anyhow::Result<()> {
    let config = load_config(view.config.as_deref())?;
    let report = circuitbg_drc::check_viewport(&viewport(view), &config.layout);

    for v in &report.violations {
        let level = match v.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("{level}: {:?}: {}", v.violation_type, v.message);
    }

    let errors = report.errors().count();
    if errors > 0 {
        bail!("{errors} clearance error(s)");
    }
    println!("{} warning(s), 0 errors", report.warnings().count());
    Ok(())
}
