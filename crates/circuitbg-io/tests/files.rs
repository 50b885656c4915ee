use circuitbg_core::{LayoutConfig, Palette, Viewport};
use circuitbg_io::{save_frame_json, write_png, BackgroundConfig, ConfigError};
use circuitbg_renderer::{Painter, RasterSurface, RenderFrame, SurfaceMetrics};

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("background.json");

    let mut config = BackgroundConfig::new("landing");
    config.layout.hero_height = 520.0;
    config.render.debounce_ms = 120;
    config.save(&path).unwrap();

    let loaded = BackgroundConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = BackgroundConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_render_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let viewport = Viewport::new(320.0, 240.0);
    let frame = RenderFrame::build(viewport, &LayoutConfig::default());

    let mut surface = RasterSurface::new(SurfaceMetrics::for_viewport(&viewport)).unwrap();
    let painter = Painter::for_surface(&surface, Palette::PCB);
    frame.paint(&painter, &mut surface);

    let png = dir.path().join("frame.png");
    write_png(&surface, &png).unwrap();
    assert!(std::fs::metadata(&png).unwrap().len() > 0);

    let json = dir.path().join("frame.json");
    save_frame_json(&frame, &json).unwrap();
    let text = std::fs::read_to_string(&json).unwrap();
    assert!(text.contains("\"narrow_left\""));
}
