use circuitbg_core::{LayoutConfig, Palette, Viewport};
use circuitbg_renderer::{
    DrawOp, DrawSurface, Painter, RasterSurface, RecordingSurface, RenderFrame, SurfaceMetrics,
};

fn render(viewport: Viewport) -> RasterSurface {
    let frame = RenderFrame::build(viewport, &LayoutConfig::default());
    let mut surface = RasterSurface::new(SurfaceMetrics::for_viewport(&viewport)).unwrap();
    let painter = Painter::for_surface(&surface, Palette::PCB);
    frame.paint(&painter, &mut surface);
    surface
}

fn is_white(px: [u8; 4]) -> bool {
    px == [255, 255, 255, 255]
}

#[test]
fn test_gutter_bus_is_painted() {
    let surface = render(Viewport::new(1440.0, 900.0));
    let px = surface.pixel(60, 600).unwrap();
    assert!(!is_white(px), "bus pixel was {px:?}");
    assert_eq!(px[3], 255);
    assert!(px[0] > px[2], "copper should be warm: {px:?}");
}

#[test]
fn test_content_column_stays_blank() {
    let surface = render(Viewport::new(1440.0, 900.0));
    for (x, y) in [(720, 700), (400, 600), (1000, 300)] {
        assert!(is_white(surface.pixel(x, y).unwrap()), "({x}, {y}) not blank");
    }
}

#[test]
fn test_hero_fade_washes_out_top_traces() {
    let surface = render(Viewport::new(1440.0, 900.0));
    // The top cross-connection runs through the faded hero band.
    let px = surface.pixel(720, 50).unwrap();
    assert!(px[..3].iter().all(|&c| c >= 250), "faded pixel was {px:?}");
}

#[test]
fn test_buffer_scales_with_density() {
    let viewport = Viewport::new(1440.0, 900.0).with_density(2.0);
    let surface = render(viewport);
    assert_eq!((surface.pixmap().width(), surface.pixmap().height()), (2880, 1800));
    assert!(!is_white(surface.pixel(120, 1200).unwrap()));
}

#[test]
fn test_native_round_rect_skips_emulation() {
    let frame = RenderFrame::build(Viewport::new(1440.0, 900.0), &LayoutConfig::default());

    let mut native = RecordingSurface::new().with_native_round_rect(true);
    let painter = Painter::for_surface(&native, Palette::PCB);
    frame.paint(&painter, &mut native);
    assert!(native.count(|op| matches!(op, DrawOp::RoundRect { .. })) > 0);
    assert_eq!(native.count(|op| matches!(op, DrawOp::ArcTo { .. })), 0);

    let mut emulated = RecordingSurface::new();
    assert!(!emulated.supports_round_rect());
    let painter = Painter::for_surface(&emulated, Palette::PCB);
    frame.paint(&painter, &mut emulated);
    assert_eq!(emulated.count(|op| matches!(op, DrawOp::RoundRect { .. })), 0);
    assert!(emulated.count(|op| matches!(op, DrawOp::ArcTo { .. })) > 0);
}
