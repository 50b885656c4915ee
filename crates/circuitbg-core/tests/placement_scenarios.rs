use circuitbg_core::primitive::PackageShape;
use circuitbg_core::{plan, Ink, Pass, PlacementPlan, Primitive, Viewport, ZoneGeometry};

fn count(plan: &PlacementPlan, pass: Pass, pred: impl Fn(&Primitive) -> bool) -> usize {
    plan.in_pass(pass).filter(|p| pred(p)).count()
}

fn is_ic(p: &Primitive) -> bool {
    matches!(p, Primitive::IcPackage(_))
}

fn is_component(p: &Primitive) -> bool {
    matches!(p, Primitive::IcPackage(_) | Primitive::Passive(_))
}

fn is_secondary_trace(p: &Primitive) -> bool {
    matches!(p, Primitive::Line(l) if l.ink == Ink::Copper && l.is_vertical())
}

fn is_bold_bus(p: &Primitive) -> bool {
    matches!(p, Primitive::Line(l) if l.ink == Ink::CopperBold && l.is_vertical())
}

/// Width whose gutters are exactly `gutter` wide (above the content max width).
fn width_for_gutter(gutter: f64) -> f64 {
    1200.0 + gutter * 2.0
}

#[test]
fn test_wide_desktop_fills_both_gutters() {
    let viewport = Viewport::new(1440.0, 900.0);
    let zones = ZoneGeometry::compute(&viewport);
    assert!(!zones.is_narrow_layout);
    assert_eq!(zones.content.width, 1200.0);
    assert_eq!(zones.content.x, 120.0);
    assert_eq!(zones.left_gutter_width, 120.0);
    assert_eq!(zones.right_gutter_width, 120.0);

    let plan = plan(&viewport);
    assert_eq!(count(&plan, Pass::LeftGutter, is_ic), 3);
    assert_eq!(count(&plan, Pass::RightGutter, is_ic), 3);
    assert!(plan.has_pass(Pass::CrossConnect));
    // Two traces, each stitched with four vias.
    assert_eq!(plan.in_pass(Pass::CrossConnect).count(), 10);
}

#[test]
fn test_narrow_phone_uses_edge_lanes() {
    let viewport = Viewport::new(600.0, 800.0);
    assert!(ZoneGeometry::compute(&viewport).is_narrow_layout);

    let plan = plan(&viewport);
    let lane_buses = plan
        .items()
        .iter()
        .filter(|p| p.pass.is_narrow_lane())
        .filter(|p| matches!(&p.primitive, Primitive::Line(l) if l.is_vertical() && l.from.y == 0.0 && l.to.y == 800.0))
        .count();
    assert_eq!(lane_buses, 2);

    let lane_ics: Vec<_> = plan
        .items()
        .iter()
        .filter(|p| p.pass.is_narrow_lane())
        .filter_map(|p| match &p.primitive {
            Primitive::IcPackage(ic) => Some(ic),
            _ => None,
        })
        .collect();
    assert_eq!(lane_ics.len(), 6);
    assert!(lane_ics.iter().all(|ic| ic.shape == PackageShape::DualRow && ic.pin_count == 3));

    assert!(!plan.has_pass(Pass::LeftGutter));
    assert!(!plan.has_pass(Pass::RightGutter));
    assert!(!plan.has_pass(Pass::CrossConnect));
    assert!(!plan.has_pass(Pass::HeroFade));
    assert!(!plan.primitives().any(is_bold_bus));
}

#[test]
fn test_tablet_without_gutters_keeps_only_edges() {
    let viewport = Viewport::new(820.0, 600.0);
    let zones = ZoneGeometry::compute(&viewport);
    assert_eq!(zones.content.width, 772.0);
    assert_eq!(zones.left_gutter_width, 24.0);

    let plan = plan(&viewport);
    let passes: std::collections::BTreeSet<String> =
        plan.items().iter().map(|p| format!("{:?}", p.pass)).collect();
    let expected: std::collections::BTreeSet<String> = ["TopEdge", "BottomEdge", "BorderStitch", "HeroFade"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(passes, expected);
}

#[test]
fn test_narrow_layout_below_breakpoint() {
    for width in [320.0, 480.0, 600.0, 767.0] {
        let viewport = Viewport::new(width, 700.0);
        assert!(ZoneGeometry::compute(&viewport).is_narrow_layout, "width {width}");
        let plan = plan(&viewport);
        assert!(plan.has_pass(Pass::NarrowLeft));
        assert!(plan.has_pass(Pass::NarrowRight));
        assert!(!plan.items().iter().any(|p| p.pass.is_gutter()));
    }
}

#[test]
fn test_content_rect_is_centered_and_capped() {
    for width in [800.0, 1000.0, 1248.0, 1440.0, 1920.0, 2560.0] {
        let zones = ZoneGeometry::compute(&Viewport::new(width, 900.0));
        let expected_width = f64::min(1200.0, width - 48.0);
        assert_eq!(zones.content.width, expected_width);
        assert_eq!(zones.content.x, (width - expected_width) / 2.0);
    }
}

#[test]
fn test_gutter_density_thresholds() {
    let cases = [
        // (gutter, any content, secondary trace, components)
        (40.0, false, false, false),
        (41.0, true, false, false),
        (60.0, true, false, false),
        (61.0, true, true, false),
        (80.0, true, true, false),
        (81.0, true, true, true),
    ];
    for (gutter, any, secondary, components) in cases {
        let plan = plan(&Viewport::new(width_for_gutter(gutter), 900.0));
        for pass in [Pass::LeftGutter, Pass::RightGutter] {
            assert_eq!(plan.has_pass(pass), any, "gutter {gutter} {pass:?}");
            assert_eq!(
                count(&plan, pass, is_secondary_trace) > 0,
                secondary,
                "gutter {gutter} {pass:?} secondary"
            );
            assert_eq!(
                count(&plan, pass, is_component) > 0,
                components,
                "gutter {gutter} {pass:?} components"
            );
        }
        assert_eq!(plan.has_pass(Pass::CrossConnect), any, "gutter {gutter} cross");
    }
}

#[test]
fn test_gutter_primitives_never_enter_content_column() {
    let mut width = 1282.0;
    while width <= 2560.0 {
        let viewport = Viewport::new(width, 900.0);
        let zones = ZoneGeometry::compute(&viewport);
        let plan = plan(&viewport);
        for placed in plan.items() {
            let bbox = placed.primitive.bbox();
            match placed.pass {
                Pass::LeftGutter => assert!(
                    bbox.max.x < zones.content.left(),
                    "{width}: {:?} reaches {}",
                    placed.primitive,
                    bbox.max.x
                ),
                Pass::RightGutter => assert!(
                    bbox.min.x > zones.content.right(),
                    "{width}: {:?} reaches {}",
                    placed.primitive,
                    bbox.min.x
                ),
                _ => {}
            }
        }
        width += 37.0;
    }
}

#[test]
fn test_plan_is_deterministic() {
    for (w, h) in [(1440.0, 900.0), (600.0, 800.0), (820.0, 600.0), (1363.0, 777.0)] {
        let viewport = Viewport::new(w, h);
        assert_eq!(plan(&viewport), plan(&viewport));
    }
}

#[test]
fn test_fade_mask_is_last_on_wide_layouts() {
    for width in [768.0, 1024.0, 1440.0, 2000.0] {
        let plan = plan(&Viewport::new(width, 900.0));
        let last = plan.last().expect("plan is never empty");
        assert_eq!(last.pass, Pass::HeroFade);
        assert!(matches!(last.primitive, Primitive::FadeMask(_)));
        let masks = plan
            .primitives()
            .filter(|p| matches!(p, Primitive::FadeMask(_)))
            .count();
        assert_eq!(masks, 1);
    }
}

#[test]
fn test_degenerate_viewport_does_not_panic() {
    for (w, h) in [(0.0, 0.0), (1.0, 1.0), (-10.0, 5.0), (5000.0, 0.0)] {
        let plan = plan(&Viewport::new(w, h));
        assert!(plan.primitives().all(|p| !p.kind_name().is_empty()));
    }
}
