use std::collections::HashSet;

use circuitbg_core::spatial::SpatialIndex;
use circuitbg_core::{BBox, LayoutConfig, Pass, PlacementPlan, Point, Viewport, ZoneGeometry};

use crate::violation::{ClearanceViolation, DrcReport, ViolationType};

/// Plan `viewport` with `config` and check the result.
pub fn check_viewport(viewport: &Viewport, config: &LayoutConfig) -> DrcReport {
    let zones = ZoneGeometry::compute_with(viewport, config);
    let plan = circuitbg_core::planner::plan_zones(&zones, config);
    check(&zones, &plan)
}

/// Run every clearance rule over `plan`.
pub fn check(zones: &ZoneGeometry, plan: &PlacementPlan) -> DrcReport {
    let index = SpatialIndex::from_plan(plan);
    let mut report = DrcReport::default();

    content_intrusion(zones, plan, &index, &mut report);
    out_of_viewport(zones, plan, &index, &mut report);
    hero_band(zones, plan, &mut report);

    log::debug!(
        "clearance check of {} primitives: {} violation(s)",
        plan.len(),
        report.violations.len()
    );
    report
}

fn content_intrusion(zones: &ZoneGeometry, plan: &PlacementPlan, index: &SpatialIndex, report: &mut DrcReport) {
    if zones.content.is_empty() {
        return;
    }
    let content = zones.content.bbox();
    let items = plan.items();

    let mut hits: Vec<_> = index
        .touching(&content)
        .filter(|entry| entry.bbox.overlaps_interior(&content))
        .filter_map(|entry| items.get(entry.plan_index).map(|item| (entry, item.pass)))
        .filter(|(_, pass)| pass.is_gutter())
        .collect();
    hits.sort_by_key(|(entry, _)| entry.plan_index);

    for (entry, pass) in hits {
        let kind = items[entry.plan_index].primitive.kind_name();
        report.violations.push(
            ClearanceViolation::new(
                ViolationType::ContentIntrusion,
                format!("{kind} from {pass:?} overlaps the content column"),
                entry.bbox,
            )
            .at_item(entry.plan_index, pass),
        );
    }
}

fn out_of_viewport(zones: &ZoneGeometry, plan: &PlacementPlan, index: &SpatialIndex, report: &mut DrcReport) {
    let screen = BBox::new(Point::new(0.0, 0.0), Point::new(zones.width, zones.height));
    let visible: HashSet<usize> = index
        .touching(&screen)
        .map(|entry| entry.plan_index)
        .collect();

    let mut outside: Vec<_> = index
        .iter()
        .filter(|entry| !visible.contains(&entry.plan_index))
        .collect();
    outside.sort_by_key(|entry| entry.plan_index);

    for entry in outside {
        let item = &plan.items()[entry.plan_index];
        report.violations.push(
            ClearanceViolation::new(
                ViolationType::OutOfViewport,
                format!("{} lies outside the viewport", item.primitive.kind_name()),
                entry.bbox,
            )
            .at_item(entry.plan_index, item.pass),
        );
    }
}

fn hero_band(zones: &ZoneGeometry, plan: &PlacementPlan, report: &mut DrcReport) {
    if zones.is_narrow_layout {
        return;
    }
    let masked = plan.last().is_some_and(|item| item.pass == Pass::HeroFade);
    if !masked {
        report.violations.push(ClearanceViolation::new(
            ViolationType::UnmaskedHeroBand,
            "wide layout does not end with the hero fade",
            zones.hero_exclusion.bbox(),
        ));
    }
}
