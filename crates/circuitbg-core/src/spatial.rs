//! R-tree over the painted bounds of a placement plan.

use rstar::{RTree, RTreeObject, AABB};

use crate::geometry::{BBox, Point};
use crate::planner::PlacementPlan;

/// One plan item's bounds, keyed by its position in the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedItem {
    pub plan_index: usize,
    pub bbox: BBox,
}

impl RTreeObject for IndexedItem {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.bbox)
    }
}

fn envelope_of(bbox: &BBox) -> AABB<[f64; 2]> {
    AABB::from_corners([bbox.min.x, bbox.min.y], [bbox.max.x, bbox.max.y])
}

/// Bounding-box index over a plan. Built once per plan; plans are immutable.
pub struct SpatialIndex {
    tree: RTree<IndexedItem>,
}

impl SpatialIndex {
    /// Index every item of `plan`. Items with non-finite bounds (from
    /// degenerate viewports) are left out.
    pub fn from_plan(plan: &PlacementPlan) -> Self {
        let items: Vec<IndexedItem> = plan
            .primitives()
            .map(|p| p.bbox())
            .enumerate()
            .filter(|(_, bbox)| bbox.is_finite())
            .map(|(plan_index, bbox)| IndexedItem { plan_index, bbox })
            .collect();
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    /// Items whose bounds meet `region`, shared edges included.
    pub fn touching<'a>(&'a self, region: &BBox) -> impl Iterator<Item = &'a IndexedItem> + 'a {
        self.tree.locate_in_envelope_intersecting(&envelope_of(region))
    }

    /// Items whose bounds contain `point`, edges included.
    pub fn at(&self, point: Point) -> impl Iterator<Item = &IndexedItem> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x, point.y]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedItem> {
        self.tree.iter()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
