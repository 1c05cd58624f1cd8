use crate::core::bounds::ScreenRect;
use rstar::{RTree, RTreeObject, AABB};

/// A screen rectangle tagged with the position of its owner in the caller's list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedRect {
    pub slot: usize,
    pub rect: ScreenRect,
}

// --- rstar integration -------------------------------------------------------------------------

impl RTreeObject for IndexedRect {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (min, max) = self.rect.corners();
        AABB::from_corners(min, max)
    }
}

/// R-tree over screen rectangles, answering "which rectangles overlap this one"
/// without comparing every pair.
pub struct RectIndex {
    rtree: RTree<IndexedRect>,
}

impl RectIndex {
    /// Bulk-loads the index; slot `i` refers to `rects[i]`
    pub fn new(rects: impl IntoIterator<Item = ScreenRect>) -> Self {
        let items = rects
            .into_iter()
            .enumerate()
            .map(|(slot, rect)| IndexedRect { slot, rect })
            .collect();
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots of every rectangle strictly intersecting `rect`, ascending.
    /// The R-tree also reports rectangles that merely touch, those are dropped.
    pub fn intersecting(&self, rect: &ScreenRect) -> Vec<usize> {
        let (min, max) = rect.corners();
        let envelope = AABB::from_corners(min, max);
        let mut slots: Vec<usize> = self
            .rtree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|item| item.rect.intersects(rect))
            .map(|item| item.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Adjacency lists of the overlap graph: entry `i` holds every other slot
    /// whose rectangle intersects slot `i`'s, ascending
    pub fn overlap_graph(&self, rects: &[ScreenRect]) -> Vec<Vec<usize>> {
        rects
            .iter()
            .enumerate()
            .map(|(slot, rect)| {
                self.intersecting(rect)
                    .into_iter()
                    .filter(|&other| other != slot)
                    .collect()
            })
            .collect()
    }
}
