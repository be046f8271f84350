//! The set of all dimensions known to the current drag session.
//!
//! Publications from the dimension marshal land here. The map owns:
//!
//! - the published draggable and droppable dimensions (replaced, never
//!   mutated in place),
//! - the authoritative per-droppable ordering of draggables (the order the
//!   owner published them in),
//! - a spatial index over droppable rectangles for hit testing.
//!
//! Everything downstream of the map is a read-only consumer; only the phase
//! state machine applies publications.

use crate::geometry::{Position, Rect};
use crate::spatial::ZoneIndex;
use crate::types::{
    DragLocation, DraggableDimension, DraggableId, DroppableDimension, DroppableId,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize)]
pub struct DimensionMap {
    draggables: BTreeMap<DraggableId, DraggableDimension>,
    droppables: BTreeMap<DroppableId, DroppableDimension>,
    /// Draggable ids per droppable, in publication order. This ordering is
    /// the authoritative sequence for index computation.
    ordering: BTreeMap<DroppableId, Vec<DraggableId>>,
    /// Droppable ids in publication order; rank doubles as the tie-break for
    /// overlapping and equidistant droppables.
    ranks: Vec<DroppableId>,
    /// Derived from `ranks` + droppable rects; rebuilt on publication.
    #[serde(skip)]
    index: ZoneIndex,
}

impl PartialEq for DimensionMap {
    fn eq(&self, other: &Self) -> bool {
        // The spatial index is derived data; comparing the sources is enough.
        self.draggables == other.draggables
            && self.droppables == other.droppables
            && self.ordering == other.ordering
            && self.ranks == other.ranks
    }
}

impl DimensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Publications
    // ------------------------------------------------------------------

    /// Replace the droppable set with a freshly published list.
    pub fn publish_droppables(&mut self, list: Vec<DroppableDimension>) {
        self.ranks = list.iter().map(|d| d.id.clone()).collect();
        self.index = ZoneIndex::from_rects(list.iter().map(|d| d.client));
        self.droppables = list.into_iter().map(|d| (d.id.clone(), d)).collect();
    }

    /// Replace the draggable set with a freshly published list. List order
    /// within each droppable becomes the authoritative ordering.
    pub fn publish_draggables(&mut self, list: Vec<DraggableDimension>) {
        self.ordering.clear();
        for dimension in &list {
            self.ordering
                .entry(dimension.droppable_id.clone())
                .or_default()
                .push(dimension.id.clone());
        }
        self.draggables = list.into_iter().map(|d| (d.id.clone(), d)).collect();
    }

    /// Replace a droppable's entry with one carrying the new scroll offset.
    /// Returns false when the droppable is unknown.
    pub fn update_droppable_scroll(&mut self, id: &DroppableId, scroll: Position) -> bool {
        match self.droppables.get(id) {
            Some(existing) => {
                let updated = existing.with_scroll(scroll);
                self.droppables.insert(id.clone(), updated);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn draggable(&self, id: &DraggableId) -> Option<&DraggableDimension> {
        self.draggables.get(id)
    }

    pub fn droppable(&self, id: &DroppableId) -> Option<&DroppableDimension> {
        self.droppables.get(id)
    }

    /// Ordered draggables of a droppable; empty for unknown or empty zones.
    pub fn ordered(&self, id: &DroppableId) -> &[DraggableId] {
        self.ordering.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Publication rank of a droppable (tie-break order).
    pub fn rank_of(&self, id: &DroppableId) -> Option<usize> {
        self.ranks.iter().position(|r| r == id)
    }

    /// All droppables in publication order.
    pub fn droppables_ranked(&self) -> impl Iterator<Item = &DroppableDimension> {
        self.ranks.iter().filter_map(|id| self.droppables.get(id))
    }

    pub fn droppable_count(&self) -> usize {
        self.droppables.len()
    }

    pub fn draggable_count(&self) -> usize {
        self.draggables.len()
    }

    /// Where a draggable currently sits: its home droppable and index.
    pub fn location_of(&self, id: &DraggableId) -> Option<DragLocation> {
        let dimension = self.draggables.get(id)?;
        let index = self
            .ordered(&dimension.droppable_id)
            .iter()
            .position(|d| d == id)?;
        Some(DragLocation {
            droppable_id: dimension.droppable_id.clone(),
            index,
        })
    }

    /// A draggable's client rect reconciled with its droppable's scroll:
    /// when the container scrolls down, content moves up on screen.
    pub fn effective_rect(&self, id: &DraggableId) -> Option<Rect> {
        let dimension = self.draggables.get(id)?;
        let diff = self
            .droppables
            .get(&dimension.droppable_id)
            .map(|d| d.scroll_diff())
            .unwrap_or(Position::ZERO);
        Some(dimension.client.shift(-diff))
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// The enabled droppable under the point. Ties between overlapping
    /// droppables: smallest area first, then publication order.
    pub fn droppable_at(&self, p: Position) -> Option<&DroppableDimension> {
        let mut hits: Vec<&DroppableDimension> = self
            .index
            .ranks_at(p)
            .into_iter()
            .filter_map(|rank| self.droppables.get(self.ranks.get(rank)?))
            .filter(|d| d.is_enabled)
            .collect();

        hits.sort_by(|a, b| {
            a.client
                .area()
                .partial_cmp(&b.client.area())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| self.rank_of(&a.id).cmp(&self.rank_of(&b.id)))
        });
        hits.into_iter().next()
    }

    /// The nearest enabled droppable to the point. Equidistant candidates
    /// resolve by publication order.
    pub fn nearest_enabled(&self, p: Position) -> Option<&DroppableDimension> {
        let mut best: Option<(f32, usize)> = None;

        for (rank, distance_2) in self.index.ranks_by_distance(p) {
            if let Some((best_distance, best_rank)) = best {
                if distance_2 > best_distance {
                    break;
                }
                if rank < best_rank && self.is_enabled_rank(rank) {
                    best = Some((best_distance, rank));
                }
                continue;
            }
            if self.is_enabled_rank(rank) {
                best = Some((distance_2, rank));
            }
        }

        let (_, rank) = best?;
        self.droppables.get(self.ranks.get(rank)?)
    }

    /// The droppable a pointer position resolves to: containment first,
    /// nearest enabled as the fallback.
    pub fn target_droppable(&self, p: Position) -> Option<&DroppableDimension> {
        self.droppable_at(p).or_else(|| self.nearest_enabled(p))
    }

    fn is_enabled_rank(&self, rank: usize) -> bool {
        self.ranks
            .get(rank)
            .and_then(|id| self.droppables.get(id))
            .is_some_and(|d| d.is_enabled)
    }
}
