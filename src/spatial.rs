//! Spatial index over droppable rectangles.
//!
//! Provides R-tree based lookups for "which droppable is under this point"
//! and "which enabled droppable is nearest to this point". Entries are keyed
//! by publication rank rather than by id so they stay `Copy`; the dimension
//! map resolves ranks back to droppable ids.

use crate::geometry::{Position, Rect};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A droppable's bounding box, keyed by its publication rank.
#[derive(Debug, Clone, Copy)]
pub struct ZoneEntry {
    pub rank: usize,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl ZoneEntry {
    pub fn new(rank: usize, rect: Rect) -> Self {
        Self {
            rank,
            min_x: rect.left,
            min_y: rect.top,
            max_x: rect.right,
            max_y: rect.bottom,
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PointDistance for ZoneEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = (self.min_x - point[0]).max(0.0).max(point[0] - self.max_x);
        let dy = (self.min_y - point[1]).max(0.0).max(point[1] - self.max_y);
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        ZoneEntry::contains_point(self, point[0], point[1])
    }
}

impl PartialEq for ZoneEntry {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

/// R-tree over droppable rectangles. Rebuilt whenever a droppable list is
/// published; queries are O(log n).
#[derive(Debug, Clone, Default)]
pub struct ZoneIndex {
    tree: RTree<ZoneEntry>,
}

impl ZoneIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build the index from droppable rects in publication order.
    pub fn from_rects<I>(rects: I) -> Self
    where
        I: Iterator<Item = Rect>,
    {
        let entries: Vec<ZoneEntry> = rects
            .enumerate()
            .map(|(rank, rect)| ZoneEntry::new(rank, rect))
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Ranks of all droppables whose rectangle contains the point.
    pub fn ranks_at(&self, p: Position) -> Vec<usize> {
        let envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(p.x, p.y))
            .map(|entry| entry.rank)
            .collect()
    }

    /// Ranks ordered by distance from the point, nearest first.
    pub fn ranks_by_distance(&self, p: Position) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.tree
            .nearest_neighbor_iter_with_distance_2(&[p.x, p.y])
            .map(|(entry, distance_2)| (entry.rank, distance_2))
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
