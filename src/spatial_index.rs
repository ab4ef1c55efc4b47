//! Spatial Index Module
//!
//! R-tree over the page-space bounds of registered grids. Used to find every
//! grid under a pointer so containment precedence can pick the deepest one.

use crate::geometry::{PixelRect, Point};
use crate::types::GridId;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;
use std::fmt;

/// A registered grid's page-space bounding box.
#[derive(Debug, Clone)]
pub struct GridBoundsEntry {
    pub grid: GridId,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl GridBoundsEntry {
    pub fn new(grid: GridId, bounds: &PixelRect) -> Self {
        Self {
            grid,
            min_x: bounds.left(),
            min_y: bounds.top(),
            max_x: bounds.right(),
            max_y: bounds.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for GridBoundsEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for GridBoundsEntry {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

/// Point-query index over grid bounds.
pub struct GridBoundsIndex {
    tree: RTree<GridBoundsEntry>,
    entries: HashMap<GridId, GridBoundsEntry>,
}

impl GridBoundsIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or move a grid's bounds.
    pub fn insert(&mut self, grid: GridId, bounds: &PixelRect) {
        if let Some(old_entry) = self.entries.remove(&grid) {
            self.tree.remove(&old_entry);
        }
        let entry = GridBoundsEntry::new(grid.clone(), bounds);
        self.tree.insert(entry.clone());
        self.entries.insert(grid, entry);
    }

    pub fn remove(&mut self, grid: &str) -> bool {
        if let Some(entry) = self.entries.remove(grid) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Bounds of a grid, if indexed
    pub fn bounds(&self, grid: &str) -> Option<PixelRect> {
        self.entries.get(grid).map(|e| {
            PixelRect::new(e.min_x, e.min_y, e.max_x - e.min_x, e.max_y - e.min_y)
        })
    }

    /// Every grid whose bounds contain the point.
    pub fn query_point(&self, point: Point) -> Vec<GridId> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(point.x, point.y))
            .map(|entry| entry.grid.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for GridBoundsIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridBoundsIndex")
            .field("grids", &self.entries.len())
            .finish()
    }
}

impl Default for GridBoundsIndex {
    fn default() -> Self {
        Self::new()
    }
}
