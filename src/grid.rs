//! Grid model - one grid's configuration and its ordered item set.
//!
//! The model is a passive data authority: the drag coordinator and resize
//! controller query it and ask it to commit changes, but it never drives an
//! interaction itself.
//!
//! Insertion order doubles as z-order; the last item paints on top and wins
//! hit tests.

use crate::error::{GridError, GridResult};
use crate::geometry::{
    self, CellRect, PixelRect, Point, Size, intersects, is_within_bounds, pixel_to_cell,
    to_rectangle,
};
use crate::types::{Cell, GridConfig, GridId, GridSnapshot, ItemConfig, Span};
use crate::validation::ValidationService;
use tracing::{debug, trace};

/// One grid's state.
#[derive(Debug, Clone)]
pub struct GridModel {
    config: GridConfig,
    items: Vec<ItemConfig>,
}

impl GridModel {
    /// Create an empty grid. Fails if the configuration is invalid.
    pub fn new(config: GridConfig) -> GridResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            items: Vec::new(),
        })
    }

    /// Create a grid pre-populated with `items` (in z-order).
    pub fn with_items(config: GridConfig, items: Vec<ItemConfig>) -> GridResult<Self> {
        let mut grid = Self::new(config)?;
        for item in items {
            grid.add_item(item)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn id(&self) -> &GridId {
        &self.config.id
    }

    /// Items in z-order (last = front)
    #[inline]
    pub fn items(&self) -> &[ItemConfig] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &str) -> Option<&ItemConfig> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_item(id).is_some()
    }

    pub(crate) fn items_mut(&mut self) -> &mut [ItemConfig] {
        &mut self.items
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append an item on top of the z-order.
    pub fn add_item(&mut self, item: ItemConfig) -> GridResult<()> {
        if self.contains(&item.id) {
            return Err(GridError::DuplicateId {
                grid: self.config.id.clone(),
                id: item.id,
            });
        }
        debug!(grid = %self.config.id, item = %item.id, col = item.col, row = item.row, "Item added");
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by id. Absent ids are not an error.
    pub fn remove_item(&mut self, id: &str) -> Option<ItemConfig> {
        let index = self.items.iter().position(|item| item.id == id)?;
        debug!(grid = %self.config.id, item = id, "Item removed");
        Some(self.items.remove(index))
    }

    /// Replace the item with the same id, keeping its z-order slot.
    /// Returns false if no such item exists.
    pub fn update_item(&mut self, item: ItemConfig) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Move an item to the end of the z-order. Geometry is untouched.
    pub fn bring_to_front(&mut self, id: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        let item = self.items.remove(index);
        self.items.push(item);
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// True if any other item (different id) overlaps the candidate.
    pub fn has_collision(&self, candidate: &ItemConfig) -> bool {
        let rect = to_rectangle(candidate);
        self.collides_with_rect(&candidate.id, &rect)
    }

    fn collides_with_rect(&self, ignore_id: &str, rect: &CellRect) -> bool {
        self.items
            .iter()
            .filter(|other| other.id != ignore_id)
            .any(|other| intersects(&to_rectangle(other), rect))
    }

    /// Bounds + collisions + position conditions.
    pub fn is_legal_placement(&self, candidate: &ItemConfig, validation: &ValidationService) -> bool {
        let legal = is_within_bounds(
            candidate.col,
            candidate.row,
            candidate.col_span,
            candidate.row_span,
            &self.config,
        ) && !self.has_collision(candidate)
            && validation.validate_position(candidate.col, candidate.row, candidate, &self.config);
        trace!(grid = %self.config.id, item = %candidate.id, col = candidate.col, row = candidate.row, legal, "Placement checked");
        legal
    }

    /// Bounds + collisions + resize conditions.
    pub fn is_legal_resize(&self, candidate: &ItemConfig, validation: &ValidationService) -> bool {
        is_within_bounds(
            candidate.col,
            candidate.row,
            candidate.col_span,
            candidate.row_span,
            &self.config,
        ) && !self.has_collision(candidate)
            && validation.validate_resize(candidate.col, candidate.row, candidate, &self.config)
    }

    /// Cell a footprint would land on for grid-local pixels.
    ///
    /// Each axis is clamped independently so a footprint pushed past an edge
    /// slides back to the boundary instead of being rejected.
    pub fn resolve_drop_cell(&self, pixel_x: f32, pixel_y: f32, footprint: Span) -> Cell {
        let cell = pixel_to_cell(pixel_x, pixel_y, &self.config);
        Cell::new(
            clamp_anchor(cell.col, footprint.col_span, self.config.column_count),
            clamp_anchor(cell.row, footprint.row_span, self.config.row_count),
        )
    }

    /// Closest legal anchor for `candidate`, searching rings of growing
    /// Chebyshev distance around its current anchor up to `radius` cells.
    /// Within a ring, cells are visited in row-major order.
    pub fn nearest_legal_cell(
        &self,
        candidate: &ItemConfig,
        validation: &ValidationService,
        radius: u32,
    ) -> Option<Cell> {
        let origin = candidate.cell();
        for distance in 0..=radius as i64 {
            let (c0, r0) = (origin.col as i64, origin.row as i64);
            for row in (r0 - distance)..=(r0 + distance) {
                for col in (c0 - distance)..=(c0 + distance) {
                    let on_ring = (col - c0).abs() == distance || (row - r0).abs() == distance;
                    if !on_ring || col < 1 || row < 1 || col > u32::MAX as i64 || row > u32::MAX as i64 {
                        continue;
                    }
                    let cell = Cell::new(col as u32, row as u32);
                    if self.is_legal_placement(&candidate.moved_to(cell), validation) {
                        return Some(cell);
                    }
                }
            }
        }
        None
    }

    /// Topmost item whose pixel rectangle contains the grid-local point.
    pub fn item_at_pixel(&self, point: Point) -> Option<&ItemConfig> {
        self.items
            .iter()
            .rev()
            .find(|item| geometry::item_pixel_rect(item, &self.config).contains(point))
    }

    /// Grid-local pixel rectangle of an item.
    pub fn item_pixel_rect(&self, id: &str) -> Option<PixelRect> {
        self.get_item(id)
            .map(|item| geometry::item_pixel_rect(item, &self.config))
    }

    /// Rendered pixel size of the whole grid; `None` if an axis is unbounded.
    pub fn pixel_size(&self) -> Option<Size> {
        if !self.config.is_column_bounded() || !self.config.is_row_bounded() {
            return None;
        }
        let m = &self.config.margins;
        Some(Size::new(
            (self.config.effective_cell_width() + m.horizontal()) * self.config.column_count as f32,
            (self.config.effective_cell_height() + m.vertical()) * self.config.row_count as f32,
        ))
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            config: self.config.clone(),
            items: self.items.clone(),
        }
    }
}

/// Pull an anchor back until a `span`-long footprint ends on the last cell
/// of the axis (`u32::MAX` when the axis is unbounded).
fn clamp_anchor(anchor: u32, span: u32, count: u32) -> u32 {
    let extra = span.max(1) - 1;
    let last = if count > 0 { count } else { u32::MAX };
    if anchor as u64 + extra as u64 > last as u64 {
        last.saturating_sub(extra).max(1)
    } else {
        anchor
    }
}
