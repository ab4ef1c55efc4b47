//! Coordinate conversion between pixels and grid cells.
//!
//! All functions are pure. Pixel values are grid-local unless a function
//! says otherwise; cell coordinates are 1-based and inclusive.

use crate::types::{Cell, GridConfig, ItemConfig, Span};
use serde::{Deserialize, Serialize};

// ============================================================================
// Pixel Types
// ============================================================================

/// A position in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset_by(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// `self - other`, as a vector
    #[inline]
    pub fn delta_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub origin: Point,
    pub size: Size,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Same rectangle shifted by `origin`
    pub fn translated(&self, origin: Point) -> Self {
        Self {
            origin: self.origin.offset_by(origin.x, origin.y),
            size: self.size,
        }
    }
}

// ============================================================================
// Cell Rectangles
// ============================================================================

/// An item footprint in inclusive cell coordinates (not pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Footprint of an item.
#[inline]
pub fn to_rectangle(item: &ItemConfig) -> CellRect {
    footprint(item.cell(), item.span())
}

/// Footprint of a span anchored at `cell`.
#[inline]
pub fn footprint(cell: Cell, span: Span) -> CellRect {
    CellRect {
        left: cell.col,
        top: cell.row,
        right: cell.col.saturating_add(span.col_span.saturating_sub(1)),
        bottom: cell.row.saturating_add(span.row_span.saturating_sub(1)),
    }
}

/// Axis-aligned overlap on inclusive cell rectangles.
#[inline]
pub fn intersects(r1: &CellRect, r2: &CellRect) -> bool {
    !(r2.left > r1.right || r2.right < r1.left || r2.top > r1.bottom || r2.bottom < r1.top)
}

/// Whether a footprint fits the grid. A count of 0 leaves that axis unbounded.
#[inline]
pub fn is_within_bounds(
    col: u32,
    row: u32,
    col_span: u32,
    row_span: u32,
    config: &GridConfig,
) -> bool {
    let last_col = col as u64 + col_span.max(1) as u64 - 1;
    let last_row = row as u64 + row_span.max(1) as u64 - 1;
    (config.column_count == 0 || last_col <= config.column_count as u64)
        && (config.row_count == 0 || last_row <= config.row_count as u64)
}

// ============================================================================
// Pixel <-> Cell
// ============================================================================

fn axis_to_cell(pixels: f32, stride: f32, count: u32) -> u32 {
    let index = (pixels / stride).round() as i64 + 1;
    let clamped = index.clamp(1, u32::MAX as i64) as u32;
    if count > 0 { clamped.min(count) } else { clamped }
}

/// Convert grid-local pixels to the nearest cell anchor.
///
/// The result is at least `(1, 1)` and, on bounded axes, keeps a 1x1
/// footprint inside the grid.
pub fn pixel_to_cell(px: f32, py: f32, config: &GridConfig) -> Cell {
    Cell::new(
        axis_to_cell(px, config.column_stride(), config.column_count),
        axis_to_cell(py, config.row_stride(), config.row_count),
    )
}

/// Grid-local pixel position of a cell's top-left corner.
pub fn cell_to_pixel(col: u32, row: u32, config: &GridConfig) -> Point {
    let m = &config.margins;
    let x = (config.effective_cell_width() + m.horizontal()) * col.saturating_sub(1) as f32 + m.left;
    let y = (config.effective_cell_height() + m.vertical()) * row.saturating_sub(1) as f32 + m.top;
    Point::new(x, y)
}

/// Rendered pixel size of a span. Interior margins between spanned cells are
/// part of the item.
pub fn span_pixel_size(span: Span, config: &GridConfig) -> Size {
    let m = &config.margins;
    let cols = span.col_span.max(1) as f32;
    let rows = span.row_span.max(1) as f32;
    Size::new(
        config.effective_cell_width() * cols + m.horizontal() * (cols - 1.0),
        config.effective_cell_height() * rows + m.vertical() * (rows - 1.0),
    )
}

/// Grid-local pixel rectangle of an item.
pub fn item_pixel_rect(item: &ItemConfig, config: &GridConfig) -> PixelRect {
    PixelRect {
        origin: cell_to_pixel(item.col, item.row, config),
        size: span_pixel_size(item.span(), config),
    }
}

/// Convert a page-space pointer into grid-local pixels of the dragged item's
/// top-left corner, given the grid's page origin and the grab offset.
#[inline]
pub fn page_to_grid(pointer: Point, grid_origin: Point, grab_offset: Point) -> Point {
    Point::new(
        pointer.x - grid_origin.x - grab_offset.x,
        pointer.y - grid_origin.y - grab_offset.y,
    )
}
