//! Core value types for the grid engine.
//!
//! Grid and item configurations are plain serializable values. The hosting
//! application owns `payload` data; the engine only looks inside it to find
//! nested grids.

use crate::constants::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_MARGIN, DEFAULT_MIN_CELL_HEIGHT,
    DEFAULT_MIN_CELL_WIDTH, MIN_SPAN, UNBOUNDED,
};
use crate::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Identifier of a grid. Stable for the lifetime of a registration.
pub type GridId = String;

/// Identifier of an item. Unique within its grid and stable across moves.
pub type ItemId = String;

// ============================================================================
// Cells and Spans
// ============================================================================

/// A 1-based cell anchor (top-left cell of a footprint).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: u32,
    pub row: u32,
}

impl Cell {
    #[inline]
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Number of columns and rows an item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub col_span: u32,
    pub row_span: u32,
}

impl Span {
    /// Create a span, flooring both axes to one cell.
    #[inline]
    pub fn new(col_span: u32, row_span: u32) -> Self {
        Self {
            col_span: col_span.max(MIN_SPAN),
            row_span: row_span.max(MIN_SPAN),
        }
    }

    /// The 1x1 footprint
    pub const UNIT: Span = Span {
        col_span: 1,
        row_span: 1,
    };
}

// ============================================================================
// Grid Configuration
// ============================================================================

/// Spacing around every cell, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const ZERO: Margins = Margins {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Same margin on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Expand a 1-4 value shorthand the way CSS does:
    /// `[all]`, `[vertical, horizontal]`, `[top, horizontal, bottom]`,
    /// `[top, right, bottom, left]`. An empty slice yields zero margins.
    pub fn from_css(values: &[f32]) -> Self {
        let Some(&top) = values.first() else {
            return Self::ZERO;
        };
        let right = values.get(1).copied().unwrap_or(top);
        let bottom = values.get(2).copied().unwrap_or(top);
        let left = values.get(3).copied().unwrap_or(right);
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Left + right
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN)
    }
}

/// Per-grid configuration. Treated as immutable once a grid is built.
///
/// `column_count`/`row_count` of `0` mean the axis is unbounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub id: GridId,
    pub column_count: u32,
    pub row_count: u32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub margins: Margins,
    pub min_cell_width: f32,
    pub min_cell_height: f32,
    pub draggable_by_default: bool,
    pub resizable_by_default: bool,
    /// On conflict keep the current cell (`true`) or snap to the nearest
    /// legal cell (`false`).
    pub prefer_existing_position: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            column_count: UNBOUNDED,
            row_count: UNBOUNDED,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            margins: Margins::default(),
            min_cell_width: DEFAULT_MIN_CELL_WIDTH,
            min_cell_height: DEFAULT_MIN_CELL_HEIGHT,
            draggable_by_default: true,
            resizable_by_default: true,
            prefer_existing_position: true,
        }
    }
}

impl GridConfig {
    /// Create a config with default cell metrics.
    pub fn new(id: impl Into<GridId>, column_count: u32, row_count: u32) -> Self {
        Self {
            id: id.into(),
            column_count,
            row_count,
            ..Default::default()
        }
    }

    pub fn with_cell_size(mut self, width: f32, height: f32) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_min_cell_size(mut self, width: f32, height: f32) -> Self {
        self.min_cell_width = width;
        self.min_cell_height = height;
        self
    }

    pub fn with_draggable_by_default(mut self, draggable: bool) -> Self {
        self.draggable_by_default = draggable;
        self
    }

    pub fn with_resizable_by_default(mut self, resizable: bool) -> Self {
        self.resizable_by_default = resizable;
        self
    }

    pub fn with_prefer_existing_position(mut self, prefer: bool) -> Self {
        self.prefer_existing_position = prefer;
        self
    }

    /// Check the invariants a grid relies on for its coordinate math.
    pub fn validate(&self) -> GridResult<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !positive(self.cell_width) || !positive(self.cell_height) {
            return Err(GridError::InvalidConfig(format!(
                "grid `{}`: cell size must be positive (got {}x{})",
                self.id, self.cell_width, self.cell_height
            )));
        }
        let m = &self.margins;
        if ![m.top, m.right, m.bottom, m.left].into_iter().all(non_negative) {
            return Err(GridError::InvalidConfig(format!(
                "grid `{}`: margins must be finite and non-negative",
                self.id
            )));
        }
        if !non_negative(self.min_cell_width) || !non_negative(self.min_cell_height) {
            return Err(GridError::InvalidConfig(format!(
                "grid `{}`: minimum cell size must be finite and non-negative",
                self.id
            )));
        }
        Ok(())
    }

    /// Pixel distance between two column anchors used for cell lookup.
    #[inline]
    pub fn column_stride(&self) -> f32 {
        self.cell_width + self.margins.horizontal()
    }

    /// Pixel distance between two row anchors used for cell lookup.
    #[inline]
    pub fn row_stride(&self) -> f32 {
        self.cell_height + self.margins.vertical()
    }

    /// Rendered cell width, never smaller than the configured minimum.
    #[inline]
    pub fn effective_cell_width(&self) -> f32 {
        self.min_cell_width.max(self.cell_width)
    }

    /// Rendered cell height, never smaller than the configured minimum.
    #[inline]
    pub fn effective_cell_height(&self) -> f32 {
        self.min_cell_height.max(self.cell_height)
    }

    pub fn is_column_bounded(&self) -> bool {
        self.column_count != UNBOUNDED
    }

    pub fn is_row_bounded(&self) -> bool {
        self.row_count != UNBOUNDED
    }
}

// ============================================================================
// Items
// ============================================================================

/// Opaque application data attached to an item.
///
/// `NestedGrid` marks an item that hosts another grid; `grid` names the
/// hosted grid and `items` mirrors its current contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    Plain(serde_json::Value),
    NestedGrid { grid: GridId, items: Vec<ItemConfig> },
}

impl Default for Payload {
    fn default() -> Self {
        Self::Plain(serde_json::Value::Null)
    }
}

impl Payload {
    /// Returns true if this payload hosts a grid
    pub fn is_grid_payload(&self) -> bool {
        matches!(self, Self::NestedGrid { .. })
    }

    /// Id of the hosted grid, if any
    pub fn nested_grid_id(&self) -> Option<&GridId> {
        match self {
            Self::NestedGrid { grid, .. } => Some(grid),
            Self::Plain(_) => None,
        }
    }

    /// Items mirrored from the hosted grid, if any
    pub fn nested_items(&self) -> Option<&[ItemConfig]> {
        match self {
            Self::NestedGrid { items, .. } => Some(items),
            Self::Plain(_) => None,
        }
    }
}

fn default_anchor() -> u32 {
    1
}

fn default_span() -> u32 {
    MIN_SPAN
}

/// One placed rectangle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    pub id: ItemId,
    #[serde(default = "default_anchor")]
    pub col: u32,
    #[serde(default = "default_anchor")]
    pub row: u32,
    #[serde(default = "default_span")]
    pub col_span: u32,
    #[serde(default = "default_span")]
    pub row_span: u32,
    /// `None` falls back to the owning grid's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
    /// `None` falls back to the owning grid's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(default)]
    pub payload: Payload,
}

impl ItemConfig {
    /// Create an item. Anchors and spans are floored to 1.
    pub fn new(id: impl Into<ItemId>, col: u32, row: u32, col_span: u32, row_span: u32) -> Self {
        Self {
            id: id.into(),
            col: col.max(1),
            row: row.max(1),
            col_span: col_span.max(MIN_SPAN),
            row_span: row_span.max(MIN_SPAN),
            draggable: None,
            resizable: None,
            payload: Payload::default(),
        }
    }

    /// Create an item with a freshly generated UUID v4 id.
    pub fn with_generated_id(col: u32, row: u32, col_span: u32, row_span: u32) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), col, row, col_span, row_span)
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = Some(draggable);
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = Some(resizable);
        self
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.col, self.row)
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.col_span, self.row_span)
    }

    /// Copy of this item anchored at `cell`.
    pub fn moved_to(&self, cell: Cell) -> Self {
        Self {
            col: cell.col,
            row: cell.row,
            ..self.clone()
        }
    }

    /// Copy of this item with a new span.
    pub fn resized_to(&self, span: Span) -> Self {
        Self {
            col_span: span.col_span,
            row_span: span.row_span,
            ..self.clone()
        }
    }

    /// Whether the item can be dragged inside a grid configured as `config`
    pub fn is_draggable_in(&self, config: &GridConfig) -> bool {
        self.draggable.unwrap_or(config.draggable_by_default)
    }

    /// Whether the item can be resized inside a grid configured as `config`
    pub fn is_resizable_in(&self, config: &GridConfig) -> bool {
        self.resizable.unwrap_or(config.resizable_by_default)
    }
}

// ============================================================================
// Preview and Snapshots
// ============================================================================

/// Candidate placement shown by the UI layer while a drag or resize is live.
/// An absent preview (`None`) means the placeholder is hidden.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewState {
    pub grid: GridId,
    pub valid: bool,
    pub col: u32,
    pub row: u32,
    pub col_span: u32,
    pub row_span: u32,
}

impl PreviewState {
    pub fn new(grid: impl Into<GridId>, cell: Cell, span: Span, valid: bool) -> Self {
        Self {
            grid: grid.into(),
            valid,
            col: cell.col,
            row: cell.row,
            col_span: span.col_span,
            row_span: span.row_span,
        }
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.col, self.row)
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.col_span, self.row_span)
    }
}

/// Serializable view of one grid's configuration and items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub config: GridConfig,
    pub items: Vec<ItemConfig>,
}

/// Serializable view of every registered grid, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub grids: Vec<GridSnapshot>,
}

impl LayoutSnapshot {
    /// Look up a grid's snapshot by id
    pub fn grid(&self, id: &str) -> Option<&GridSnapshot> {
        self.grids.iter().find(|g| g.config.id == id)
    }
}
