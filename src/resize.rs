//! Resize handling - handle detection, live sizing and span commits.
//!
//! A resize starts when the pointer goes down inside the border band of a
//! resizable item. While it is live the controller tracks the pixel size the
//! user is dragging out and the span it snaps to; on release the span is
//! either committed in place or the item keeps its original span.
//!
//! ## Handles
//!
//! ```text
//! +-----------------+
//! |                 |W   W = width  (right edge band)
//! |                 |W   H = height (bottom edge band)
//! |HHHHHHHHHHHHHHHHH|B   B = both   (bottom-right corner, wins over W/H)
//! +-----------------+
//! ```

use crate::error::{GridError, GridResult};
use crate::geometry::{PixelRect, Point, Size, span_pixel_size};
use crate::grid::GridModel;
use crate::types::{Cell, GridConfig, GridId, ItemConfig, PreviewState, Span};
use crate::validation::ValidationService;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Which edges a resize drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    /// Bottom-right corner: width and height
    Both,
    /// Right edge: width only
    Width,
    /// Bottom edge: height only
    Height,
}

impl ResizeHandle {
    #[inline]
    pub fn moves_width(self) -> bool {
        matches!(self, Self::Both | Self::Width)
    }

    #[inline]
    pub fn moves_height(self) -> bool {
        matches!(self, Self::Both | Self::Height)
    }
}

/// Handle under the pointer, if any. The pointer must be inside `item_rect`
/// and within `border_size` of the right and/or bottom edge.
pub fn detect_handle(pointer: Point, item_rect: &PixelRect, border_size: f32) -> Option<ResizeHandle> {
    if !item_rect.contains(pointer) {
        return None;
    }
    let near_right = pointer.x > item_rect.right() - border_size;
    let near_bottom = pointer.y > item_rect.bottom() - border_size;
    match (near_right, near_bottom) {
        (true, true) => Some(ResizeHandle::Both),
        (true, false) => Some(ResizeHandle::Width),
        (false, true) => Some(ResizeHandle::Height),
        (false, false) => None,
    }
}

/// Pixel size while dragging. The axis the handle does not move stays at
/// `initial`; moved axes never shrink below the minimum.
pub fn compute_live_size(
    handle: ResizeHandle,
    drag_start: Point,
    current: Point,
    initial: Size,
    min_width: f32,
    min_height: f32,
) -> Size {
    let width = if handle.moves_width() {
        (initial.width + (current.x - drag_start.x)).max(min_width)
    } else {
        initial.width
    };
    let height = if handle.moves_height() {
        (initial.height + (current.y - drag_start.y)).max(min_height)
    } else {
        initial.height
    };
    Size::new(width, height)
}

/// Span nearest to a pixel size, at least one cell per axis.
pub fn snap_to_cells(pixel_size: Size, config: &GridConfig) -> Span {
    let snap = |pixels: f32, stride: f32| {
        let cells = (pixels / stride).round();
        if cells.is_finite() && cells >= 1.0 {
            cells.min(u32::MAX as f32) as u32
        } else {
            1
        }
    };
    Span::new(
        snap(pixel_size.width, config.column_stride()),
        snap(pixel_size.height, config.row_stride()),
    )
}

/// Clamp a span so it does not run past the grid's last column/row when
/// anchored at `anchor`. Unbounded axes are left alone.
pub fn fit_span_to_grid(span: Span, anchor: Cell, config: &GridConfig) -> Span {
    let remaining = |count: u32, start: u32| count.saturating_sub(start).saturating_add(1);
    let col_span = if config.is_column_bounded() {
        span.col_span.min(remaining(config.column_count, anchor.col))
    } else {
        span.col_span
    };
    let row_span = if config.is_row_bounded() {
        span.row_span.min(remaining(config.row_count, anchor.row))
    } else {
        span.row_span
    };
    Span::new(col_span, row_span)
}

/// Result of ending a resize.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeOutcome {
    /// The grid now holds the item with its new span
    Committed(ItemConfig),
    /// The item keeps its pre-resize span
    Reverted(ItemConfig),
}

impl ResizeOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// The item as it is in the grid after the outcome.
    pub fn item(&self) -> &ItemConfig {
        match self {
            Self::Committed(item) | Self::Reverted(item) => item,
        }
    }
}

/// A live resize of one item.
#[derive(Debug, Clone)]
pub struct ResizeController {
    grid: GridId,
    original: ItemConfig,
    handle: ResizeHandle,
    drag_start: Point,
    initial_size: Size,
    min_size: Size,
    live_size: Size,
    proposed: Span,
}

impl ResizeController {
    /// Start resizing `item_id` from the pointer position `drag_start`.
    pub fn begin(
        grid: &GridModel,
        item_id: &str,
        handle: ResizeHandle,
        drag_start: Point,
    ) -> GridResult<Self> {
        let item = grid.get_item(item_id).ok_or_else(|| GridError::ItemNotFound {
            grid: grid.id().clone(),
            id: item_id.to_string(),
        })?;
        if !item.is_resizable_in(grid.config()) {
            return Err(GridError::NotResizable(item.id.clone()));
        }

        let config = grid.config();
        let initial_size = span_pixel_size(item.span(), config);
        debug!(grid = %config.id, item = item_id, ?handle, "Resize started");

        Ok(Self {
            grid: config.id.clone(),
            original: item.clone(),
            handle,
            drag_start,
            initial_size,
            min_size: Size::new(config.min_cell_width, config.min_cell_height),
            live_size: initial_size,
            proposed: item.span(),
        })
    }

    pub fn grid_id(&self) -> &GridId {
        &self.grid
    }

    pub fn item_id(&self) -> &str {
        &self.original.id
    }

    pub fn handle(&self) -> ResizeHandle {
        self.handle
    }

    /// Current dragged-out pixel size
    pub fn live_size(&self) -> Size {
        self.live_size
    }

    /// Span the current pixel size snaps to
    pub fn proposed_span(&self) -> Span {
        self.proposed
    }

    /// Proposed span trimmed to what fits inside the grid from the item's
    /// anchor, for drawing the placeholder.
    pub fn display_span(&self, config: &GridConfig) -> Span {
        fit_span_to_grid(self.proposed, self.original.cell(), config)
    }

    /// Track the pointer and report the live preview.
    pub fn update(
        &mut self,
        grid: &GridModel,
        pointer: Point,
        validation: &ValidationService,
    ) -> PreviewState {
        self.live_size = compute_live_size(
            self.handle,
            self.drag_start,
            pointer,
            self.initial_size,
            self.min_size.width,
            self.min_size.height,
        );
        self.proposed = snap_to_cells(self.live_size, grid.config());

        let candidate = self.original.resized_to(self.proposed);
        let valid = grid.is_legal_resize(&candidate, validation);
        PreviewState::new(self.grid.clone(), self.original.cell(), self.proposed, valid)
    }

    /// Finish the resize with the last proposed span.
    pub fn commit(self, grid: &mut GridModel, validation: &ValidationService) -> ResizeOutcome {
        Self::commit_span(grid, &self.original, self.proposed, validation)
    }

    /// Apply `new_span` to `item` if the grid accepts it, otherwise keep the
    /// item as it was.
    pub fn commit_span(
        grid: &mut GridModel,
        item: &ItemConfig,
        new_span: Span,
        validation: &ValidationService,
    ) -> ResizeOutcome {
        let candidate = item.resized_to(new_span);
        if grid.is_legal_resize(&candidate, validation) && grid.update_item(candidate.clone()) {
            info!(
                grid = %grid.id(),
                item = %item.id,
                col_span = new_span.col_span,
                row_span = new_span.row_span,
                "Resize committed"
            );
            ResizeOutcome::Committed(candidate)
        } else {
            debug!(grid = %grid.id(), item = %item.id, "Resize reverted");
            ResizeOutcome::Reverted(item.clone())
        }
    }
}
