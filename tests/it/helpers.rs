//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestGridBuilder` - Builder pattern for creating test grids with items
//! - `CoordinatorBuilder` - Registers several grids at page positions
//! - Small assertion helpers shared by unit and integration tests

use gridboard::{
    DragCoordinator, EngineSettings, GridConfig, GridEvent, GridModel, ItemConfig, Margins,
    Payload, PixelRect,
};

// ============================================================================
// TestGridBuilder - Builder pattern for creating test grids
// ============================================================================

/// Builder for grids with square 100px cells and no margins, so pixel math
/// in tests stays readable.
///
/// # Example
/// ```ignore
/// let grid = TestGridBuilder::new("main", 4, 4)
///     .with_item("a", 1, 1, 2, 2)
///     .build();
/// ```
pub struct TestGridBuilder {
    config: GridConfig,
    items: Vec<ItemConfig>,
}

impl TestGridBuilder {
    pub fn new(id: &str, columns: u32, rows: u32) -> Self {
        Self {
            config: GridConfig::new(id, columns, rows)
                .with_cell_size(100.0, 100.0)
                .with_margins(Margins::ZERO),
            items: Vec::new(),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    pub fn prefer_existing_position(mut self, prefer: bool) -> Self {
        self.config.prefer_existing_position = prefer;
        self
    }

    pub fn locked(mut self) -> Self {
        self.config.draggable_by_default = false;
        self.config.resizable_by_default = false;
        self
    }

    pub fn with_item(mut self, id: &str, col: u32, row: u32, col_span: u32, row_span: u32) -> Self {
        self.items.push(ItemConfig::new(id, col, row, col_span, row_span));
        self
    }

    /// Add an item hosting the grid `nested`.
    pub fn with_host_item(
        mut self,
        id: &str,
        nested: &str,
        col: u32,
        row: u32,
        col_span: u32,
        row_span: u32,
    ) -> Self {
        self.items.push(
            ItemConfig::new(id, col, row, col_span, row_span).with_payload(Payload::NestedGrid {
                grid: nested.to_string(),
                items: Vec::new(),
            }),
        );
        self
    }

    pub fn build(self) -> GridModel {
        GridModel::with_items(self.config, self.items).expect("test grid should be valid")
    }
}

// ============================================================================
// CoordinatorBuilder
// ============================================================================

/// Registers grids at page positions. Bounds are sized from the grid's
/// pixel size (or 1000x1000 for unbounded grids).
pub struct CoordinatorBuilder {
    coordinator: DragCoordinator,
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            coordinator: DragCoordinator::new(EngineSettings::default()),
        }
    }

    pub fn grid_at(mut self, grid: GridModel, x: f32, y: f32) -> Self {
        let size = grid
            .pixel_size()
            .map(|s| (s.width, s.height))
            .unwrap_or((1000.0, 1000.0));
        self.coordinator
            .register_grid(grid, PixelRect::new(x, y, size.0, size.1))
            .expect("grid ids in tests are unique");
        self
    }

    pub fn build(self) -> DragCoordinator {
        self.coordinator
    }
}

// ============================================================================
// Assertions
// ============================================================================

/// Ids of a grid's items in z-order.
pub fn item_ids(coordinator: &DragCoordinator, grid: &str) -> Vec<String> {
    coordinator
        .grid(grid)
        .expect("grid should be registered")
        .items()
        .iter()
        .map(|item| item.id.clone())
        .collect()
}

/// Anchor of an item as `(col, row)`.
pub fn item_cell(coordinator: &DragCoordinator, grid: &str, id: &str) -> (u32, u32) {
    let item = coordinator
        .grid(grid)
        .and_then(|g| g.get_item(id))
        .expect("item should exist");
    (item.col, item.row)
}

/// Short names of the events received so far, for ordering assertions.
pub fn event_names(events: &[GridEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|event| match event {
            GridEvent::DragStarted { .. } => "drag_started",
            GridEvent::PreviewChanged { .. } => "preview_changed",
            GridEvent::DropCommitted { .. } => "drop_committed",
            GridEvent::DragCancelled { .. } => "drag_cancelled",
            GridEvent::ResizeCommitted { .. } => "resize_committed",
            GridEvent::ResizeReverted { .. } => "resize_reverted",
            GridEvent::ItemsChanged { .. } => "items_changed",
        })
        .collect()
}
