//! Engine-wide constants.
//!
//! Centralizes default sizes and thresholds so grids, settings and the
//! resize controller agree on the same values.

// ============================================================================
// Grid Defaults
// ============================================================================

/// Default cell width in pixels
pub const DEFAULT_CELL_WIDTH: f32 = 250.0;

/// Default cell height in pixels
pub const DEFAULT_CELL_HEIGHT: f32 = 250.0;

/// Default margin applied on every side of a cell
pub const DEFAULT_MARGIN: f32 = 10.0;

/// Default minimum rendered cell width (0 = no minimum)
pub const DEFAULT_MIN_CELL_WIDTH: f32 = 0.0;

/// Default minimum rendered cell height (0 = no minimum)
pub const DEFAULT_MIN_CELL_HEIGHT: f32 = 0.0;

/// Column/row count meaning "unbounded axis"
pub const UNBOUNDED: u32 = 0;

// ============================================================================
// Item Defaults
// ============================================================================

/// Smallest legal column or row span
pub const MIN_SPAN: u32 = 1;

/// Width of the edge band (pixels) in which a pointer grabs a resize handle
pub const DEFAULT_BORDER_SIZE: f32 = 15.0;

// ============================================================================
// Placement
// ============================================================================

/// How many cells away from the pointer the nearest-legal-cell search looks
/// when a grid snaps instead of keeping the current position
pub const DEFAULT_SNAP_SEARCH_RADIUS: u32 = 8;

// ============================================================================
// Logging & Profiling
// ============================================================================

/// Filter used when neither settings nor `RUST_LOG` provide one
pub const DEFAULT_LOG_FILTER: &str = "gridboard=info";

/// Budget for a single pointer-move recomputation in milliseconds
pub const POINTER_MOVE_BUDGET_MS: f64 = 4.0;
