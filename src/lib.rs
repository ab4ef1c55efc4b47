//! Gridboard - grid placement, collision and drag/resize coordination.
//!
//! The engine places rectangular items on discrete grids (optionally nested
//! inside items of other grids) and coordinates a single pointer-driven drag
//! or resize across every registered grid. Rendering and input binding stay
//! with the host application; it feeds pointer events in page pixels and
//! renders the `PreviewState` and item lists it gets back.
//!
//! ## Modules
//!
//! - `geometry` - pixel/cell conversion, footprints and overlap tests
//! - `validation` - pluggable position and resize conditions
//! - `grid` - one grid's item set and placement queries
//! - `resize` - resize handles, live sizing and span commits
//! - `drag` - the coordinator owning all grids and the active interaction
//! - `events` - commit/cancel notifications
//! - `spatial_index` - R-tree over grid bounds for containment hit tests
//! - `settings` / `logging` / `perf` - configuration and instrumentation
//! - `replay` - scripted pointer sessions

pub mod constants;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod logging;
pub mod perf;
pub mod replay;
pub mod resize;
pub mod settings;
pub mod spatial_index;
pub mod types;
pub mod validation;

pub use drag::{DragCoordinator, DragSession, DropOutcome, InteractionState, PointerDownOutcome};
pub use error::{GridError, GridResult};
pub use events::{EventBus, GridEvent};
pub use geometry::{PixelRect, Point, Size};
pub use grid::GridModel;
pub use resize::{ResizeController, ResizeHandle, ResizeOutcome};
pub use settings::EngineSettings;
pub use types::{
    Cell, GridConfig, GridId, ItemConfig, ItemId, LayoutSnapshot, Margins, Payload, PreviewState,
    Span,
};
pub use validation::ValidationService;
