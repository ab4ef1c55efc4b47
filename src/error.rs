//! Error types for grid operations
//!
//! Only structural problems are errors. An illegal drop or resize target is
//! reported through the preview state and resolves to a silent revert.

use crate::types::{GridId, ItemId};
use thiserror::Error;

/// Errors surfaced by the grid engine
#[derive(Error, Debug)]
pub enum GridError {
    /// An item with the same id already lives in the grid
    #[error("item `{id}` already exists in grid `{grid}`")]
    DuplicateId { grid: GridId, id: ItemId },

    /// A drag or resize is already in progress
    #[error("a drag or resize operation is already active")]
    AlreadyDragging,

    /// The grid was never registered with the coordinator
    #[error("grid `{0}` is not registered")]
    GridNotRegistered(GridId),

    /// A grid with the same id is already registered
    #[error("grid `{0}` is already registered")]
    DuplicateGrid(GridId),

    /// The item is not part of the grid
    #[error("item `{id}` not found in grid `{grid}`")]
    ItemNotFound { grid: GridId, id: ItemId },

    /// Item cannot be dragged
    #[error("item `{0}` is not draggable")]
    NotDraggable(ItemId),

    /// Item cannot be resized
    #[error("item `{0}` is not resizable")]
    NotResizable(ItemId),

    /// Grid configuration violates its invariants
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// JSON parsing error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for grid operations
pub type GridResult<T> = Result<T, GridError>;
