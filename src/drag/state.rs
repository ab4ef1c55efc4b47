//! Interaction state machine - the single active drag or resize.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging     (begin_drag / begin_external_drag / pointer_down on an item body)
//! Idle -> Resizing     (begin_resize / pointer_down on an item's border band)
//!
//! Dragging -> Idle     (on_pointer_up: commit or cancel; unregistering the hovered grid)
//! Resizing -> Idle     (end_resize: commit or revert)
//! ```
//!
//! Holding the session inside the enum keeps "dragging and resizing at the
//! same time" unrepresentable.

use crate::geometry::Point;
use crate::resize::ResizeController;
use crate::types::{GridId, ItemConfig, ItemId, PreviewState};
use std::collections::HashSet;

/// A live drag of one item.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub(crate) item: ItemConfig,
    /// `None` for an external (palette) drag
    pub(crate) source: Option<GridId>,
    /// Offset from the item's top-left to the pointer at drag start
    pub(crate) pointer_offset: Point,
    pub(crate) current_grid: Option<GridId>,
    pub(crate) current_preview: Option<PreviewState>,
    /// Grids hosted (transitively) by the dragged item; never drop targets
    pub(crate) hosted_grids: HashSet<GridId>,
    /// Last pointer position, candidate grid and layout revision seen by
    /// `on_pointer_move`
    pub(crate) last_move: Option<(Point, Option<GridId>, u64)>,
}

impl DragSession {
    pub(crate) fn new(
        item: ItemConfig,
        source: Option<GridId>,
        pointer_offset: Point,
        hosted_grids: HashSet<GridId>,
    ) -> Self {
        Self {
            item,
            source,
            pointer_offset,
            current_grid: None,
            current_preview: None,
            hosted_grids,
            last_move: None,
        }
    }

    /// The dragged item as it was when the drag started
    pub fn item(&self) -> &ItemConfig {
        &self.item
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item.id
    }

    /// Grid the item came from; `None` for an external drag
    pub fn source(&self) -> Option<&GridId> {
        self.source.as_ref()
    }

    pub fn pointer_offset(&self) -> Point {
        self.pointer_offset
    }

    /// Grid under the pointer, or `None` when outside every grid
    pub fn current_grid(&self) -> Option<&GridId> {
        self.current_grid.as_ref()
    }

    pub fn current_preview(&self) -> Option<&PreviewState> {
        self.current_preview.as_ref()
    }

    /// Returns true if `grid` is hosted by the dragged item
    pub fn hosts(&self, grid: &str) -> bool {
        self.hosted_grids.contains(grid)
    }
}

/// What the coordinator is currently doing.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// No active interaction
    #[default]
    Idle,

    /// Dragging one item
    Dragging(DragSession),

    /// Resizing one item in place
    Resizing {
        controller: ResizeController,
        /// Last preview reported by `update_resize`
        preview: Option<PreviewState>,
    },
}

impl InteractionState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a drag session is active
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Returns true if a resize is active
    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// The active drag session, if any
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// The active resize controller, if any
    pub fn resize_controller(&self) -> Option<&ResizeController> {
        match self {
            Self::Resizing { controller, .. } => Some(controller),
            _ => None,
        }
    }

    /// Get the item ID being dragged, if any
    pub fn dragged_item_id(&self) -> Option<&str> {
        self.session().map(|s| s.item.id.as_str())
    }

    /// Get the item ID being resized, if any
    pub fn resized_item_id(&self) -> Option<&str> {
        self.resize_controller().map(|c| c.item_id())
    }

    /// Current placeholder for whichever interaction is active
    pub fn preview(&self) -> Option<&PreviewState> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => session.current_preview.as_ref(),
            Self::Resizing { preview, .. } => preview.as_ref(),
        }
    }

    /// Reset to Idle state, returning the previous state
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
