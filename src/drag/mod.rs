//! Drag coordination across every registered grid.
//!
//! `DragCoordinator` is the composition root's single owner of all grids and
//! of the one active interaction. Pointer positions enter in page space; each
//! grid is placed in page space by the bounds it was registered with.
//!
//! ## Modules
//!
//! - `state` - interaction state machine and the drag session
//! - `pointer_down` - hit testing and drag/resize initiation
//! - `pointer_move` - containment resolution and live previews
//! - `pointer_up` - commit or cancel of a drag
//! - `resizing` - resize session driven through the coordinator
//! - `nesting` - nested grid ownership and payload sync

mod nesting;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod resizing;
mod state;

pub use pointer_down::PointerDownOutcome;
pub use pointer_up::DropOutcome;
pub use state::{DragSession, InteractionState};

use crate::constants::POINTER_MOVE_BUDGET_MS;
use crate::error::{GridError, GridResult};
use crate::events::{EventBus, GridEvent};
use crate::geometry::{PixelRect, Point};
use crate::grid::GridModel;
use crate::perf::MoveStats;
use crate::settings::EngineSettings;
use crate::spatial_index::GridBoundsIndex;
use crate::types::{GridId, ItemConfig, LayoutSnapshot, PreviewState};
use crate::validation::ValidationService;
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use tracing::{debug, warn};

/// Owns the registered grids and coordinates drag, drop and resize.
#[derive(Debug)]
pub struct DragCoordinator {
    grids: HashMap<GridId, GridModel>,
    /// Registration order; snapshots and tie-breaks follow it
    order: Vec<GridId>,
    bounds: GridBoundsIndex,
    validation: ValidationService,
    events: EventBus,
    settings: EngineSettings,
    state: InteractionState,
    move_stats: MoveStats,
    /// Bumped by every change that can alter a preview; part of the
    /// duplicate pointer-move key
    revision: u64,
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl DragCoordinator {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            grids: HashMap::new(),
            order: Vec::new(),
            bounds: GridBoundsIndex::new(),
            validation: ValidationService::new(),
            events: EventBus::new(),
            settings,
            state: InteractionState::Idle,
            move_stats: MoveStats::new(POINTER_MOVE_BUDGET_MS),
            revision: 0,
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Add a grid, placed at `bounds` in page space.
    pub fn register_grid(&mut self, grid: GridModel, bounds: PixelRect) -> GridResult<()> {
        let id = grid.id().clone();
        if self.grids.contains_key(&id) {
            return Err(GridError::DuplicateGrid(id));
        }
        debug!(grid = %id, x = bounds.left(), y = bounds.top(), "Grid registered");
        self.bounds.insert(id.clone(), &bounds);
        self.order.push(id.clone());
        self.grids.insert(id, grid);
        self.bump_revision();
        Ok(())
    }

    /// Remove a grid and hand it back. An active drag over or out of it is
    /// cancelled as a drop outside every grid; a resize inside it is reverted.
    pub fn unregister_grid(&mut self, id: &str) -> GridResult<GridModel> {
        if !self.grids.contains_key(id) {
            return Err(GridError::GridNotRegistered(id.to_string()));
        }

        let involved = match &self.state {
            InteractionState::Idle => false,
            InteractionState::Dragging(session) => {
                session.current_grid.as_deref() == Some(id) || session.source.as_deref() == Some(id)
            }
            InteractionState::Resizing { controller, .. } => controller.grid_id() == id,
        };
        if involved {
            warn!(grid = id, "Grid unregistered during an active interaction, cancelling");
            self.abort_interaction();
        }

        self.bounds.remove(id);
        self.order.retain(|g| g != id);
        self.bump_revision();
        debug!(grid = id, "Grid unregistered");
        self.grids
            .remove(id)
            .ok_or_else(|| GridError::GridNotRegistered(id.to_string()))
    }

    /// Move or resize a grid's page-space bounds.
    pub fn set_grid_bounds(&mut self, id: &str, bounds: PixelRect) -> GridResult<()> {
        if !self.grids.contains_key(id) {
            return Err(GridError::GridNotRegistered(id.to_string()));
        }
        self.bounds.insert(id.to_string(), &bounds);
        self.bump_revision();
        Ok(())
    }

    pub fn grid_bounds(&self, id: &str) -> Option<PixelRect> {
        self.bounds.bounds(id)
    }

    /// Page-space origin of a grid; the page origin if it has no bounds.
    pub(crate) fn grid_origin(&self, id: &str) -> Point {
        self.bounds.bounds(id).map(|b| b.origin).unwrap_or_default()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.grids.contains_key(id)
    }

    /// Registered grid ids in registration order
    pub fn grid_ids(&self) -> &[GridId] {
        &self.order
    }

    pub fn grid(&self, id: &str) -> Option<&GridModel> {
        self.grids.get(id)
    }

    /// Direct access to a grid. Changes made here do not emit events or
    /// refresh nested payloads; prefer the coordinator's own mutators.
    pub fn grid_mut(&mut self, id: &str) -> Option<&mut GridModel> {
        self.bump_revision();
        self.grids.get_mut(id)
    }

    // ========================================================================
    // Item Management
    // ========================================================================

    /// Add an item to a registered grid and notify listeners.
    pub fn add_item(&mut self, grid: &str, item: ItemConfig) -> GridResult<()> {
        self.grids
            .get_mut(grid)
            .ok_or_else(|| GridError::GridNotRegistered(grid.to_string()))?
            .add_item(item)?;
        self.publish_changes(&[grid.to_string()]);
        Ok(())
    }

    /// Remove an item from whichever grid holds it (first in registration
    /// order). A drag or resize of that exact item is cancelled first.
    pub fn remove_item_anywhere(&mut self, item_id: &str) -> Option<(GridId, ItemConfig)> {
        let grid_id = self
            .order
            .iter()
            .find(|id| self.grids.get(*id).is_some_and(|g| g.contains(item_id)))?
            .clone();

        let involved = match &self.state {
            InteractionState::Idle => false,
            InteractionState::Dragging(session) => {
                session.item.id == item_id && session.source.as_ref() == Some(&grid_id)
            }
            InteractionState::Resizing { controller, .. } => {
                controller.item_id() == item_id && *controller.grid_id() == grid_id
            }
        };
        if involved {
            debug!(item = item_id, grid = %grid_id, "Active item removed, cancelling");
            self.abort_interaction();
        }

        let removed = self.grids.get_mut(&grid_id)?.remove_item(item_id)?;
        self.publish_changes(&[grid_id.clone()]);
        Some((grid_id, removed))
    }

    /// Raise an item to the top of its grid's z-order.
    pub fn bring_to_front(&mut self, item_id: &str) -> bool {
        let Some(grid_id) = self
            .order
            .iter()
            .find(|id| self.grids.get(*id).is_some_and(|g| g.contains(item_id)))
            .cloned()
        else {
            return false;
        };
        let raised = self
            .grids
            .get_mut(&grid_id)
            .is_some_and(|g| g.bring_to_front(item_id));
        if raised {
            self.publish_changes(&[grid_id]);
        }
        raised
    }

    /// Sync nested payloads for `changed` and emit `ItemsChanged` for every
    /// grid whose item list changed as a result.
    pub(crate) fn publish_changes(&mut self, changed: &[GridId]) {
        let touched = self.sync_nested_payloads(changed);
        self.emit_items_changed(touched);
    }

    pub(crate) fn emit_items_changed(&mut self, grids: Vec<GridId>) {
        self.bump_revision();
        for grid in grids {
            if let Some(model) = self.grids.get(&grid) {
                let items = model.items().to_vec();
                self.events.emit(GridEvent::ItemsChanged { grid, items });
            }
        }
    }

    /// End the active drag as a drop outside every grid, or revert the
    /// active resize.
    fn abort_interaction(&mut self) {
        match self.state.take() {
            InteractionState::Dragging(session) => {
                self.cancel_session(session);
            }
            InteractionState::Resizing { controller, preview } => {
                if preview.is_some() {
                    self.events.emit(GridEvent::PreviewChanged { preview: None });
                }
                let grid = controller.grid_id().clone();
                if let Some(item) = self.grids.get(&grid).and_then(|g| g.get_item(controller.item_id())) {
                    let item = item.clone();
                    self.events.emit(GridEvent::ResizeReverted { grid, item });
                }
            }
            InteractionState::Idle => {}
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Layout revision; changes whenever a preview could resolve differently
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_resizing(&self) -> bool {
        self.state.is_resizing()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.state.session()
    }

    /// Current placeholder; `None` means hidden
    pub fn preview(&self) -> Option<&PreviewState> {
        self.state.preview()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn validation(&self) -> &ValidationService {
        &self.validation
    }

    pub fn validation_mut(&mut self) -> &mut ValidationService {
        self.bump_revision();
        &mut self.validation
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Shorthand for `events_mut().subscribe()`
    pub fn subscribe(&mut self) -> Receiver<GridEvent> {
        self.events.subscribe()
    }

    /// Pointer-move latency statistics
    pub fn move_stats(&self) -> &MoveStats {
        &self.move_stats
    }

    /// Serializable view of every grid, in registration order.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            grids: self
                .order
                .iter()
                .filter_map(|id| self.grids.get(id))
                .map(GridModel::snapshot)
                .collect(),
        }
    }
}
