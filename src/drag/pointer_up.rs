//! Pointer up - finalize a drag.
//!
//! A drop commits only if the pointer is over a grid and the last preview
//! was valid; legality is re-checked against the live grid before anything
//! moves. Every other path cancels, leaving all grids untouched.

use super::DragCoordinator;
use super::state::{DragSession, InteractionState};
use crate::error::GridError;
use crate::events::GridEvent;
use crate::profile_scope;
use crate::types::{GridId, ItemConfig, ItemId, PreviewState};
use serde::Serialize;
use tracing::{debug, info, warn};

/// How a drag ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// The item now lives in `target` at its new cell
    Committed {
        item: ItemConfig,
        source: Option<GridId>,
        target: GridId,
    },
    /// Nothing changed
    Cancelled { item: ItemId },
}

impl DropOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

impl DragCoordinator {
    /// End the active drag. Returns `None` when no drag is active.
    pub fn on_pointer_up(&mut self) -> Option<DropOutcome> {
        profile_scope!("on_pointer_up");

        let session = match self.state.take() {
            InteractionState::Dragging(session) => session,
            other => {
                self.state = other;
                return None;
            }
        };

        let target = match (&session.current_grid, &session.current_preview) {
            (Some(grid), Some(preview)) if preview.valid => Some((grid.clone(), preview.clone())),
            _ => None,
        };
        let outcome = match target {
            Some((grid, preview)) => self.commit_drop(session, grid, preview),
            None => self.cancel_session(session),
        };
        Some(outcome)
    }

    fn commit_drop(&mut self, session: DragSession, target: GridId, preview: PreviewState) -> DropOutcome {
        // The live copy carries payload syncs made while the drag was running
        let live = session
            .source
            .as_ref()
            .and_then(|source| self.grids.get(source))
            .and_then(|model| model.get_item(&session.item.id))
            .cloned()
            .unwrap_or_else(|| session.item.clone());
        let placed = live.moved_to(preview.cell());
        let same_grid = session.source.as_deref() == Some(target.as_str());

        let Some(target_model) = self.grids.get(&target) else {
            return self.cancel_session(session);
        };
        let legal = target_model.is_legal_placement(&placed, &self.validation)
            && (same_grid || !target_model.contains(&placed.id));
        if !legal {
            debug!(grid = %target, item = %placed.id, "Drop no longer legal, cancelling");
            return self.cancel_session(session);
        }

        let mut changed = Vec::with_capacity(2);
        if same_grid {
            if let Some(model) = self.grids.get_mut(&target) {
                model.update_item(placed.clone());
            }
        } else {
            // Add before removing so a rejected drop leaves the source intact
            let added = match self.grids.get_mut(&target) {
                Some(model) => model.add_item(placed.clone()),
                None => Err(GridError::GridNotRegistered(target.clone())),
            };
            if let Err(e) = added {
                warn!(grid = %target, item = %placed.id, error = %e, "Drop rejected by target grid");
                return self.cancel_session(session);
            }
            if let Some(source) = &session.source {
                if let Some(model) = self.grids.get_mut(source) {
                    model.remove_item(&placed.id);
                    changed.push(source.clone());
                }
            }
        }
        changed.push(target.clone());

        info!(
            item = %placed.id,
            source = ?session.source,
            target = %target,
            col = placed.col,
            row = placed.row,
            "Drop committed"
        );

        self.events.emit(GridEvent::PreviewChanged { preview: None });
        self.events.emit(GridEvent::DropCommitted {
            item: placed.clone(),
            source: session.source.clone(),
            target: target.clone(),
        });
        let mut touched = self.sync_nested_payloads(&changed);
        // Mirrors of the grid the moved item hosts follow it to its new place
        let hosted = placed
            .payload
            .nested_grid_id()
            .filter(|grid| self.grids.contains_key(grid.as_str()))
            .cloned();
        if let Some(hosted) = hosted {
            for grid in self.sync_nested_payloads(std::slice::from_ref(&hosted)) {
                if grid != hosted && !touched.contains(&grid) {
                    touched.push(grid);
                }
            }
        }
        self.emit_items_changed(touched);

        // Payload sync may have refreshed the placed item's own mirror
        let item = self
            .grids
            .get(&target)
            .and_then(|model| model.get_item(&placed.id))
            .cloned()
            .unwrap_or(placed);
        DropOutcome::Committed {
            item,
            source: session.source,
            target,
        }
    }

    /// Drop the session without touching any grid.
    pub(crate) fn cancel_session(&mut self, session: DragSession) -> DropOutcome {
        debug!(item = %session.item.id, source = ?session.source, "Drag cancelled");
        if session.current_preview.is_some() {
            self.events.emit(GridEvent::PreviewChanged { preview: None });
        }
        self.events.emit(GridEvent::DragCancelled {
            item: session.item.id.clone(),
        });
        DropOutcome::Cancelled {
            item: session.item.id,
        }
    }
}
