//! Resize sessions driven through the coordinator.
//!
//! The coordinator only adds exclusivity with drags, event emission and
//! nested payload sync on top of `ResizeController`.

use super::DragCoordinator;
use super::state::InteractionState;
use crate::error::{GridError, GridResult};
use crate::events::GridEvent;
use crate::geometry::Point;
use crate::profile_scope;
use crate::resize::{ResizeController, ResizeHandle, ResizeOutcome};
use crate::types::PreviewState;
use tracing::trace;

impl DragCoordinator {
    /// Start resizing `item_id` in `grid` from page position `pointer`.
    pub fn begin_resize(
        &mut self,
        grid: &str,
        item_id: &str,
        handle: ResizeHandle,
        pointer: Point,
    ) -> GridResult<()> {
        if !self.state.is_idle() {
            return Err(GridError::AlreadyDragging);
        }
        let model = self
            .grids
            .get(grid)
            .ok_or_else(|| GridError::GridNotRegistered(grid.to_string()))?;
        let controller = ResizeController::begin(model, item_id, handle, pointer)?;
        self.state = InteractionState::Resizing {
            controller,
            preview: None,
        };
        Ok(())
    }

    /// Track the pointer during a resize. No-op when no resize is active.
    pub fn update_resize(&mut self, pointer: Point) -> Option<&PreviewState> {
        profile_scope!("update_resize");

        let InteractionState::Resizing { controller, preview } = &mut self.state else {
            return None;
        };
        let model = self.grids.get(controller.grid_id())?;
        let next = controller.update(model, pointer, &self.validation);
        if preview.as_ref() != Some(&next) {
            trace!(
                grid = %next.grid,
                col_span = next.col_span,
                row_span = next.row_span,
                valid = next.valid,
                "Resize preview changed"
            );
            *preview = Some(next.clone());
            self.events.emit(GridEvent::PreviewChanged { preview: Some(next) });
        }
        self.state.preview()
    }

    /// Finish the resize: commit the proposed span in place, or keep the
    /// original span if it is illegal. Returns `None` when no resize is
    /// active.
    pub fn end_resize(&mut self) -> Option<ResizeOutcome> {
        let (controller, preview) = match self.state.take() {
            InteractionState::Resizing { controller, preview } => (controller, preview),
            other => {
                self.state = other;
                return None;
            }
        };
        let grid = controller.grid_id().clone();
        let model = self.grids.get_mut(&grid)?;
        let outcome = controller.commit(model, &self.validation);

        if preview.is_some() {
            self.events.emit(GridEvent::PreviewChanged { preview: None });
        }
        match &outcome {
            ResizeOutcome::Committed(item) => {
                self.events.emit(GridEvent::ResizeCommitted {
                    grid: grid.clone(),
                    item: item.clone(),
                });
                self.publish_changes(&[grid]);
            }
            ResizeOutcome::Reverted(item) => {
                self.events.emit(GridEvent::ResizeReverted {
                    grid,
                    item: item.clone(),
                });
            }
        }
        Some(outcome)
    }
}
