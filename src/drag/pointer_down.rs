//! Pointer down - hit testing and drag/resize initiation.
//!
//! ## Performance Notes
//!
//! Grid containment goes through the R-tree over grid bounds; the item hit
//! test inside the chosen grid is a reverse linear scan (topmost first).

use super::state::{DragSession, InteractionState};
use super::DragCoordinator;
use crate::error::{GridError, GridResult};
use crate::events::GridEvent;
use crate::geometry::{Point, cell_to_pixel, item_pixel_rect};
use crate::profile_scope;
use crate::resize::{ResizeHandle, detect_handle};
use crate::types::{GridId, ItemConfig, ItemId};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// What a pointer-down on a grid started.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PointerDownOutcome {
    /// A drag of the topmost item under the pointer
    Drag { item: ItemId },
    /// A resize of the topmost item, grabbed by its border band
    Resize { item: ItemId, handle: ResizeHandle },
    /// Nothing under the pointer, or the item is locked
    Miss,
}

impl DragCoordinator {
    /// Deepest registered grid whose page bounds contain the pointer.
    ///
    /// During a drag, grids hosted by the dragged item are skipped. Ties at
    /// equal depth go to the grid registered last.
    pub fn hit_test(&self, pointer: Point) -> Option<GridId> {
        profile_scope!("hit_test");

        let excluded = self.excluded_grids();
        self.bounds
            .query_point(pointer)
            .into_iter()
            .filter(|id| self.grids.contains_key(id) && !excluded.contains(id))
            .max_by_key(|id| {
                let registered_at = self.order.iter().position(|g| g == id).unwrap_or(0);
                (self.nesting_depth(id), registered_at)
            })
    }

    pub(crate) fn excluded_grids(&self) -> HashSet<GridId> {
        self.state
            .session()
            .map(|s| s.hosted_grids.clone())
            .unwrap_or_default()
    }

    /// Route a pointer-down inside `grid`: the border band of a resizable
    /// item starts a resize, the body of a draggable item starts a drag.
    pub fn pointer_down(&mut self, grid: &str, pointer: Point) -> GridResult<PointerDownOutcome> {
        profile_scope!("pointer_down");

        if !self.state.is_idle() {
            return Err(GridError::AlreadyDragging);
        }
        let model = self
            .grids
            .get(grid)
            .ok_or_else(|| GridError::GridNotRegistered(grid.to_string()))?;

        let local = pointer.delta_from(self.grid_origin(grid));
        let Some(item) = model.item_at_pixel(local) else {
            return Ok(PointerDownOutcome::Miss);
        };
        let item_id = item.id.clone();
        let config = model.config();

        if item.is_resizable_in(config) {
            let rect = item_pixel_rect(item, config);
            if let Some(handle) = detect_handle(local, &rect, self.settings.border_size) {
                self.begin_resize(grid, &item_id, handle, pointer)?;
                return Ok(PointerDownOutcome::Resize { item: item_id, handle });
            }
        }
        if item.is_draggable_in(config) {
            self.begin_drag(grid, &item_id, pointer)?;
            return Ok(PointerDownOutcome::Drag { item: item_id });
        }
        debug!(grid, item = %item_id, "Pointer down on locked item");
        Ok(PointerDownOutcome::Miss)
    }

    /// Start dragging `item_id` out of `grid`. The item stays in its grid
    /// until the drop commits.
    pub fn begin_drag(&mut self, grid: &str, item_id: &str, pointer: Point) -> GridResult<()> {
        if !self.state.is_idle() {
            return Err(GridError::AlreadyDragging);
        }
        let model = self
            .grids
            .get(grid)
            .ok_or_else(|| GridError::GridNotRegistered(grid.to_string()))?;
        let item = model.get_item(item_id).ok_or_else(|| GridError::ItemNotFound {
            grid: grid.to_string(),
            id: item_id.to_string(),
        })?;
        if !item.is_draggable_in(model.config()) {
            return Err(GridError::NotDraggable(item.id.clone()));
        }

        let origin = self.grid_origin(grid);
        let local = cell_to_pixel(item.col, item.row, model.config());
        let top_left = origin.offset_by(local.x, local.y);
        let offset = pointer.delta_from(top_left);

        let session = DragSession::new(
            item.clone(),
            Some(grid.to_string()),
            offset,
            self.grids_hosted_by(item),
        );
        self.start_session(session);
        Ok(())
    }

    /// Start dragging an item that is not in any grid yet (e.g. from a
    /// palette). The pointer holds the item's top-left corner. A cancelled
    /// external drag discards the item.
    pub fn begin_external_drag(&mut self, item: ItemConfig, pointer: Point) -> GridResult<()> {
        if !self.state.is_idle() {
            return Err(GridError::AlreadyDragging);
        }
        let hosted = self.grids_hosted_by(&item);
        debug!(item = %item.id, x = pointer.x, y = pointer.y, "External drag");
        self.start_session(DragSession::new(item, None, Point::default(), hosted));
        Ok(())
    }

    fn start_session(&mut self, session: DragSession) {
        debug!(
            item = %session.item.id,
            source = ?session.source,
            offset_x = session.pointer_offset.x,
            offset_y = session.pointer_offset.y,
            "Drag started"
        );
        self.events.emit(GridEvent::DragStarted {
            item: session.item.id.clone(),
            source: session.source.clone(),
        });
        self.state = InteractionState::Dragging(session);
    }
}
