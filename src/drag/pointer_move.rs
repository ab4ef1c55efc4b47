//! Pointer move - containment resolution and live drop previews.
//!
//! ## Performance Notes
//!
//! Every move is O(items in the hovered grid) for collision checks. A move
//! repeating the previous pointer position and candidate grid returns the
//! cached preview without touching any grid, unless a grid, its bounds or
//! the validation conditions changed in between.

use super::DragCoordinator;
use super::state::DragSession;
use crate::events::GridEvent;
use crate::geometry::{Point, page_to_grid};
use crate::grid::GridModel;
use crate::perf::measure;
use crate::profile_scope;
use crate::types::{GridId, PreviewState};
use std::collections::HashSet;
use tracing::{trace, warn};

impl DragCoordinator {
    /// Track the pointer during a drag.
    ///
    /// `candidate` is the grid the UI layer reports under the pointer
    /// (`None` = outside every grid). Nested grids below the candidate that
    /// contain the pointer take precedence, deepest first. No-op when no drag
    /// is active.
    pub fn on_pointer_move(&mut self, pointer: Point, candidate: Option<&str>) -> Option<&PreviewState> {
        profile_scope!("on_pointer_move");

        let session = self.state.session()?;
        let key = (pointer, candidate.map(str::to_string), self.revision());
        if session.last_move.as_ref() == Some(&key) {
            return self.state.preview();
        }

        let ((target, preview), elapsed_ms) = measure(|| {
            let target = candidate.and_then(|c| self.effective_grid(c, pointer, &session.hosted_grids));
            let preview = target
                .as_ref()
                .and_then(|id| self.grids.get(id))
                .map(|grid| self.compute_preview(grid, session, pointer));
            (target, preview)
        });
        let items_checked = target
            .as_ref()
            .and_then(|id| self.grids.get(id))
            .map_or(0, GridModel::len);
        self.move_stats.record(elapsed_ms, items_checked);

        let session = self.state.session_mut()?;
        let changed = session.current_preview != preview;
        session.current_grid = target;
        session.current_preview = preview.clone();
        session.last_move = Some(key);

        if changed {
            trace!(
                grid = ?preview.as_ref().map(|p| &p.grid),
                col = preview.as_ref().map(|p| p.col),
                row = preview.as_ref().map(|p| p.row),
                valid = preview.as_ref().map(|p| p.valid),
                "Preview changed"
            );
            self.events.emit(GridEvent::PreviewChanged { preview });
        }
        self.state.preview()
    }

    /// The grid a drag over `candidate` really targets: the deepest grid in
    /// the candidate's nested subtree containing the pointer, else the
    /// candidate itself. A candidate hosted by the dragged item gives way to
    /// its nearest non-hosted ancestor.
    pub(crate) fn effective_grid(
        &self,
        candidate: &str,
        pointer: Point,
        excluded: &HashSet<GridId>,
    ) -> Option<GridId> {
        if !self.grids.contains_key(candidate) {
            warn!(grid = candidate, "Pointer over unregistered grid, treated as outside");
            return None;
        }

        let mut base = candidate.to_string();
        let mut climbed = 0;
        while excluded.contains(&base) {
            base = self.host_of(&base)?.clone();
            climbed += 1;
            if climbed > self.order.len() {
                return None;
            }
        }

        let deepest = self
            .descendant_grids(&base, excluded)
            .into_iter()
            .filter(|id| self.bounds.bounds(id).is_some_and(|b| b.contains(pointer)))
            .max_by_key(|id| self.nesting_depth(id));
        Some(deepest.unwrap_or(base))
    }

    /// Preview for the dragged item over `grid`. Never mutates anything.
    fn compute_preview(&self, grid: &GridModel, session: &DragSession, pointer: Point) -> PreviewState {
        let config = grid.config();
        let local = page_to_grid(pointer, self.grid_origin(grid.id()), session.pointer_offset);
        let span = session.item.span();
        let cell = grid.resolve_drop_cell(local.x, local.y, span);
        let candidate = session.item.moved_to(cell);

        // An item id may only live in one grid at a time
        let foreign_duplicate =
            session.source.as_deref() != Some(grid.id().as_str()) && grid.contains(&session.item.id);
        if foreign_duplicate {
            return PreviewState::new(grid.id().clone(), cell, span, false);
        }

        if grid.is_legal_placement(&candidate, &self.validation) {
            return PreviewState::new(grid.id().clone(), cell, span, true);
        }
        if !config.prefer_existing_position {
            let radius = self.settings.snap_search_radius;
            if let Some(snapped) = grid.nearest_legal_cell(&candidate, &self.validation, radius) {
                return PreviewState::new(grid.id().clone(), snapped, span, true);
            }
        }
        PreviewState::new(grid.id().clone(), cell, span, false)
    }
}
