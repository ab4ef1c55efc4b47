//! Nested grid ownership.
//!
//! A grid is nested when an item of another registered grid carries a
//! `Payload::NestedGrid` naming it. That ownership defines depth for
//! containment precedence and decides which payload copies must be refreshed
//! after a commit.

use super::DragCoordinator;
use crate::types::{GridId, ItemConfig, Payload};
use std::collections::{HashSet, VecDeque};
use tracing::trace;

impl DragCoordinator {
    /// Grid whose item hosts `grid`, first in registration order.
    pub fn host_of(&self, grid: &str) -> Option<&GridId> {
        self.order.iter().find(|id| {
            self.grids.get(*id).is_some_and(|model| {
                model
                    .items()
                    .iter()
                    .any(|item| item.payload.nested_grid_id().is_some_and(|g| g == grid))
            })
        })
    }

    /// Number of hosting ancestors above `grid` (0 for a top-level grid).
    pub fn nesting_depth(&self, grid: &str) -> usize {
        let mut seen: HashSet<&str> = HashSet::from([grid]);
        let mut depth = 0;
        let mut current = grid;
        while let Some(host) = self.host_of(current) {
            if !seen.insert(host.as_str()) {
                break;
            }
            depth += 1;
            current = host.as_str();
        }
        depth
    }

    /// Registered grids hosted directly by items of `grid`.
    pub fn child_grids(&self, grid: &str) -> Vec<GridId> {
        self.grids
            .get(grid)
            .map(|model| {
                model
                    .items()
                    .iter()
                    .filter_map(|item| item.payload.nested_grid_id())
                    .filter(|id| self.grids.contains_key(id.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every registered grid below `grid`, breadth first, skipping `excluded`
    /// subtrees.
    pub(crate) fn descendant_grids(&self, grid: &str, excluded: &HashSet<GridId>) -> Vec<GridId> {
        let mut found = Vec::new();
        let mut seen: HashSet<GridId> = HashSet::from([grid.to_string()]);
        let mut queue: VecDeque<GridId> = VecDeque::from([grid.to_string()]);
        while let Some(current) = queue.pop_front() {
            for child in self.child_grids(&current) {
                if excluded.contains(&child) || !seen.insert(child.clone()) {
                    continue;
                }
                found.push(child.clone());
                queue.push_back(child);
            }
        }
        found
    }

    /// Grids hosted by `item`, directly or through the items of the grids it
    /// hosts.
    pub(crate) fn grids_hosted_by(&self, item: &ItemConfig) -> HashSet<GridId> {
        let mut hosted = HashSet::new();
        let Some(root) = item.payload.nested_grid_id() else {
            return hosted;
        };
        hosted.insert(root.clone());
        collect_payload_grids(item.payload.nested_items().unwrap_or_default(), &mut hosted);
        let mut queue: VecDeque<GridId> = VecDeque::from([root.clone()]);
        while let Some(current) = queue.pop_front() {
            for child in self.child_grids(&current) {
                if hosted.insert(child.clone()) {
                    queue.push_back(child);
                }
            }
        }
        hosted
    }

    /// Refresh every `NestedGrid` payload mirroring a changed grid, then
    /// refresh the hosts of those payloads in turn.
    ///
    /// Returns the changed grids followed by every grid whose item list was
    /// rewritten, each once.
    pub(crate) fn sync_nested_payloads(&mut self, changed: &[GridId]) -> Vec<GridId> {
        let mut touched: Vec<GridId> = Vec::new();
        let mut queue: VecDeque<GridId> = VecDeque::new();
        for grid in changed {
            if !touched.contains(grid) {
                touched.push(grid.clone());
                queue.push_back(grid.clone());
            }
        }

        while let Some(source) = queue.pop_front() {
            let Some(items) = self.grids.get(&source).map(|g| g.items().to_vec()) else {
                continue;
            };
            for host in self.order.clone() {
                if host == source {
                    continue;
                }
                let Some(model) = self.grids.get_mut(&host) else {
                    continue;
                };
                if replace_nested_items(model.items_mut(), &source, &items) {
                    trace!(grid = %source, host = %host, "Nested payload synced");
                    if !touched.contains(&host) {
                        touched.push(host.clone());
                        queue.push_back(host);
                    }
                }
            }
        }
        touched
    }
}

fn collect_payload_grids(items: &[ItemConfig], into: &mut HashSet<GridId>) {
    for item in items {
        if let Payload::NestedGrid { grid, items } = &item.payload {
            if into.insert(grid.clone()) {
                collect_payload_grids(items, into);
            }
        }
    }
}

/// Replace the mirrored items of every payload hosting `grid`, recursing
/// into nested payload copies. Returns true if anything changed.
fn replace_nested_items(items: &mut [ItemConfig], grid: &str, replacement: &[ItemConfig]) -> bool {
    let mut changed = false;
    for item in items.iter_mut() {
        if let Payload::NestedGrid { grid: hosted, items: nested } = &mut item.payload {
            if hosted.as_str() == grid {
                if nested.as_slice() != replacement {
                    *nested = replacement.to_vec();
                    changed = true;
                }
            } else if replace_nested_items(nested, grid, replacement) {
                changed = true;
            }
        }
    }
    changed
}
