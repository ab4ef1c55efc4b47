//! Scripted pointer sessions.
//!
//! A `ReplayScript` describes grids, their page bounds and items, and a
//! sequence of pointer events. Running it drives a fresh `DragCoordinator`
//! exactly as a UI layer would and reports the final layout together with
//! every event emitted along the way.
//!
//! ```json
//! {
//!   "grids": [{ "config": { "id": "main", "column_count": 4, "row_count": 4 },
//!               "bounds": { "origin": { "x": 0, "y": 0 }, "size": { "width": 1040, "height": 1040 } },
//!               "items": [{ "id": "a" }] }],
//!   "events": [{ "type": "down", "grid": "main", "x": 50, "y": 50 },
//!              { "type": "move", "x": 600, "y": 50, "grid": "main" },
//!              { "type": "up" }]
//! }
//! ```

use crate::drag::DragCoordinator;
use crate::error::GridResult;
use crate::events::GridEvent;
use crate::geometry::{PixelRect, Point};
use crate::grid::GridModel;
use crate::settings::EngineSettings;
use crate::types::{GridConfig, GridId, ItemConfig, ItemId, LayoutSnapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One grid to register before replaying events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayGrid {
    pub config: GridConfig,
    pub bounds: PixelRect,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// A recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Pointer pressed inside `grid`
    Down { grid: GridId, x: f32, y: f32 },
    /// Pointer moved. `grid` is the hovered grid as the UI would report it;
    /// with `hit_test` set, the coordinator resolves it from grid bounds.
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        grid: Option<GridId>,
        #[serde(default)]
        hit_test: bool,
    },
    /// Pointer released
    Up,
    /// Drag of a new item from outside every grid
    External { item: ItemConfig, x: f32, y: f32 },
    /// Remove an item from whichever grid holds it
    Remove { item: ItemId },
    /// Raise an item to the top of its grid
    BringToFront { item: ItemId },
}

/// A full scripted session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub settings: EngineSettings,
    #[serde(default)]
    pub grids: Vec<ReplayGrid>,
    #[serde(default)]
    pub events: Vec<PointerEvent>,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub layout: LayoutSnapshot,
    pub events: Vec<GridEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> GridResult<Self> {
        let contents = fs::read_to_string(path)?;
        let script = Self::from_json(&contents)?;
        debug!(path = %path.display(), events = script.events.len(), "Replay script loaded");
        Ok(script)
    }

    /// Build the coordinator, replay every event and report the outcome.
    ///
    /// Structural errors (duplicate ids, a second drag while one is active)
    /// abort the replay.
    pub fn run(&self) -> GridResult<ReplayReport> {
        let mut coordinator = DragCoordinator::new(self.settings.clone());
        let events = coordinator.subscribe();

        for grid in &self.grids {
            let model = GridModel::with_items(grid.config.clone(), grid.items.clone())?;
            coordinator.register_grid(model, grid.bounds)?;
        }
        for event in &self.events {
            apply_event(&mut coordinator, event)?;
        }

        let report = ReplayReport {
            layout: coordinator.snapshot(),
            events: events.try_iter().collect(),
        };
        info!(
            grids = report.layout.grids.len(),
            events = report.events.len(),
            "Replay finished"
        );
        Ok(report)
    }
}

fn apply_event(coordinator: &mut DragCoordinator, event: &PointerEvent) -> GridResult<()> {
    match event {
        PointerEvent::Down { grid, x, y } => {
            coordinator.pointer_down(grid, Point::new(*x, *y))?;
        }
        PointerEvent::Move { x, y, grid, hit_test } => {
            let pointer = Point::new(*x, *y);
            if coordinator.is_resizing() {
                coordinator.update_resize(pointer);
            } else {
                let target = if *hit_test {
                    coordinator.hit_test(pointer)
                } else {
                    grid.clone()
                };
                coordinator.on_pointer_move(pointer, target.as_deref());
            }
        }
        PointerEvent::Up => {
            if coordinator.is_resizing() {
                coordinator.end_resize();
            } else {
                coordinator.on_pointer_up();
            }
        }
        PointerEvent::External { item, x, y } => {
            coordinator.begin_external_drag(item.clone(), Point::new(*x, *y))?;
        }
        PointerEvent::Remove { item } => {
            coordinator.remove_item_anywhere(item);
        }
        PointerEvent::BringToFront { item } => {
            coordinator.bring_to_front(item);
        }
    }
    Ok(())
}
