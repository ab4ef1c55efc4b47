//! Engine settings loaded from JSON.
//!
//! Every field has a default, so a partial (or empty) settings file is valid.
//! Grids built through [`GridConfig::from_settings`] inherit the defaults
//! recorded here.

use crate::constants::{
    DEFAULT_BORDER_SIZE, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_LOG_FILTER,
    DEFAULT_MIN_CELL_HEIGHT, DEFAULT_MIN_CELL_WIDTH, DEFAULT_SNAP_SEARCH_RADIUS,
};
use crate::error::GridResult;
use crate::types::{GridConfig, GridId, Margins};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Defaults applied to newly configured grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDefaults {
    pub cell_width: f32,
    pub cell_height: f32,
    pub margins: Margins,
    pub min_cell_width: f32,
    pub min_cell_height: f32,
    pub draggable_by_default: bool,
    pub resizable_by_default: bool,
    pub prefer_existing_position: bool,
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            margins: Margins::default(),
            min_cell_width: DEFAULT_MIN_CELL_WIDTH,
            min_cell_height: DEFAULT_MIN_CELL_HEIGHT,
            draggable_by_default: true,
            resizable_by_default: true,
            prefer_existing_position: true,
        }
    }
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub grid: GridDefaults,
    /// Width of the edge band that grabs a resize handle, in pixels
    pub border_size: f32,
    /// Rings searched for a legal cell when a grid snaps on conflict
    pub snap_search_radius: u32,
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    pub log_filter: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            grid: GridDefaults::default(),
            border_size: DEFAULT_BORDER_SIZE,
            snap_search_radius: DEFAULT_SNAP_SEARCH_RADIUS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineSettings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> GridResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> GridResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        debug!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults if it is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> GridResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Platform config location: `<config_dir>/gridboard/settings.json`.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridboard").join("settings.json"))
}

impl GridConfig {
    /// Build a grid config from the settings' grid defaults.
    pub fn from_settings(
        id: impl Into<GridId>,
        column_count: u32,
        row_count: u32,
        settings: &EngineSettings,
    ) -> Self {
        let defaults = &settings.grid;
        Self {
            id: id.into(),
            column_count,
            row_count,
            cell_width: defaults.cell_width,
            cell_height: defaults.cell_height,
            margins: defaults.margins,
            min_cell_width: defaults.min_cell_width,
            min_cell_height: defaults.min_cell_height,
            draggable_by_default: defaults.draggable_by_default,
            resizable_by_default: defaults.resizable_by_default,
            prefer_existing_position: defaults.prefer_existing_position,
        }
    }
}
