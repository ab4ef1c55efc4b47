//! Pluggable placement rules.
//!
//! The service keeps two independent ordered lists of conditions: one for
//! moves and one for resizes. A candidate passes when every condition in the
//! relevant list returns `true`; an empty list always passes.
//!
//! Conditions run on every pointer move during a drag, so they must be cheap
//! and must not mutate anything.

use crate::types::{GridConfig, ItemConfig};
use std::fmt;

/// A placement rule: `(col, row, item, target_grid) -> allowed`.
pub type Condition = Box<dyn Fn(u32, u32, &ItemConfig, &GridConfig) -> bool>;

/// Ordered chains of position and resize conditions.
#[derive(Default)]
pub struct ValidationService {
    position_conditions: Vec<Condition>,
    resize_conditions: Vec<Condition>,
}

impl fmt::Debug for ValidationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationService")
            .field("position_conditions", &self.position_conditions.len())
            .field("resize_conditions", &self.resize_conditions.len())
            .finish()
    }
}

impl ValidationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule checked for every move/drop candidate.
    pub fn add_position_condition<F>(&mut self, condition: F)
    where
        F: Fn(u32, u32, &ItemConfig, &GridConfig) -> bool + 'static,
    {
        self.position_conditions.push(Box::new(condition));
    }

    /// Append a rule checked for every resize candidate.
    pub fn add_resize_condition<F>(&mut self, condition: F)
    where
        F: Fn(u32, u32, &ItemConfig, &GridConfig) -> bool + 'static,
    {
        self.resize_conditions.push(Box::new(condition));
    }

    pub fn clear_position_conditions(&mut self) {
        self.position_conditions.clear();
    }

    pub fn clear_resize_conditions(&mut self) {
        self.resize_conditions.clear();
    }

    pub fn position_condition_count(&self) -> usize {
        self.position_conditions.len()
    }

    pub fn resize_condition_count(&self) -> usize {
        self.resize_conditions.len()
    }

    /// Run the position chain.
    pub fn validate_position(
        &self,
        col: u32,
        row: u32,
        item: &ItemConfig,
        target: &GridConfig,
    ) -> bool {
        Self::validate_conditions(&self.position_conditions, col, row, item, target)
    }

    /// Run the resize chain.
    pub fn validate_resize(
        &self,
        col: u32,
        row: u32,
        item: &ItemConfig,
        target: &GridConfig,
    ) -> bool {
        Self::validate_conditions(&self.resize_conditions, col, row, item, target)
    }

    fn validate_conditions(
        conditions: &[Condition],
        col: u32,
        row: u32,
        item: &ItemConfig,
        target: &GridConfig,
    ) -> bool {
        conditions
            .iter()
            .all(|condition| condition(col, row, item, target))
    }
}
