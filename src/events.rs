//! Commit/cancel notifications for the UI layer.
//!
//! Events are delivered synchronously, in emission order, to every channel
//! subscriber and every registered callback. Channels whose receiver was
//! dropped are pruned on the next emit.

use crate::types::{GridId, ItemConfig, ItemId, PreviewState};
use serde::Serialize;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

/// Something the UI layer may need to react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    /// A drag session started
    DragStarted {
        item: ItemId,
        source: Option<GridId>,
    },
    /// The placeholder moved, changed validity, or was hidden (`None`)
    PreviewChanged { preview: Option<PreviewState> },
    /// A drop was committed
    DropCommitted {
        item: ItemConfig,
        source: Option<GridId>,
        target: GridId,
    },
    /// A drag ended without changing anything
    DragCancelled { item: ItemId },
    /// A resize was committed in place
    ResizeCommitted { grid: GridId, item: ItemConfig },
    /// A resize ended with the item keeping its span
    ResizeReverted { grid: GridId, item: ItemConfig },
    /// Full item list of a grid after a committed change
    ItemsChanged { grid: GridId, items: Vec<ItemConfig> },
}

type Callback = Box<dyn FnMut(&GridEvent)>;

/// Fan-out of grid events to channels and callbacks.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Sender<GridEvent>>,
    callbacks: Vec<Callback>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new single-consumer channel receiving every future event.
    pub fn subscribe(&mut self) -> Receiver<GridEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Register a callback invoked for every future event.
    pub fn on_event<F>(&mut self, callback: F)
    where
        F: FnMut(&GridEvent) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    pub fn emit(&mut self, event: GridEvent) {
        for callback in &mut self.callbacks {
            callback(&event);
        }
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
