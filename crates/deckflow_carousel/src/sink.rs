//! Geometry sink
//!
//! The rendering surface the carousel writes to. The carousel never owns the
//! visual nodes; it only pushes per-item geometry through this trait.

use std::cell::RefCell;
use std::rc::Rc;

use deckflow_core::{Geometry, ItemId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use thiserror::Error;

/// One item's geometry for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeometryUpdate {
    pub item: ItemId,
    pub geometry: Geometry,
}

/// Errors reported by a sink
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The rendering handle for this item does not exist (yet)
    #[error("no rendering handle for item {0}")]
    MissingHandle(ItemId),
}

/// Receiver of per-item geometry updates
pub trait GeometrySink {
    /// Apply one update
    ///
    /// Returning [`SinkError::MissingHandle`] is not fatal; the carousel
    /// re-sends the item's latest geometry on later frames.
    fn apply(&mut self, update: &GeometryUpdate) -> Result<(), SinkError>;

    /// Called once after all updates of a frame were applied
    fn end_frame(&mut self) {}
}

impl<S: GeometrySink + ?Sized> GeometrySink for Box<S> {
    fn apply(&mut self, update: &GeometryUpdate) -> Result<(), SinkError> {
        (**self).apply(update)
    }

    fn end_frame(&mut self) {
        (**self).end_frame()
    }
}

impl<S: GeometrySink + ?Sized> GeometrySink for Rc<RefCell<S>> {
    fn apply(&mut self, update: &GeometryUpdate) -> Result<(), SinkError> {
        self.borrow_mut().apply(update)
    }

    fn end_frame(&mut self) {
        self.borrow_mut().end_frame()
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// In-memory sink that keeps the latest geometry per item
///
/// Useful for tests and headless simulation. Optionally restricted to a set
/// of known handles to model nodes that have not been mounted yet.
#[derive(Debug, Default)]
pub struct RecordingSink {
    handles: Option<FxHashSet<ItemId>>,
    current: FxHashMap<ItemId, Geometry>,
    applied: usize,
    frames: usize,
}

impl RecordingSink {
    /// Sink that accepts every item
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that only has handles for the given items
    pub fn with_handles(ids: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            handles: Some(ids.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Mount a handle for an item
    pub fn add_handle(&mut self, id: ItemId) {
        if let Some(handles) = &mut self.handles {
            handles.insert(id);
        }
    }

    /// Unmount an item's handle, forgetting its geometry
    pub fn remove_handle(&mut self, id: ItemId) {
        if self.handles.is_none() {
            self.handles = Some(self.current.keys().copied().collect());
        }
        if let Some(handles) = &mut self.handles {
            handles.remove(&id);
        }
        self.current.remove(&id);
    }

    /// Latest geometry written for an item
    pub fn get(&self, id: ItemId) -> Option<Geometry> {
        self.current.get(&id).copied()
    }

    /// Number of successful updates so far
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Number of completed frames
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl GeometrySink for RecordingSink {
    fn apply(&mut self, update: &GeometryUpdate) -> Result<(), SinkError> {
        if let Some(handles) = &self.handles {
            if !handles.contains(&update.item) {
                return Err(SinkError::MissingHandle(update.item));
            }
        }
        self.current.insert(update.item, update.geometry);
        self.applied += 1;
        Ok(())
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
