//! Bounded linear undo/redo history.

use crate::shapes::{Shape, ShapeId, Stroke, StrokeId};
use serde::{Deserialize, Serialize};

// Use web-time on WASM, std::time otherwise
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A copy of the editable state taken after a committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub strokes: Vec<Stroke>,
    pub shapes: Vec<Shape>,
    pub selected_shape_ids: Vec<ShapeId>,
    pub selected_stroke_ids: Vec<StrokeId>,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl Snapshot {
    pub fn new(
        strokes: Vec<Stroke>,
        shapes: Vec<Shape>,
        selected_shape_ids: Vec<ShapeId>,
        selected_stroke_ids: Vec<StrokeId>,
    ) -> Self {
        Self {
            strokes,
            shapes,
            selected_shape_ids,
            selected_stroke_ids,
            timestamp_ms: now_ms(),
        }
    }

    /// Equality ignoring the timestamp.
    #[cfg(test)]
    pub(crate) fn same_content(&self, other: &Snapshot) -> bool {
        self.strokes == other.strokes
            && self.shapes == other.shapes
            && self.selected_shape_ids == other.selected_shape_ids
            && self.selected_stroke_ids == other.selected_stroke_ids
    }
}

/// Linear snapshot log with a cursor.
///
/// Recording after the cursor discards the redo tail. Once more than
/// `capacity` entries exist the oldest is evicted.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    /// Index of the current entry, `None` when the log is empty.
    cursor: Option<usize>,
    capacity: usize,
    /// Set by undo/redo, cleared by the next mutation. While set, recording
    /// is suppressed.
    just_navigated: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
            just_navigated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Mark that the editable state changed since the last undo/redo.
    pub fn note_mutation(&mut self) {
        self.just_navigated = false;
    }

    /// Append a snapshot after the cursor. Returns false if suppressed
    /// because nothing changed since the last undo/redo.
    pub fn record(&mut self, snapshot: Snapshot) -> bool {
        if self.just_navigated {
            log::debug!("Snapshot suppressed after history navigation");
            return false;
        }

        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);

        // Limit history size
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!("History push ({} entries)", self.entries.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Step back one entry and return it, or `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        let index = self.cursor? - 1;
        self.cursor = Some(index);
        self.just_navigated = true;
        log::debug!("Undo to entry {}", index);
        self.entries.get(index)
    }

    /// Step forward one entry and return it, or `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        let index = self.cursor? + 1;
        self.cursor = Some(index);
        self.just_navigated = true;
        log::debug!("Redo to entry {}", index);
        self.entries.get(index)
    }

    /// Empty the log.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.just_navigated = false;
    }
}
