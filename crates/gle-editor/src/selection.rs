//! Selection capability consumed by the gizmo.

use gle_core::{ControlId, Point};

/// What the gizmo needs to know about the current selection.
pub trait SelectionSource {
    /// The control the gizmo is drawn around.
    fn primary(&self) -> Option<ControlId>;

    /// All selected controls, primary first.
    fn selected(&self) -> &[ControlId];

    /// Last known pointer position in canvas pixels.
    fn pointer(&self) -> Point;
}

/// Ordered multi-selection owned by the editor.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    controls: Vec<ControlId>,
    pointer: Point,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single control.
    pub fn select(&mut self, id: ControlId) {
        self.controls.clear();
        self.controls.push(id);
    }

    /// Append to the selection if not already present.
    pub fn add(&mut self, id: ControlId) {
        if !self.controls.contains(&id) {
            self.controls.push(id);
        }
    }

    /// Shift+click behavior: add if absent, remove if present.
    pub fn toggle(&mut self, id: ControlId) {
        if let Some(pos) = self.controls.iter().position(|c| *c == id) {
            self.controls.remove(pos);
        } else {
            self.controls.push(id);
        }
    }

    pub fn remove(&mut self, id: ControlId) {
        self.controls.retain(|c| *c != id);
    }

    pub fn clear(&mut self) {
        self.controls.clear();
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }
}

impl SelectionSource for Selection {
    fn primary(&self) -> Option<ControlId> {
        self.controls.first().copied()
    }

    fn selected(&self) -> &[ControlId] {
        &self.controls
    }

    fn pointer(&self) -> Point {
        self.pointer
    }
}
