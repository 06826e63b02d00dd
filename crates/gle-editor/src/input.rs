//! Input abstraction layer.
//!
//! Normalizes host pointer and focus events into a unified `InputEvent`
//! enum consumed by the [`crate::editor::Editor`].

use crate::events::PointerInput;

/// A normalized input event in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed. `buttons` is the pressed-button bitmask after the press.
    PointerDown { x: f64, y: f64, buttons: u32 },

    PointerMove { x: f64, y: f64, buttons: u32 },

    /// Pointer released. `buttons` still has bits for any other held button.
    PointerUp { x: f64, y: f64, buttons: u32 },

    /// The canvas lost focus (window blur, pointer capture lost).
    FocusLost,
}

impl InputEvent {
    /// Create a PointerDown from a web PointerEvent.
    pub fn from_pointer_down(x: f64, y: f64, buttons: u32) -> Self {
        Self::PointerDown { x, y, buttons }
    }

    pub fn from_pointer_move(x: f64, y: f64, buttons: u32) -> Self {
        Self::PointerMove { x, y, buttons }
    }

    pub fn from_pointer_up(x: f64, y: f64, buttons: u32) -> Self {
        Self::PointerUp { x, y, buttons }
    }

    /// Extract the pointer sample if this is a pointer event.
    pub fn pointer(&self) -> Option<PointerInput> {
        match *self {
            Self::PointerDown { x, y, buttons }
            | Self::PointerMove { x, y, buttons }
            | Self::PointerUp { x, y, buttons } => Some(PointerInput::new(x, y, buttons)),
            Self::FocusLost => None,
        }
    }
}
