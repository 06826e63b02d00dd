//! Hover cursors for gizmo handles.
//!
//! Each handle picks one of eight 45° steps from its resting angle plus the
//! control's rotation; the step selects both the resize and the rotate cursor.

use gle_core::{DEFAULT_ROTATIONS, SCALE_POINT_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleCursor {
    Vertical,
    DiagonalRight,
    Horizontal,
    DiagonalLeft,
}

impl ScaleCursor {
    /// Palette indexed by 45° step, starting at 12 o'clock.
    pub const PALETTE: [ScaleCursor; 8] = [
        ScaleCursor::Vertical,
        ScaleCursor::DiagonalRight,
        ScaleCursor::Horizontal,
        ScaleCursor::DiagonalLeft,
        ScaleCursor::Vertical,
        ScaleCursor::DiagonalRight,
        ScaleCursor::Horizontal,
        ScaleCursor::DiagonalLeft,
    ];

    /// CSS cursor value, with the system resize cursor as fallback.
    pub fn css(self) -> &'static str {
        match self {
            ScaleCursor::Vertical => r#"url("cursor_scaleVertical.svg") 12 12, ns-resize"#,
            ScaleCursor::DiagonalRight => {
                r#"url("cursor_scaleDiagonalRight.svg") 12 12, nesw-resize"#
            }
            ScaleCursor::Horizontal => r#"url("cursor_scaleHorizontal.svg") 12 12, ew-resize"#,
            ScaleCursor::DiagonalLeft => {
                r#"url("cursor_scaleDiagonalLeft.svg") 12 12, nwse-resize"#
            }
        }
    }
}

/// One of eight rotate cursors, each drawn 45° further clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotateCursor(pub u8);

impl RotateCursor {
    pub fn css(self) -> String {
        format!(r#"url("cursor_rotate{}.svg") 12 12, pointer"#, self.0)
    }
}

/// 45° step for a handle resting at `default_rotation` on a control rotated
/// by `rotation` degrees. Always in `0..8`.
pub fn cursor_index(default_rotation: f64, rotation: f64) -> usize {
    let angle = (default_rotation + rotation).rem_euclid(360.0);
    ((angle / 45.0).round() as usize) % 8
}

/// Scale and rotate cursors for handle `index`.
pub fn cursors_for(index: usize, rotation: f64) -> (ScaleCursor, RotateCursor) {
    let default_rotation = if index < SCALE_POINT_COUNT {
        DEFAULT_ROTATIONS[index]
    } else {
        log::warn!("cursors_for: handle index {index} out of range");
        0.0
    };
    let step = cursor_index(default_rotation, rotation);
    (ScaleCursor::PALETTE[step], RotateCursor(step as u8))
}
