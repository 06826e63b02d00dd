//! The nine gizmo handles around a control: eight resize points and the pivot.

use crate::rect::Rect;
use kurbo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalPosition {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalPosition {
    Top,
    Center,
    Bottom,
}

impl HorizontalPosition {
    pub const ALL: [HorizontalPosition; 3] = [
        HorizontalPosition::Left,
        HorizontalPosition::Center,
        HorizontalPosition::Right,
    ];

    /// -1, 0, +1 from left to right.
    pub fn sign(self) -> f64 {
        match self {
            HorizontalPosition::Left => -1.0,
            HorizontalPosition::Center => 0.0,
            HorizontalPosition::Right => 1.0,
        }
    }
}

impl VerticalPosition {
    pub const ALL: [VerticalPosition; 3] = [
        VerticalPosition::Top,
        VerticalPosition::Center,
        VerticalPosition::Bottom,
    ];

    /// -1, 0, +1 from top to bottom.
    pub fn sign(self) -> f64 {
        match self {
            VerticalPosition::Top => -1.0,
            VerticalPosition::Center => 0.0,
            VerticalPosition::Bottom => 1.0,
        }
    }
}

/// Index of the pivot in the 3×3 grid.
pub const PIVOT_INDEX: usize = 4;

/// Number of handles.
pub const SCALE_POINT_COUNT: usize = 9;

/// Resting cursor angle per handle, in degrees, before the control's rotation.
pub const DEFAULT_ROTATIONS: [f64; SCALE_POINT_COUNT] =
    [315.0, 0.0, 45.0, 270.0, 0.0, 90.0, 225.0, 180.0, 135.0];

/// A gizmo handle. `position` is in canvas pixels; `rotation` is the
/// primary control's accumulated rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePoint {
    pub position: Point,
    pub horizontal: HorizontalPosition,
    pub vertical: VerticalPosition,
    pub rotation: f64,
    pub is_pivot: bool,
}

impl ScalePoint {
    /// Anchor in a control's local space: a corner, an edge midpoint, or
    /// `pivot` for the pivot handle.
    pub fn local_anchor(&self, bounds: &Rect, pivot: Point) -> Point {
        if self.is_pivot {
            return pivot;
        }
        let center = bounds.center();
        let x = match self.horizontal {
            HorizontalPosition::Left => bounds.left,
            HorizontalPosition::Center => center.x,
            HorizontalPosition::Right => bounds.right,
        };
        let y = match self.vertical {
            VerticalPosition::Top => bounds.top,
            VerticalPosition::Center => center.y,
            VerticalPosition::Bottom => bounds.bottom,
        };
        Point::new(x, y)
    }
}

/// The fixed 3×3 grid, row-major from the top-left. Index 4 is the pivot.
pub fn scale_point_grid() -> [ScalePoint; SCALE_POINT_COUNT] {
    let mut points = [ScalePoint {
        position: Point::ZERO,
        horizontal: HorizontalPosition::Center,
        vertical: VerticalPosition::Center,
        rotation: 0.0,
        is_pivot: false,
    }; SCALE_POINT_COUNT];

    for (row, vertical) in VerticalPosition::ALL.into_iter().enumerate() {
        for (col, horizontal) in HorizontalPosition::ALL.into_iter().enumerate() {
            let index = row * 3 + col;
            points[index] = ScalePoint {
                position: Point::ZERO,
                horizontal,
                vertical,
                rotation: 0.0,
                is_pivot: index == PIVOT_INDEX,
            };
        }
    }
    points
}
