//! Gizmo overlay derivation: scale points → outline segments and handle widgets.
//!
//! The overlay is plain data in canvas pixels. Hosts draw it with
//! [`crate::paint`] or ship it to a web front end via [`GizmoOverlay::to_json`].

use crate::cursors::{RotateCursor, ScaleCursor, cursors_for};
use gle_core::{Point, Rect, SCALE_POINT_COUNT, ScalePoint};
use serde::{Deserialize, Serialize};

/// Handle pairs joined by the bounding-box outline.
pub const OUTLINE_PAIRS: [(usize, usize); 4] = [(0, 2), (0, 6), (2, 8), (6, 8)];

/// Handle widget geometry in pixels. Area offsets are multiplied by the
/// handle's horizontal/vertical sign (-1, 0, +1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleLayout {
    pub container_size: f64,
    pub rotate_area_size: f64,
    /// Pushes the rotate area outward, past the corner.
    pub rotate_area_offset: f64,
    pub scale_area_size: f64,
    /// Pulls the scale area inward, over the control.
    pub scale_area_offset: f64,
    pub dot_size: f64,
}

impl Default for HandleLayout {
    fn default() -> Self {
        Self {
            container_size: 30.0,
            rotate_area_size: 20.0,
            rotate_area_offset: 7.0,
            scale_area_size: 20.0,
            scale_area_offset: 5.0,
            dot_size: 10.0,
        }
    }
}

/// One edge of the bounding box: a segment of `length` centered on
/// `center`, rotated by `angle` radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineSegment {
    pub center: Point,
    pub length: f64,
    pub angle: f64,
}

impl OutlineSegment {
    pub fn between(start: Point, end: Point) -> Self {
        let delta = end - start;
        Self {
            center: start + delta / 2.0,
            length: delta.hypot(),
            angle: delta.y.atan2(delta.x),
        }
    }

    pub fn endpoints(&self) -> (Point, Point) {
        let half = kurbo::Vec2::from_angle(self.angle) * (self.length / 2.0);
        (self.center - half, self.center + half)
    }
}

/// A handle as drawn and hit-tested: a square container centered on
/// `position`, rotated by `rotation` degrees. Area rectangles are relative
/// to the container's top-left corner, in the container's rotated frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleWidget {
    pub index: usize,
    pub position: Point,
    pub rotation: f64,
    pub is_pivot: bool,
    pub container_size: f64,
    pub scale_cursor: ScaleCursor,
    pub rotate_cursor: RotateCursor,
    pub rotate_area: Rect,
    pub scale_area: Rect,
    pub dot: Rect,
    /// Off for the pivot and while a drag or rotation is in progress.
    pub pointer_events: bool,
}

impl HandleWidget {
    /// Map a canvas point into the container's frame (origin at its top-left).
    pub fn to_container_space(&self, canvas: Point) -> Point {
        let half = self.container_size / 2.0;
        let offset = canvas - self.position;
        let local = kurbo::Affine::rotate(-self.rotation.to_radians()) * offset.to_point();
        Point::new(local.x + half, local.y + half)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GizmoOverlay {
    pub outline: [OutlineSegment; 4],
    pub handles: Vec<HandleWidget>,
    /// Axis-aligned canvas bounds of all handles.
    pub canvas_bounds: Rect,
}

impl GizmoOverlay {
    /// Derive the overlay from the current scale points. `interacting` is
    /// true while a drag or rotation is in progress.
    pub fn derive(
        points: &[ScalePoint; SCALE_POINT_COUNT],
        canvas_bounds: Rect,
        interacting: bool,
        layout: &HandleLayout,
    ) -> Self {
        let outline = OUTLINE_PAIRS
            .map(|(a, b)| OutlineSegment::between(points[a].position, points[b].position));

        let handles = points
            .iter()
            .enumerate()
            .map(|(index, point)| handle_widget(index, point, interacting, layout))
            .collect();

        log::trace!("gizmo overlay derived, bounds {canvas_bounds:?}");
        Self {
            outline,
            handles,
            canvas_bounds,
        }
    }

    pub fn pivot(&self) -> Option<&HandleWidget> {
        self.handles.iter().find(|h| h.is_pivot)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("overlay serialization failed: {e}"))
    }
}

fn centered_square(container: f64, size: f64, dx: f64, dy: f64) -> Rect {
    let inset = (container - size) / 2.0;
    Rect::from_xywh(inset + dx, inset + dy, size, size)
}

fn handle_widget(
    index: usize,
    point: &ScalePoint,
    interacting: bool,
    layout: &HandleLayout,
) -> HandleWidget {
    let (scale_cursor, rotate_cursor) = cursors_for(index, point.rotation);
    let h = point.horizontal.sign();
    let v = point.vertical.sign();

    HandleWidget {
        index,
        position: point.position,
        rotation: point.rotation,
        is_pivot: point.is_pivot,
        container_size: layout.container_size,
        scale_cursor,
        rotate_cursor,
        rotate_area: centered_square(
            layout.container_size,
            layout.rotate_area_size,
            layout.rotate_area_offset * h,
            layout.rotate_area_offset * v,
        ),
        scale_area: centered_square(
            layout.container_size,
            layout.scale_area_size,
            -layout.scale_area_offset * h,
            -layout.scale_area_offset * v,
        ),
        dot: centered_square(layout.container_size, layout.dot_size, 0.0, 0.0),
        pointer_events: !interacting && !point.is_pivot,
    }
}
