//! Hit testing: canvas point → gizmo handle lookup.
//!
//! Reverse-walks the handles (last drawn = topmost) and tests each rotated
//! container's dot, scale area and rotate area in that order.

use crate::overlay::{GizmoOverlay, HandleWidget};
use gle_core::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which part of a handle was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleArea {
    /// The visible dot or the invisible scale area: starts a resize drag.
    Scale,
    /// The invisible area outside the corner: starts a rotation.
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleHit {
    pub index: usize,
    pub area: HandleArea,
}

fn contains(rect: &Rect, p: Point) -> bool {
    p.x >= rect.left && p.x <= rect.right && p.y >= rect.top && p.y <= rect.bottom
}

/// Test a single handle. Handles with pointer events off never hit.
pub fn hit_test_handle(handle: &HandleWidget, canvas: Point) -> Option<HandleArea> {
    if !handle.pointer_events {
        return None;
    }
    let p = handle.to_container_space(canvas);
    if contains(&handle.dot, p) || contains(&handle.scale_area, p) {
        return Some(HandleArea::Scale);
    }
    if contains(&handle.rotate_area, p) {
        return Some(HandleArea::Rotate);
    }
    None
}

/// Find the topmost handle area at `canvas`.
/// Returns `None` if the point misses every handle.
pub fn hit_test(overlay: &GizmoOverlay, canvas: Point) -> Option<HandleHit> {
    overlay.handles.iter().rev().find_map(|handle| {
        hit_test_handle(handle, canvas).map(|area| HandleHit {
            index: handle.index,
            area,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::HandleLayout;
    use gle_core::{SCALE_POINT_COUNT, ScalePoint, scale_point_grid};

    fn overlay_for(size: f64, rotation: f64, interacting: bool) -> GizmoOverlay {
        let mut points: [ScalePoint; SCALE_POINT_COUNT] = scale_point_grid();
        for p in points.iter_mut() {
            p.position = Point::new(
                100.0 + size / 2.0 * p.horizontal.sign(),
                100.0 + size / 2.0 * p.vertical.sign(),
            );
            p.rotation = rotation;
        }
        GizmoOverlay::derive(
            &points,
            Rect::from_xywh(100.0 - size / 2.0, 100.0 - size / 2.0, size, size),
            interacting,
            &HandleLayout::default(),
        )
    }

    #[test]
    fn dot_hits_scale() {
        let overlay = overlay_for(200.0, 0.0, false);
        // Top-left handle sits at (0, 0).
        assert_eq!(
            hit_test(&overlay, Point::new(0.0, 0.0)),
            Some(HandleHit {
                index: 0,
                area: HandleArea::Scale
            })
        );
    }

    #[test]
    fn outside_corner_hits_rotate() {
        let overlay = overlay_for(200.0, 0.0, false);
        // Rotate area of the top-left handle spans container (-2..18), i.e.
        // canvas (-17..3); the scale area starts at container 10 (canvas -5).
        assert_eq!(
            hit_test(&overlay, Point::new(-12.0, -12.0)),
            Some(HandleHit {
                index: 0,
                area: HandleArea::Rotate
            })
        );
    }

    #[test]
    fn rotated_handle_uses_container_frame() {
        let overlay = overlay_for(200.0, 180.0, false);
        // Half a turn swaps which side of the corner each area covers.
        assert_eq!(
            hit_test(&overlay, Point::new(12.0, 12.0)).map(|h| h.area),
            Some(HandleArea::Rotate)
        );
        assert_eq!(
            hit_test(&overlay, Point::new(-12.0, -12.0)).map(|h| h.area),
            Some(HandleArea::Scale)
        );
    }

    #[test]
    fn pivot_and_active_gestures_never_hit() {
        let overlay = overlay_for(200.0, 0.0, false);
        assert_eq!(hit_test(&overlay, Point::new(100.0, 100.0)), None);
        let busy = overlay_for(200.0, 0.0, true);
        assert_eq!(hit_test(&busy, Point::new(0.0, 0.0)), None);
    }
}
