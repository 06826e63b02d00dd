//! Gizmo overlay → Vello drawing commands.
//!
//! Draws the bounding-box outline, one square dot per resize handle and a
//! ring for the pivot. Invisible click areas are not painted.

use crate::overlay::{GizmoOverlay, HandleWidget, OutlineSegment};
use kurbo::{Affine, Circle, Line, Rect, Stroke as KurboStroke, Vec2};
use peniko::{Color, Fill};
use vello::Scene;

const OUTLINE_COLOR: Color = Color::from_rgba8(51, 122, 183, 255);
const HANDLE_FILL: Color = Color::from_rgba8(255, 255, 255, 255);
const HANDLE_STROKE: Color = Color::from_rgba8(51, 122, 183, 255);
const PIVOT_COLOR: Color = Color::from_rgba8(255, 160, 0, 255);

const OUTLINE_WIDTH: f64 = 1.0;
const PIVOT_RADIUS: f64 = 5.0;

/// Paint the overlay into a Vello scene on top of whatever is already there.
///
/// Call once per frame after the GUI texture itself has been drawn.
pub fn paint_overlay(scene: &mut Scene, overlay: &GizmoOverlay) {
    for segment in &overlay.outline {
        paint_outline_segment(scene, segment);
    }

    for handle in &overlay.handles {
        if handle.is_pivot {
            paint_pivot(scene, handle);
        } else {
            paint_handle(scene, handle);
        }
    }
}

// ─── Painters ────────────────────────────────────────────────────────────────

fn paint_outline_segment(scene: &mut Scene, segment: &OutlineSegment) {
    let (start, end) = segment.endpoints();
    let stroke = KurboStroke::new(OUTLINE_WIDTH);
    scene.stroke(&stroke, Affine::IDENTITY, OUTLINE_COLOR, None, &Line::new(start, end));
}

fn paint_handle(scene: &mut Scene, handle: &HandleWidget) {
    log::trace!(
        "HANDLE {} at ({}, {}) rot {}",
        handle.index,
        handle.position.x,
        handle.position.y,
        handle.rotation
    );
    // Container frame: origin at the container's top-left, rotated about its center.
    let half = handle.container_size / 2.0;
    let transform = Affine::translate(handle.position.to_vec2())
        * Affine::rotate(handle.rotation.to_radians())
        * Affine::translate(Vec2::new(-half, -half));

    let dot = Rect::new(handle.dot.left, handle.dot.top, handle.dot.right, handle.dot.bottom);
    scene.fill(Fill::NonZero, transform, HANDLE_FILL, None, &dot);
    scene.stroke(&KurboStroke::new(1.0), transform, HANDLE_STROKE, None, &dot);
}

fn paint_pivot(scene: &mut Scene, handle: &HandleWidget) {
    let ring = Circle::new(handle.position, PIVOT_RADIUS);
    scene.stroke(&KurboStroke::new(2.0), Affine::IDENTITY, PIVOT_COLOR, None, &ring);
}
