//! Gizmo interaction controller.
//!
//! Owns the nine scale points drawn around the primary selected control and
//! turns pointer gestures on them into geometry writes on every selected
//! control:
//!
//! - **Resize**: the dragged handle moves edges of the primary's local
//!   bounds; each edge delta is replayed on every other selected control's
//!   bounds, remapped by quarter turns of their relative rotation, and the
//!   result is committed as pixel (or percentage) `left/top/width/height`.
//! - **Rotate**: the angle of the pointer around the pivot is tracked and
//!   each step's delta is added to every selected control's rotation.
//!
//! Within one pointer move every control is mutated before any
//! property-changed notification is delivered.

use crate::config::GizmoConfig;
use crate::events::{EditorEvents, PointerInput, PropertyChangedEvent, PropertyValue};
use crate::selection::SelectionSource;
use gle_core::coords::{self, round_to};
use gle_core::*;
use gle_render::GizmoOverlay;
use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

/// Borrowed editor state a gizmo operation runs against.
pub struct GizmoContext<'a> {
    pub tree: &'a mut ControlTree,
    pub selection: &'a dyn SelectionSource,
    pub viewport: &'a Viewport,
    pub events: &'a EditorEvents,
}

/// Rotation gesture state: the pivot in canvas pixels and the pointer's
/// angle around it at the previous step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationDrag {
    pub pivot: Point,
    pub initial_angle_to_pivot: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GizmoState {
    #[default]
    Idle,
    DraggingScalePoint(usize),
    Rotating(RotationDrag),
}

/// Per-control snapshot taken when a resize drag starts. `local_bounds`
/// is then updated on every move; `stored_values` stays fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragScratch {
    pub local_bounds: Rect,
    pub stored_values: Rect,
}

pub struct GizmoController {
    config: GizmoConfig,
    state: GizmoState,
    scale_points: [ScalePoint; SCALE_POINT_COUNT],
    canvas_bounds: Rect,
    /// Primary control's local bounds as of the previous move.
    local_bounds: Rect,
    /// Primary control's pixel geometry at drag start.
    stored_values: Rect,
    scratch: HashMap<ControlId, DragScratch>,
}

impl Default for GizmoController {
    fn default() -> Self {
        Self::new(GizmoConfig::default())
    }
}

impl GizmoController {
    pub fn new(config: GizmoConfig) -> Self {
        Self {
            config,
            state: GizmoState::Idle,
            scale_points: scale_point_grid(),
            canvas_bounds: Rect::default(),
            local_bounds: Rect::default(),
            stored_values: Rect::default(),
            scratch: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    pub fn state(&self) -> GizmoState {
        self.state
    }

    pub fn scale_points(&self) -> &[ScalePoint; SCALE_POINT_COUNT] {
        &self.scale_points
    }

    pub fn canvas_bounds(&self) -> Rect {
        self.canvas_bounds
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GizmoState::DraggingScalePoint(_))
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.state, GizmoState::Rotating(_))
    }

    pub fn is_interacting(&self) -> bool {
        self.state != GizmoState::Idle
    }

    /// Drag snapshot of a selected control, while a resize is in progress.
    pub fn scratch(&self, id: ControlId) -> Option<&DragScratch> {
        self.scratch.get(&id)
    }

    /// Overlay for rendering and hit testing.
    pub fn overlay(&self) -> GizmoOverlay {
        GizmoOverlay::derive(
            &self.scale_points,
            self.canvas_bounds,
            self.is_interacting(),
            &self.config.handles,
        )
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    /// Recompute every handle's canvas position and rotation from the
    /// primary control's current geometry.
    pub fn update_gizmo(&mut self, ctx: &GizmoContext<'_>) {
        let Some(primary) = ctx.selection.primary() else {
            return;
        };
        let Some(chain) = ctx.tree.chain(primary) else {
            log::warn!("update_gizmo: primary control {primary:?} not in tree");
            return;
        };

        let local_bounds = chain.local_bounds();
        let pivot = coords::pivot_local(&chain);
        let rotation = coords::get_rotation(&chain, false).to_degrees();
        let mut canvas_bounds = Rect::accumulator();

        for point in self.scale_points.iter_mut() {
            let anchor = point.local_anchor(&local_bounds, pivot);
            let rtt = coords::node_to_rtt_space(&chain, anchor, None, None);
            let canvas = coords::rtt_to_canvas_space(ctx.viewport, rtt);
            canvas_bounds.include_point(canvas);
            point.position = canvas;
            point.rotation = rotation;
        }

        self.canvas_bounds = canvas_bounds;
        log::trace!("gizmo for {primary:?} updated, canvas bounds {canvas_bounds:?}");
    }

    // ─── Gesture start / end ─────────────────────────────────────────────

    /// Start resizing from handle `index`, snapshotting every selected control.
    pub fn begin_dragging_scale_point(&mut self, ctx: &GizmoContext<'_>, index: usize) {
        if index >= SCALE_POINT_COUNT || index == PIVOT_INDEX {
            log::warn!("begin_dragging_scale_point: {index} is not a resize handle");
            return;
        }
        let Some(primary) = ctx.selection.primary() else {
            return;
        };
        let Some(chain) = ctx.tree.chain(primary) else {
            log::warn!("begin_dragging_scale_point: primary control {primary:?} not in tree");
            return;
        };
        self.local_bounds = chain.local_bounds();
        self.stored_values = chain.stored_values();

        self.scratch.clear();
        for &id in ctx.selection.selected() {
            if let Some(chain) = ctx.tree.chain(id) {
                self.scratch.insert(
                    id,
                    DragScratch {
                        local_bounds: chain.local_bounds(),
                        stored_values: chain.stored_values(),
                    },
                );
            }
        }

        self.state = GizmoState::DraggingScalePoint(index);
        log::debug!("resize drag started on handle {index} of {primary:?}");
    }

    /// Start rotating around the primary control's pivot.
    pub fn begin_rotate(&mut self, ctx: &GizmoContext<'_>) {
        let Some(primary) = ctx.selection.primary() else {
            return;
        };
        let Some(chain) = ctx.tree.chain(primary) else {
            log::warn!("begin_rotate: primary control {primary:?} not in tree");
            return;
        };
        let rtt = coords::node_to_rtt_space(&chain, coords::pivot_local(&chain), None, None);
        let pivot = coords::rtt_to_canvas_space(ctx.viewport, rtt);
        let pointer = ctx.selection.pointer();
        let initial_angle_to_pivot = (pointer.y - pivot.y).atan2(pointer.x - pivot.x);

        self.state = GizmoState::Rotating(RotationDrag {
            pivot,
            initial_angle_to_pivot,
        });
        log::debug!("rotation started around {pivot:?}");
    }

    /// End the gesture unless the primary button is still held.
    /// Returns `true` if the controller went back to idle.
    pub fn on_up(&mut self, input: &PointerInput) -> bool {
        if input.buttons & self.config.primary_button_mask != 0 {
            return false;
        }
        if self.is_interacting() {
            log::debug!("gizmo gesture ended");
        }
        self.reset();
        true
    }

    /// Abandon any gesture in progress (focus loss, selection change).
    pub fn cancel(&mut self) {
        if self.is_interacting() {
            log::debug!("gizmo gesture cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = GizmoState::Idle;
        self.scratch.clear();
    }

    // ─── Pointer move ────────────────────────────────────────────────────

    /// Apply the current pointer position to the gesture in progress.
    pub fn on_move(&mut self, ctx: &mut GizmoContext<'_>) {
        let events = match self.state {
            GizmoState::Idle => return,
            GizmoState::DraggingScalePoint(index) => self.drag_to_pointer(ctx, index),
            GizmoState::Rotating(drag) => self.rotate_to_pointer(ctx, drag),
        };

        for event in &events {
            ctx.events.property_changed.notify(event);
        }
        ctx.events.property_grid_update_required.notify(&());
    }

    fn drag_to_pointer(
        &mut self,
        ctx: &mut GizmoContext<'_>,
        index: usize,
    ) -> Vec<PropertyChangedEvent> {
        let Some(primary) = ctx.selection.primary() else {
            return Vec::new();
        };
        let (in_node, primary_rotation) = {
            let Some(chain) = ctx.tree.chain(primary) else {
                return Vec::new();
            };
            let in_rtt =
                coords::mouse_pointer_to_rtt_space(ctx.viewport, ctx.selection.pointer());
            let in_node =
                coords::rtt_to_local_node_space(&chain, in_rtt, Some(&self.stored_values));
            (in_node, chain.control().rotation)
        };

        self.drag_local_bounds(
            ctx.tree,
            ctx.selection.selected(),
            index,
            in_node,
            primary_rotation,
        );
        self.update_nodes_from_local_bounds(ctx.tree, ctx.selection.selected(), index)
    }

    /// Move the dragged handle's edges of the primary's local bounds to
    /// `to`, then replay each edge delta on every selected control.
    fn drag_local_bounds(
        &mut self,
        tree: &ControlTree,
        selected: &[ControlId],
        index: usize,
        to: Point,
        primary_rotation: f64,
    ) {
        let point = self.scale_points[index];
        let min = self.config.min_edge_size;
        let previous = self.local_bounds;
        let mut new_bounds = previous;

        match point.horizontal {
            HorizontalPosition::Left => new_bounds.left = (previous.right - min).min(to.x),
            HorizontalPosition::Right => new_bounds.right = (previous.left + min).max(to.x),
            HorizontalPosition::Center => {}
        }
        match point.vertical {
            VerticalPosition::Top => new_bounds.top = (previous.bottom - min).min(to.y),
            VerticalPosition::Bottom => new_bounds.bottom = (previous.top + min).max(to.y),
            VerticalPosition::Center => {}
        }

        for id in selected {
            let Some(control) = tree.get(*id) else {
                continue;
            };
            let Some(scratch) = self.scratch.get_mut(id) else {
                continue;
            };
            let initial = scratch.local_bounds;
            let mut bounds = initial;

            // A control a quarter turn off the primary takes the primary's
            // left-edge delta on its top or bottom edge instead.
            let modifier = (primary_rotation - control.rotation).rem_euclid(TAU) / PI * 2.0;
            for edge in Edge::ALL {
                let target = Edge::from_index((edge.index() as f64 + modifier).round() as usize);
                let flip = if edge.is_leading() == target.is_leading() {
                    1.0
                } else {
                    -1.0
                };
                *bounds.edge_mut(target) += (new_bounds.edge(edge) - previous.edge(edge)) * flip;
            }

            scratch.local_bounds = bounds.clamp_against(&initial, min);
        }

        self.local_bounds = new_bounds;
    }

    /// Commit every selected control's cached local bounds as
    /// `left/top/width/height`, compensating for alignment and rotation.
    fn update_nodes_from_local_bounds(
        &self,
        tree: &mut ControlTree,
        selected: &[ControlId],
        index: usize,
    ) -> Vec<PropertyChangedEvent> {
        let point = self.scale_points[index];
        let left = point.horizontal == HorizontalPosition::Left;
        let top = point.vertical == VerticalPosition::Top;
        let mut events = Vec::new();

        for &id in selected {
            let Some(scratch) = self.scratch.get(&id).copied() else {
                continue;
            };
            let Some((rotation, scale, horizontal, vertical)) = tree.chain(id).map(|chain| {
                let control = chain.control();
                (
                    coords::get_rotation(&chain, true),
                    coords::get_scale(&chain, true),
                    control.horizontal_alignment,
                    control.vertical_alignment,
                )
            }) else {
                continue;
            };

            let bounds = scratch.local_bounds;
            let stored = scratch.stored_values;
            let width = bounds.width();
            let height = bounds.height();
            let absolute_center = bounds.center();
            let mut center = Point::new(absolute_center.x * scale.x, absolute_center.y * scale.y);

            let (sin, cos) = rotation.sin_cos();
            let (sin_180, cos_180) = (rotation + PI).sin_cos();
            let width_delta = (stored.width() - width) * 0.5;
            let height_delta = (stored.height() - height) * 0.5;

            match horizontal {
                HorizontalAlignment::Left => {
                    center.x += (if left { width_delta } else { -absolute_center.x }) * cos;
                    center.y += (if left { -width_delta } else { absolute_center.x }) * sin;
                }
                HorizontalAlignment::Right => {
                    center.x += (if left { -width_delta } else { absolute_center.x }) * cos;
                    center.y += (if left { width_delta } else { -absolute_center.x }) * sin;
                }
                HorizontalAlignment::Center => {}
            }
            match vertical {
                VerticalAlignment::Top => {
                    let shift = if top { -height_delta } else { absolute_center.y };
                    center.y += shift * cos_180;
                    center.x += shift * sin_180;
                }
                VerticalAlignment::Bottom => {
                    let shift = if top { height_delta } else { -absolute_center.y };
                    center.y += shift * cos_180;
                    center.x += shift * sin_180;
                }
                VerticalAlignment::Center => {}
            }

            let rotated = Affine::rotate(rotation) * center;
            let writes = [
                (DimensionProperty::Left, stored.left + rotated.x),
                (DimensionProperty::Top, stored.top + rotated.y),
                (DimensionProperty::Width, width),
                (DimensionProperty::Height, height),
            ];

            for (property, value) in writes {
                let new_pixels = round_to(value, self.config.round_factor);
                let was_percentage = tree
                    .get(id)
                    .is_some_and(|c| c.dimension(property).is_percentage());
                let Some(old_pixels) = tree.set_in_pixels(id, property, new_pixels) else {
                    continue;
                };
                events.push(PropertyChangedEvent::new(
                    id,
                    property.pixel_name(),
                    PropertyValue::Number(new_pixels),
                    PropertyValue::Number(old_pixels),
                ));
                if was_percentage {
                    for change in coords::convert_to_percentage(tree, id, &[property]) {
                        events.push(PropertyChangedEvent::new(
                            id,
                            change.property.name(),
                            PropertyValue::Dimension(change.new),
                            PropertyValue::Dimension(change.old),
                        ));
                    }
                }
            }

            if let Some(control) = tree.get_mut(id)
                && let Some(property) = auto_fit_property(&control.kind)
                && control.kind.disable_auto_fit()
            {
                events.push(PropertyChangedEvent::new(
                    id,
                    property,
                    PropertyValue::Bool(false),
                    PropertyValue::Bool(true),
                ));
            }
        }

        events
    }

    fn rotate_to_pointer(
        &mut self,
        ctx: &mut GizmoContext<'_>,
        drag: RotationDrag,
    ) -> Vec<PropertyChangedEvent> {
        let pointer = ctx.selection.pointer();
        let angle = (pointer.y - drag.pivot.y).atan2(pointer.x - drag.pivot.x);
        let delta = angle - drag.initial_angle_to_pivot;

        let mut events = Vec::new();
        for &id in ctx.selection.selected() {
            let Some(control) = ctx.tree.get_mut(id) else {
                continue;
            };
            let old = control.rotation;
            control.rotation += delta;
            events.push(PropertyChangedEvent::new(
                id,
                "rotation",
                PropertyValue::Number(control.rotation),
                PropertyValue::Number(old),
            ));
        }

        self.state = GizmoState::Rotating(RotationDrag {
            initial_angle_to_pivot: angle,
            ..drag
        });
        events
    }
}

/// Name of the flag that would override an explicit size, if the kind has one.
fn auto_fit_property(kind: &ControlKind) -> Option<&'static str> {
    match kind {
        ControlKind::Image { .. } => Some("autoScale"),
        ControlKind::TextBlock { .. } => Some("resizeToFit"),
        _ => None,
    }
}
