//! Integration tests: pointer input → gizmo → control geometry.
//!
//! Drives the `Editor` façade the way a host would (pointer down on a
//! handle, moves, release) and checks the committed control properties.

use gle_core::*;
use gle_editor::{Editor, GizmoState, InputEvent, PointerInput, PropertyChangedEvent};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

const RTT: Size = Size::new(800.0, 600.0);

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

/// 100×50 at (100, 100), anchored top-left.
fn panel(name: &str) -> Control {
    Control::new(ControlId::intern(name), ControlKind::Rectangle)
        .with_size(ValueAndUnit::pixels(100.0), ValueAndUnit::pixels(50.0))
        .with_position(ValueAndUnit::pixels(100.0), ValueAndUnit::pixels(100.0))
        .with_alignment(HorizontalAlignment::Left, VerticalAlignment::Top)
}

fn editor_with(controls: Vec<Control>) -> Editor {
    let mut tree = ControlTree::new(RTT);
    let ids: Vec<ControlId> = controls.iter().map(|c| c.id).collect();
    for control in controls {
        tree.add_control(tree.root, control);
    }
    let mut editor = Editor::new(tree, RTT);
    for id in ids {
        editor.add_to_selection(id);
    }
    editor
}

fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    assert!(
        editor.handle(&InputEvent::from_pointer_down(from.0, from.1, 1)),
        "no handle under {from:?}"
    );
    editor.handle(&InputEvent::from_pointer_move(to.0, to.1, 1));
    editor.handle(&InputEvent::from_pointer_up(to.0, to.1, 0));
}

fn handle_at(editor: &Editor, index: usize) -> Point {
    editor.gizmo().scale_points()[index].position
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 0.05 && (a.y - b.y).abs() < 0.05
}

/// RTT position of the midpoint of `edge` in the control's local bounds.
fn edge_midpoint(editor: &Editor, name: &str, edge: Edge) -> Point {
    let chain = editor.tree.chain(ControlId::intern(name)).unwrap();
    let b = chain.local_bounds();
    let local = match edge {
        Edge::Left => Point::new(b.left, 0.0),
        Edge::Top => Point::new(0.0, b.top),
        Edge::Right => Point::new(b.right, 0.0),
        Edge::Bottom => Point::new(0.0, b.bottom),
    };
    gle_core::coords::node_to_rtt_space(&chain, local, None, None)
}

fn px(editor: &Editor, name: &str, property: DimensionProperty) -> f64 {
    editor
        .tree
        .in_pixels(ControlId::intern(name), property)
        .unwrap()
}

// ─── Layout ──────────────────────────────────────────────────────────────

#[test]
fn update_gizmo_is_idempotent() {
    let mut editor = editor_with(vec![panel("gg_idem").with_rotation(0.3)]);
    editor.request_gizmo_update();
    let first = *editor.gizmo().scale_points();
    editor.request_gizmo_update();
    assert_eq!(*editor.gizmo().scale_points(), first);
}

#[test]
fn handle_rotation_reports_degrees() {
    let control = panel("gg_degrees").with_rotation(std::f64::consts::FRAC_PI_2);
    let editor = editor_with(vec![control]);
    let rotation = editor.gizmo().scale_points()[0].rotation;
    assert!(close(rotation, 90.0));
}

// ─── Resize ──────────────────────────────────────────────────────────────

#[test]
fn right_edge_drag_grows_width_only() {
    let mut editor = editor_with(vec![panel("gg_right")]);
    drag(&mut editor, (200.0, 125.0), (230.0, 125.0));
    assert!(close(px(&editor, "gg_right", DimensionProperty::Width), 130.0));
    assert!(close(px(&editor, "gg_right", DimensionProperty::Left), 100.0));
    assert!(close(px(&editor, "gg_right", DimensionProperty::Height), 50.0));
}

#[test]
fn left_edge_drag_keeps_right_edge() {
    let mut editor = editor_with(vec![panel("gg_left")]);
    drag(&mut editor, (100.0, 125.0), (120.0, 125.0));
    let left = px(&editor, "gg_left", DimensionProperty::Left);
    let width = px(&editor, "gg_left", DimensionProperty::Width);
    assert!(close(left, 120.0));
    assert!(close(width, 80.0));
    assert!(close(left + width, 200.0));
}

#[test]
fn drag_never_collapses_below_one_unit() {
    let mut editor = editor_with(vec![panel("gg_min")]);
    drag(&mut editor, (200.0, 125.0), (-400.0, 125.0));
    assert!(close(px(&editor, "gg_min", DimensionProperty::Width), 1.0));
    assert!(close(px(&editor, "gg_min", DimensionProperty::Left), 100.0));
}

#[test]
fn quarter_turned_secondary_takes_delta_on_vertical_edge() {
    let secondary = Control::new(ControlId::intern("gg_turned"), ControlKind::Rectangle)
        .with_size(ValueAndUnit::pixels(60.0), ValueAndUnit::pixels(40.0))
        .with_position(ValueAndUnit::pixels(200.0), ValueAndUnit::pixels(0.0))
        .with_rotation(std::f64::consts::FRAC_PI_2);
    let mut editor = editor_with(vec![panel("gg_primary"), secondary]);

    drag(&mut editor, (100.0, 125.0), (120.0, 125.0));

    assert!(close(px(&editor, "gg_primary", DimensionProperty::Width), 80.0));
    assert!(close(px(&editor, "gg_turned", DimensionProperty::Width), 60.0));
    assert!(close(px(&editor, "gg_turned", DimensionProperty::Height), 20.0));
    assert!(close(px(&editor, "gg_turned", DimensionProperty::Left), 210.0));
}

#[test]
fn edge_drags_keep_opposite_edge_under_rotation_and_scale() {
    let placements = [
        (HorizontalAlignment::Left, VerticalAlignment::Top, 200.0, 200.0),
        (HorizontalAlignment::Right, VerticalAlignment::Bottom, -300.0, -200.0),
        (HorizontalAlignment::Center, VerticalAlignment::Center, 0.0, 0.0),
    ];
    let rotation: f64 = 0.5;
    let (sin, cos) = rotation.sin_cos();

    for (n, (horizontal, vertical, left, top)) in placements.into_iter().enumerate() {
        for index in [1, 3, 5, 7] {
            let name = format!("gg_rs_{n}_{index}");
            let control = panel(&name)
                .with_position(ValueAndUnit::pixels(left), ValueAndUnit::pixels(top))
                .with_alignment(horizontal, vertical)
                .with_rotation(rotation)
                .with_scale(1.5, 0.7);
            let mut editor = editor_with(vec![control]);

            let point = editor.gizmo().scale_points()[index];
            let (h, v) = (point.horizontal.sign(), point.vertical.sign());
            let outward = Vec2::new(h * cos - v * sin, h * sin + v * cos);
            let from = point.position;
            let to = from + outward * 20.0;
            let opposite = handle_at(&editor, 8 - index);

            drag(&mut editor, (from.x, from.y), (to.x, to.y));

            assert!(
                near(handle_at(&editor, 8 - index), opposite),
                "{name}: opposite edge moved from {opposite:?} to {:?}",
                handle_at(&editor, 8 - index)
            );
            assert!(
                near(handle_at(&editor, index), to),
                "{name}: dragged edge at {:?}, expected {to:?}",
                handle_at(&editor, index)
            );
            if h != 0.0 {
                assert!(close(px(&editor, &name, DimensionProperty::Width), 113.33));
                assert!(close(px(&editor, &name, DimensionProperty::Height), 50.0));
            } else {
                assert!(close(px(&editor, &name, DimensionProperty::Width), 100.0));
                assert!(close(px(&editor, &name, DimensionProperty::Height), 78.57));
            }
        }
    }
}

#[test]
fn half_turned_secondary_mirrors_left_drag_onto_right_edge() {
    let secondary = panel("gg_half")
        .with_size(ValueAndUnit::pixels(60.0), ValueAndUnit::pixels(40.0))
        .with_position(ValueAndUnit::pixels(300.0), ValueAndUnit::pixels(300.0))
        .with_rotation(std::f64::consts::PI);
    let mut editor = editor_with(vec![panel("gg_half_primary"), secondary]);
    assert!(near(edge_midpoint(&editor, "gg_half", Edge::Left), Point::new(360.0, 320.0)));

    drag(&mut editor, (100.0, 125.0), (120.0, 125.0));

    assert!(close(px(&editor, "gg_half", DimensionProperty::Width), 40.0));
    assert!(close(px(&editor, "gg_half", DimensionProperty::Height), 40.0));
    assert!(close(px(&editor, "gg_half", DimensionProperty::Left), 320.0));
    // Local left edge faces right on screen and stays put.
    assert!(near(edge_midpoint(&editor, "gg_half", Edge::Left), Point::new(360.0, 320.0)));
    assert!(near(edge_midpoint(&editor, "gg_half", Edge::Right), Point::new(320.0, 320.0)));
}

#[test]
fn quarter_turned_primary_bottom_drag_resizes_secondary_width() {
    let primary = panel("gg_qt_primary").with_rotation(std::f64::consts::FRAC_PI_2);
    let secondary = panel("gg_qt_secondary")
        .with_size(ValueAndUnit::pixels(60.0), ValueAndUnit::pixels(40.0))
        .with_position(ValueAndUnit::pixels(400.0), ValueAndUnit::pixels(300.0));
    let mut editor = editor_with(vec![primary, secondary]);

    // Rotated a quarter turn, the primary's bottom edge faces left.
    let bottom = handle_at(&editor, 7);
    let top = handle_at(&editor, 1);
    assert!(near(bottom, Point::new(125.0, 125.0)));
    assert!(near(top, Point::new(175.0, 125.0)));

    drag(&mut editor, (125.0, 125.0), (110.0, 125.0));

    assert!(close(px(&editor, "gg_qt_primary", DimensionProperty::Height), 65.0));
    assert!(close(px(&editor, "gg_qt_primary", DimensionProperty::Width), 100.0));
    assert!(near(handle_at(&editor, 1), top));
    assert!(near(handle_at(&editor, 7), Point::new(110.0, 125.0)));

    assert!(close(px(&editor, "gg_qt_secondary", DimensionProperty::Width), 75.0));
    assert!(close(px(&editor, "gg_qt_secondary", DimensionProperty::Height), 40.0));
}

#[test]
fn percentage_dimensions_stay_percentages() {
    let control = panel("gg_pct")
        .with_size(ValueAndUnit::percentage(0.25), ValueAndUnit::pixels(50.0));
    let mut editor = editor_with(vec![control]);
    drag(&mut editor, (300.0, 125.0), (340.0, 125.0));

    let control = editor.tree.get(ControlId::intern("gg_pct")).unwrap();
    assert_eq!(control.width.unit, Unit::Percentage);
    assert!((control.width.value - 0.3).abs() < 1e-9);
    assert_eq!(control.height.unit, Unit::Pixel);
}

#[test]
fn image_stops_auto_scaling_after_resize() {
    let image = Control {
        kind: ControlKind::Image { auto_scale: true },
        ..panel("gg_image")
    };
    let mut editor = editor_with(vec![image]);
    drag(&mut editor, (200.0, 125.0), (210.0, 125.0));
    assert_eq!(
        editor.tree.get(ControlId::intern("gg_image")).unwrap().kind,
        ControlKind::Image { auto_scale: false }
    );
}

#[test]
fn zoomed_viewport_maps_pointer_back_to_rtt() {
    let mut editor = editor_with(vec![panel("gg_zoom")]);
    let mut viewport = editor.viewport;
    viewport.zoom = 2.0;
    editor.set_viewport(viewport);

    // RTT (200, 125) lands on canvas (0, -50) at 2× zoom around the center.
    let handle = editor.gizmo().scale_points()[5].position;
    assert!(close(handle.x, 0.0) && close(handle.y, -50.0));

    drag(&mut editor, (0.0, -50.0), (60.0, -50.0));
    assert!(close(px(&editor, "gg_zoom", DimensionProperty::Width), 130.0));
}

#[test]
fn one_notification_per_write_then_grid_refresh() {
    let mut editor = editor_with(vec![panel("gg_notify")]);
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&log);
    let _props = editor
        .events
        .property_changed
        .add(move |e: &PropertyChangedEvent| sink.borrow_mut().push(e.property.clone()));
    let sink = Rc::clone(&log);
    let _grid = editor
        .events
        .property_grid_update_required
        .add(move |_| sink.borrow_mut().push("grid".into()));

    drag(&mut editor, (200.0, 125.0), (230.0, 125.0));

    assert_eq!(
        *log.borrow(),
        vec![
            "leftInPixels",
            "topInPixels",
            "widthInPixels",
            "heightInPixels",
            "grid"
        ]
    );
}

// ─── Rotate ──────────────────────────────────────────────────────────────

#[test]
fn rotation_deltas_telescope() {
    let mut editor = editor_with(vec![panel("gg_rotate")]);
    // Just outside the top-right corner: the rotate area of handle 2.
    assert!(editor.handle(&InputEvent::from_pointer_down(210.0, 92.0, 1)));
    assert!(matches!(editor.gizmo().state(), GizmoState::Rotating(_)));

    let start = (-33.0f64).atan2(60.0);
    editor.handle(&InputEvent::from_pointer_move(250.0, 125.0, 1));
    editor.handle(&InputEvent::from_pointer_move(150.0, 225.0, 1));
    editor.handle(&InputEvent::from_pointer_up(150.0, 225.0, 0));

    let rotation = editor.tree.get(ControlId::intern("gg_rotate")).unwrap().rotation;
    assert!((rotation - (std::f64::consts::FRAC_PI_2 - start)).abs() < 1e-9);
    assert_eq!(editor.gizmo().state(), GizmoState::Idle);
}

#[test]
fn rotation_applies_to_every_selected_control() {
    let other = panel("gg_rot_other")
        .with_position(ValueAndUnit::pixels(400.0), ValueAndUnit::pixels(300.0));
    let mut editor = editor_with(vec![panel("gg_rot_main"), other]);
    assert!(editor.handle(&InputEvent::from_pointer_down(210.0, 92.0, 1)));
    editor.handle(&InputEvent::from_pointer_move(250.0, 125.0, 1));

    let main = editor.tree.get(ControlId::intern("gg_rot_main")).unwrap().rotation;
    let other = editor.tree.get(ControlId::intern("gg_rot_other")).unwrap().rotation;
    assert!(main.abs() > 0.1);
    assert!((main - other).abs() < 1e-12);
}

// ─── Channels ────────────────────────────────────────────────────────────

#[test]
fn update_request_from_another_panel_refreshes_handles() {
    let mut editor = editor_with(vec![panel("gg_external")]);
    assert!(near(handle_at(&editor, 8), Point::new(200.0, 150.0)));

    // The property grid edits the width, then asks for a gizmo refresh.
    let id = ControlId::intern("gg_external");
    editor.tree.set_in_pixels(id, DimensionProperty::Width, 300.0);
    editor.events.gizmo_update_required.notify(&());

    let overlay = editor.overlay().unwrap();
    assert!(near(overlay.handles[8].position, Point::new(400.0, 150.0)));
    assert!(near(handle_at(&editor, 8), Point::new(400.0, 150.0)));
}

#[test]
fn pointer_channels_drive_the_gesture() {
    let mut editor = editor_with(vec![panel("gg_channels")]);
    assert!(editor.handle(&InputEvent::from_pointer_down(200.0, 125.0, 1)));

    editor.events.pointer_move.notify(&PointerInput::new(240.0, 125.0, 1));
    assert!(close(px(&editor, "gg_channels", DimensionProperty::Width), 100.0));
    assert!(editor.process_pending());
    assert!(close(px(&editor, "gg_channels", DimensionProperty::Width), 140.0));
    assert!(near(handle_at(&editor, 5), Point::new(240.0, 125.0)));

    editor.events.pointer_up.notify(&PointerInput::new(240.0, 125.0, 0));
    assert!(editor.process_pending());
    assert_eq!(editor.gizmo().state(), GizmoState::Idle);
    assert!(!editor.process_pending());
}

#[test]
fn zooming_keeps_anchored_handle_in_place() {
    let mut editor = editor_with(vec![panel("gg_zoom_at")]);
    let anchor = handle_at(&editor, 8);
    editor.zoom_at(anchor, 1.5);
    assert!(near(handle_at(&editor, 8), anchor));
    assert!(near(handle_at(&editor, 0), Point::new(50.0, 75.0)));
}

// ─── Release ─────────────────────────────────────────────────────────────

#[test]
fn pointer_up_with_primary_held_keeps_gesture() {
    let mut editor = editor_with(vec![panel("gg_held")]);
    assert!(editor.handle(&InputEvent::from_pointer_down(200.0, 125.0, 1)));
    assert_eq!(editor.gizmo().state(), GizmoState::DraggingScalePoint(5));

    assert!(!editor.pointer_up(&PointerInput::new(200.0, 125.0, 1)));
    assert_eq!(editor.gizmo().state(), GizmoState::DraggingScalePoint(5));

    assert!(editor.pointer_up(&PointerInput::new(200.0, 125.0, 0)));
    assert_eq!(editor.gizmo().state(), GizmoState::Idle);
}

#[test]
fn focus_loss_abandons_gesture() {
    let mut editor = editor_with(vec![panel("gg_focus")]);
    assert!(editor.handle(&InputEvent::from_pointer_down(200.0, 125.0, 1)));
    editor.handle(&InputEvent::FocusLost);
    assert_eq!(editor.gizmo().state(), GizmoState::Idle);

    // Later moves no longer resize.
    editor.handle(&InputEvent::from_pointer_move(260.0, 125.0, 1));
    assert!(close(px(&editor, "gg_focus", DimensionProperty::Width), 100.0));
}

#[test]
fn scale_handle_needs_primary_button() {
    let mut editor = editor_with(vec![panel("gg_button")]);
    assert!(!editor.handle(&InputEvent::from_pointer_down(200.0, 125.0, 2)));
    assert_eq!(editor.gizmo().state(), GizmoState::Idle);
}

#[test]
fn overlay_absent_without_selection() {
    let mut editor = editor_with(vec![panel("gg_overlay")]);
    assert!(editor.overlay().is_some());
    editor.clear_selection();
    assert!(editor.overlay().is_none());
}
