//! Editor façade.
//!
//! Owns the control tree, selection, viewport, event channels and the gizmo
//! controller, and routes host input to them. Hosts call [`Editor::handle`]
//! with normalized [`InputEvent`]s and draw [`Editor::overlay`] each frame.
//!
//! The editor also listens on its own `gizmo_update_required`,
//! `pointer_move` and `pointer_up` channels, so other panels can drive the
//! gizmo by notifying them. Those notifications are queued and applied on
//! the next [`Editor::handle`], [`Editor::overlay`] or
//! [`Editor::process_pending`] call.

use crate::color_line::ColorLine;
use crate::config::GizmoConfig;
use crate::events::{EditorEvents, PointerInput, Subscription};
use crate::gizmo::{GizmoContext, GizmoController};
use crate::input::InputEvent;
use crate::selection::{Selection, SelectionSource};
use gle_core::{ColorParseError, ControlId, ControlTree, Point, Size, Viewport};
use gle_render::{GizmoOverlay, HandleArea, HandleHit, hit_test};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A notification the editor received on one of its own channels.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    GizmoUpdate,
    PointerMove(PointerInput),
    PointerUp(PointerInput),
}

type Inbox = Rc<RefCell<VecDeque<Pending>>>;

pub struct Editor {
    pub tree: ControlTree,
    pub selection: Selection,
    pub viewport: Viewport,
    pub events: EditorEvents,
    gizmo: GizmoController,
    inbox: Inbox,
    _listeners: [Subscription; 3],
}

impl Editor {
    pub fn new(tree: ControlTree, canvas_size: Size) -> Self {
        Self::with_config(tree, canvas_size, GizmoConfig::default())
    }

    pub fn with_config(tree: ControlTree, canvas_size: Size, config: GizmoConfig) -> Self {
        let viewport = Viewport::new(tree.rtt_size, canvas_size);
        let events = EditorEvents::new();
        let inbox = Inbox::default();
        let listeners = listen(&events, &inbox);
        Self {
            tree,
            selection: Selection::new(),
            viewport,
            events,
            gizmo: GizmoController::new(config),
            inbox,
            _listeners: listeners,
        }
    }

    pub fn gizmo(&self) -> &GizmoController {
        &self.gizmo
    }

    /// Overlay to draw, or `None` with nothing selected.
    pub fn overlay(&mut self) -> Option<GizmoOverlay> {
        self.process_pending();
        self.selection.primary().map(|_| self.gizmo.overlay())
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, id: ControlId) {
        self.selection.select(id);
        self.selection_changed();
    }

    pub fn add_to_selection(&mut self, id: ControlId) {
        self.selection.add(id);
        self.selection_changed();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selection_changed();
    }

    fn selection_changed(&mut self) {
        self.gizmo.cancel();
        log::debug!("selection: {:?}", self.selection.selected());
        self.events
            .selection_changed
            .notify(&self.selection.selected().to_vec());
        self.request_gizmo_update();
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.request_gizmo_update();
    }

    /// Zoom the canvas by `factor` around the canvas point `anchor`.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.viewport.zoom_at(anchor, factor);
        self.request_gizmo_update();
    }

    /// Announce on `gizmo_update_required` and recompute handle positions.
    pub fn request_gizmo_update(&mut self) {
        self.events.gizmo_update_required.notify(&());
        self.process_pending();
    }

    // ─── Channel listeners ───────────────────────────────────────────────

    /// Apply everything queued from the editor's own channels, in arrival
    /// order. Returns `true` if a pointer sample moved or ended a gesture.
    pub fn process_pending(&mut self) -> bool {
        let mut consumed = false;
        while let Some(pending) = self.next_pending() {
            consumed |= match pending {
                Pending::GizmoUpdate => {
                    self.refresh_gizmo();
                    false
                }
                Pending::PointerMove(input) => self.apply_pointer_move(&input),
                Pending::PointerUp(input) => self.apply_pointer_up(&input),
            };
        }
        consumed
    }

    fn next_pending(&self) -> Option<Pending> {
        self.inbox.borrow_mut().pop_front()
    }

    fn refresh_gizmo(&mut self) {
        let ctx = GizmoContext {
            tree: &mut self.tree,
            selection: &self.selection,
            viewport: &self.viewport,
            events: &self.events,
        };
        self.gizmo.update_gizmo(&ctx);
    }

    fn apply_pointer_move(&mut self, input: &PointerInput) -> bool {
        self.selection.set_pointer(input.position);
        if !self.gizmo.is_interacting() {
            return false;
        }

        let mut ctx = GizmoContext {
            tree: &mut self.tree,
            selection: &self.selection,
            viewport: &self.viewport,
            events: &self.events,
        };
        self.gizmo.on_move(&mut ctx);
        self.events.gizmo_update_required.notify(&());
        true
    }

    fn apply_pointer_up(&mut self, input: &PointerInput) -> bool {
        self.selection.set_pointer(input.position);
        let was_interacting = self.gizmo.is_interacting();
        let ended = self.gizmo.on_up(input) && was_interacting;
        if ended {
            self.events.gizmo_update_required.notify(&());
        }
        ended
    }

    // ─── Input routing ───────────────────────────────────────────────────

    /// Route one input event. Returns `true` if the gizmo consumed it.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { .. } => event
                .pointer()
                .is_some_and(|input| self.pointer_down(&input).is_some()),
            InputEvent::PointerMove { .. } => event
                .pointer()
                .is_some_and(|input| self.pointer_move(&input)),
            InputEvent::PointerUp { .. } => event
                .pointer()
                .is_some_and(|input| self.pointer_up(&input)),
            InputEvent::FocusLost => {
                self.focus_lost();
                false
            }
        }
    }

    /// Start a resize or rotation if the pointer is on a handle.
    pub fn pointer_down(&mut self, input: &PointerInput) -> Option<HandleHit> {
        self.process_pending();
        self.selection.set_pointer(input.position);
        self.selection.primary()?;

        let hit = hit_test(&self.gizmo.overlay(), input.position)?;
        let ctx = GizmoContext {
            tree: &mut self.tree,
            selection: &self.selection,
            viewport: &self.viewport,
            events: &self.events,
        };
        match hit.area {
            HandleArea::Scale => {
                if input.buttons & self.gizmo.config().primary_button_mask == 0 {
                    return None;
                }
                self.gizmo.begin_dragging_scale_point(&ctx, hit.index);
            }
            HandleArea::Rotate => self.gizmo.begin_rotate(&ctx),
        }
        self.gizmo.is_interacting().then_some(hit)
    }

    /// Publish a pointer move. Returns `true` if a gesture was in progress.
    pub fn pointer_move(&mut self, input: &PointerInput) -> bool {
        self.events.pointer_move.notify(input);
        self.process_pending()
    }

    /// Publish a pointer release. Returns `true` if a gesture ended.
    pub fn pointer_up(&mut self, input: &PointerInput) -> bool {
        self.events.pointer_up.notify(input);
        self.process_pending()
    }

    /// Drop any gesture in progress, since its pointer-up will never arrive.
    pub fn focus_lost(&mut self) {
        self.process_pending();
        self.gizmo.cancel();
    }

    // ─── Property editors ────────────────────────────────────────────────

    /// A color line bound to `id.property`, if both exist.
    pub fn color_line(&self, label: &str, id: ControlId, property: &str) -> Option<ColorLine> {
        ColorLine::new(label, &self.tree, id, property)
    }

    /// Apply color text through `line` and refresh the property grid.
    pub fn edit_color(&mut self, line: &mut ColorLine, text: &str) -> Result<(), ColorParseError> {
        line.on_change(&mut self.tree, Some(&self.events.property_changed), text)?;
        self.events.property_grid_update_required.notify(&());
        Ok(())
    }
}

/// Queue the editor's own channel notifications for [`Editor::process_pending`].
fn listen(events: &EditorEvents, inbox: &Inbox) -> [Subscription; 3] {
    let queue = Rc::clone(inbox);
    let gizmo = events
        .gizmo_update_required
        .add(move |_| queue.borrow_mut().push_back(Pending::GizmoUpdate));
    let queue = Rc::clone(inbox);
    let moves = events
        .pointer_move
        .add(move |input| queue.borrow_mut().push_back(Pending::PointerMove(*input)));
    let queue = Rc::clone(inbox);
    let ups = events
        .pointer_up
        .add(move |input| queue.borrow_mut().push_back(Pending::PointerUp(*input)));
    [gizmo, moves, ups]
}
