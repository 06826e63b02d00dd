//! Editor event channels.
//!
//! An [`Observable`] is a single-threaded broadcast list. `add` hands back a
//! [`Subscription`] guard; dropping the guard deregisters the observer.
//! Observers added or removed during a notification take effect from the
//! next notification.

use gle_core::{Color, ControlId, Point, ValueAndUnit};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Observers<T> {
    next_id: Cell<u64>,
    list: RefCell<Vec<(u64, Callback<T>)>>,
}

pub struct Observable<T> {
    inner: Rc<Observers<T>>,
}

impl<T: 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Observable<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Observers {
                next_id: Cell::new(0),
                list: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register an observer. It stays registered until the returned
    /// subscription is dropped (or [`Subscription::detach`]ed).
    #[must_use = "dropping the subscription removes the observer immediately"]
    pub fn add(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        self.inner.list.borrow_mut().push((id, callback));

        let weak: Weak<Observers<T>> = Rc::downgrade(&self.inner);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(observers) = weak.upgrade() {
                    observers.list.borrow_mut().retain(|(i, _)| *i != id);
                }
            })),
        }
    }

    /// Deliver `value` to every observer registered at the time of the call.
    /// An observer that re-enters its own channel is skipped for the nested call.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .inner
            .list
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in snapshot {
            if let Ok(mut cb) = callback.try_borrow_mut() {
                (*cb)(value);
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.list.borrow().len()
    }

    pub fn has_observers(&self) -> bool {
        self.observer_count() > 0
    }
}

/// Registration guard returned by [`Observable::add`].
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the observer registered for the lifetime of the observable.
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

// ─── Payloads ────────────────────────────────────────────────────────────

/// A pointer sample in canvas pixels. `buttons` is the pressed-button
/// bitmask (bit 0 = primary).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerInput {
    pub position: Point,
    pub buttons: u32,
}

impl PointerInput {
    pub fn new(x: f64, y: f64, buttons: u32) -> Self {
        Self {
            position: Point::new(x, y),
            buttons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64),
    Dimension(ValueAndUnit),
    Color(Color),
    Text(String),
    Bool(bool),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A single property write on a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChangedEvent {
    pub object: ControlId,
    pub property: String,
    pub value: PropertyValue,
    pub initial_value: PropertyValue,
}

impl PropertyChangedEvent {
    pub fn new(
        object: ControlId,
        property: impl Into<String>,
        value: PropertyValue,
        initial_value: PropertyValue,
    ) -> Self {
        Self {
            object,
            property: property.into(),
            value,
            initial_value,
        }
    }
}

/// The editor-wide channels shared by the gizmo, property grid and canvas.
#[derive(Default)]
pub struct EditorEvents {
    pub gizmo_update_required: Observable<()>,
    pub pointer_up: Observable<PointerInput>,
    pub pointer_move: Observable<PointerInput>,
    pub property_changed: Observable<PropertyChangedEvent>,
    pub property_grid_update_required: Observable<()>,
    pub selection_changed: Observable<Vec<ControlId>>,
}

impl EditorEvents {
    pub fn new() -> Self {
        Self::default()
    }
}
