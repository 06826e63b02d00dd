pub mod color_line;
pub mod config;
pub mod editor;
pub mod events;
pub mod gizmo;
pub mod input;
pub mod selection;

pub use color_line::{Channel, ColorLine};
pub use config::GizmoConfig;
pub use editor::Editor;
pub use events::{
    EditorEvents, Observable, PointerInput, PropertyChangedEvent, PropertyValue, Subscription,
};
pub use gizmo::{DragScratch, GizmoContext, GizmoController, GizmoState, RotationDrag};
pub use input::InputEvent;
pub use selection::{Selection, SelectionSource};
