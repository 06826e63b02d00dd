pub mod cursors;
pub mod hit;
pub mod overlay;
pub mod paint;

pub use cursors::{RotateCursor, ScaleCursor, cursor_index};
pub use hit::{HandleArea, HandleHit, hit_test};
pub use overlay::{GizmoOverlay, HandleLayout, HandleWidget, OutlineSegment};
pub use paint::paint_overlay;
