//! Coordinate conversions between a control's local space, the render
//! target (RTT) and the on-screen canvas.
//!
//! Local space is the control's own unscaled, unrotated frame with the
//! origin at its center. Each ancestor link maps local → parent space via
//! `T(offset) · T(pivot) · R(rotation) · S(scale) · T(-pivot)`, where the
//! offset is relative to the parent's center. RTT space has its origin at
//! the top-left of the render target.
//!
//! Nothing here validates zero-size ancestors: degenerate geometry yields
//! non-finite coordinates, which callers propagate as-is.

use crate::id::ControlId;
use crate::model::{
    Control, ControlTree, DimensionProperty, HorizontalAlignment, ValueAndUnit, VerticalAlignment,
};
use crate::rect::Rect;
use crate::viewport::Viewport;
use kurbo::{Affine, Point, Size, Vec2};
use smallvec::SmallVec;

// ─── Control chain ───────────────────────────────────────────────────────

/// One link of a [`ControlChain`]: a control plus its measured size and the
/// measured size of its parent.
#[derive(Debug, Clone, Copy)]
pub struct ChainLink<'a> {
    pub control: &'a Control,
    pub parent_size: Size,
    pub size: Size,
}

impl ChainLink<'_> {
    pub fn left_px(&self) -> f64 {
        self.control.left.to_pixels(self.parent_size.width)
    }

    pub fn top_px(&self) -> f64 {
        self.control.top.to_pixels(self.parent_size.height)
    }
}

/// Explicit ancestor chain `[control, parent, …, top-level]` with measured
/// sizes. The implicit root container is not a link; it is represented by
/// `rtt_size`.
#[derive(Debug, Clone)]
pub struct ControlChain<'a> {
    links: SmallVec<[ChainLink<'a>; 8]>,
    rtt_size: Size,
}

impl<'a> ControlChain<'a> {
    /// Build a chain from controls ordered leaf first. Sizes are measured
    /// top-down: top-level controls resolve percentages against `rtt_size`.
    /// Returns `None` for an empty slice.
    pub fn new(controls: &[&'a Control], rtt_size: Size) -> Option<Self> {
        if controls.is_empty() {
            return None;
        }
        let mut links: SmallVec<[ChainLink<'a>; 8]> = SmallVec::with_capacity(controls.len());
        let mut parent_size = rtt_size;
        for &control in controls.iter().rev() {
            let size = Size::new(
                control.width.to_pixels(parent_size.width),
                control.height.to_pixels(parent_size.height),
            );
            links.push(ChainLink {
                control,
                parent_size,
                size,
            });
            parent_size = size;
        }
        links.reverse();
        Some(Self { links, rtt_size })
    }

    pub fn links(&self) -> &[ChainLink<'a>] {
        &self.links
    }

    /// The control this chain was built for.
    pub fn control(&self) -> &'a Control {
        self.links[0].control
    }

    pub fn rtt_size(&self) -> Size {
        self.rtt_size
    }

    /// Local bounds of the leaf control.
    pub fn local_bounds(&self) -> Rect {
        let size = self.links[0].size;
        compute_local_bounds(size.width, size.height)
    }

    /// Pixel geometry of the leaf as a drag-start snapshot.
    pub fn stored_values(&self) -> Rect {
        let link = &self.links[0];
        Rect::from_xywh(link.left_px(), link.top_px(), link.size.width, link.size.height)
    }
}

// ─── Local space ─────────────────────────────────────────────────────────

/// Bounding box of a `width × height` control in its own local space.
pub fn compute_local_bounds(width: f64, height: f64) -> Rect {
    Rect::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0)
}

fn pivot_for(control: &Control, size: Size) -> Vec2 {
    Vec2::new(
        (control.transform_center_x - 0.5) * size.width,
        (control.transform_center_y - 0.5) * size.height,
    )
}

/// Local position of the leaf control's transform center.
pub fn pivot_local(chain: &ControlChain<'_>) -> Point {
    let link = &chain.links[0];
    pivot_for(link.control, link.size).to_point()
}

/// Local → parent transform of the link at `level`. For the leaf
/// (`level == 0`), `stored` replaces the live position and size.
pub fn node_matrix(chain: &ControlChain<'_>, level: usize, stored: Option<&Rect>) -> Affine {
    let link = &chain.links[level];
    let control = link.control;

    let (left, top, size) = match stored {
        Some(s) if level == 0 => (s.left, s.top, Size::new(s.width(), s.height())),
        _ => (link.left_px(), link.top_px(), link.size),
    };

    let free_x = (link.parent_size.width - size.width) / 2.0;
    let free_y = (link.parent_size.height - size.height) / 2.0;
    let offset = Vec2::new(
        left + match control.horizontal_alignment {
            HorizontalAlignment::Left => -free_x,
            HorizontalAlignment::Right => free_x,
            HorizontalAlignment::Center => 0.0,
        },
        top + match control.vertical_alignment {
            VerticalAlignment::Top => -free_y,
            VerticalAlignment::Bottom => free_y,
            VerticalAlignment::Center => 0.0,
        },
    );

    let pivot = pivot_for(control, size);
    Affine::translate(offset + pivot)
        * Affine::rotate(control.rotation)
        * Affine::scale_non_uniform(control.scale_x, control.scale_y)
        * Affine::translate(-pivot)
}

/// Combined transform from the leaf's local space up to (but not including)
/// `ancestor_stop`, or up to the root container's center-origin space.
/// Returns whether the walk stopped at the ancestor.
fn chain_matrix(
    chain: &ControlChain<'_>,
    stored: Option<&Rect>,
    ancestor_stop: Option<ControlId>,
) -> (Affine, bool) {
    let mut acc = Affine::IDENTITY;
    for (level, link) in chain.links.iter().enumerate() {
        if ancestor_stop == Some(link.control.id) {
            return (acc, true);
        }
        acc = node_matrix(chain, level, stored) * acc;
    }
    (acc, false)
}

/// Map a point in the leaf's local space to RTT space.
///
/// With `ancestor_stop`, the walk ends before applying that ancestor's own
/// transform and the result is in the ancestor's local space.
pub fn node_to_rtt_space(
    chain: &ControlChain<'_>,
    point: Point,
    stored: Option<&Rect>,
    ancestor_stop: Option<ControlId>,
) -> Point {
    let (matrix, stopped) = chain_matrix(chain, stored, ancestor_stop);
    let p = matrix * point;
    if stopped {
        p
    } else {
        p + chain.rtt_size.to_vec2() / 2.0
    }
}

/// Inverse of [`node_to_rtt_space`] for the full chain.
pub fn rtt_to_local_node_space(
    chain: &ControlChain<'_>,
    point: Point,
    stored: Option<&Rect>,
) -> Point {
    let (matrix, _) = chain_matrix(chain, stored, None);
    matrix.inverse() * (point - chain.rtt_size.to_vec2() / 2.0)
}

// ─── Canvas space ────────────────────────────────────────────────────────

pub fn rtt_to_canvas_space(viewport: &Viewport, point: Point) -> Point {
    viewport.projection() * point
}

pub fn mouse_pointer_to_rtt_space(viewport: &Viewport, pointer: Point) -> Point {
    viewport.projection().inverse() * pointer
}

// ─── Accumulated transforms ──────────────────────────────────────────────

/// The leaf's own rotation (`local`) or the sum over the whole chain.
pub fn get_rotation(chain: &ControlChain<'_>, local: bool) -> f64 {
    if local {
        return chain.control().rotation;
    }
    chain.links.iter().map(|l| l.control.rotation).sum()
}

/// The leaf's own scale (`local`) or the product over the whole chain.
pub fn get_scale(chain: &ControlChain<'_>, local: bool) -> Vec2 {
    if local {
        let c = chain.control();
        return Vec2::new(c.scale_x, c.scale_y);
    }
    chain.links.iter().fold(Vec2::new(1.0, 1.0), |acc, l| {
        Vec2::new(acc.x * l.control.scale_x, acc.y * l.control.scale_y)
    })
}

// ─── Rounding & units ────────────────────────────────────────────────────

/// Round half up to `1/factor` (`round_to(0.125, 100.0)` → `0.13`).
pub fn round_to(value: f64, factor: f64) -> f64 {
    (value * factor + 0.5).floor() / factor
}

/// Two-decimal rounding used for every committed geometry value.
pub fn round(value: f64) -> f64 {
    round_to(value, 100.0)
}

/// Record of a dimension rewrite, for property-changed notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionChange {
    pub id: ControlId,
    pub property: DimensionProperty,
    pub old: ValueAndUnit,
    pub new: ValueAndUnit,
}

/// Re-express `properties` of `id` as percentages of the parent measure,
/// keeping their pixel values (up to two decimals of a percent).
pub fn convert_to_percentage(
    tree: &mut ControlTree,
    id: ControlId,
    properties: &[DimensionProperty],
) -> Vec<DimensionChange> {
    let Some(parent) = tree.parent_measure(id) else {
        log::warn!("convert_to_percentage: unknown control {id:?}");
        return Vec::new();
    };

    let mut changes = Vec::with_capacity(properties.len());
    for &property in properties {
        let Some(pixels) = tree.in_pixels(id, property) else {
            continue;
        };
        let reference = if property.is_horizontal() {
            parent.width
        } else {
            parent.height
        };
        let percent = round(pixels / reference * 100.0);
        let new = ValueAndUnit::percentage(percent / 100.0);

        if let Some(control) = tree.get_mut(id) {
            let slot = control.dimension_mut(property);
            let old = *slot;
            *slot = new;
            changes.push(DimensionChange {
                id,
                property,
                old,
                new,
            });
        }
    }
    changes
}
