//! Axis-aligned rectangle used both as a geometry primitive and as the
//! "last known" bounds snapshot of a control during a gesture.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One side of a [`Rect`]. The order matters: gizmo edge remapping
/// rotates through `[Left, Top, Right, Bottom]` in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    pub fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Top => 1,
            Edge::Right => 2,
            Edge::Bottom => 3,
        }
    }

    /// Edge at `index % 4` in quarter-turn order.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// `Left`/`Top` are the "leading" edges, `Right`/`Bottom` the trailing ones.
    pub fn is_leading(self) -> bool {
        self.index() < 2
    }
}

/// `{left, top, right, bottom}` in some coordinate space.
///
/// `right >= left` and `bottom >= top` are intended but only enforced by
/// [`Rect::clamp_against`] during drags.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and a size (pixel geometry snapshots).
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// An inverted rectangle ready to grow with [`Rect::include_point`].
    pub const fn accumulator() -> Self {
        Self::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn edge_mut(&mut self, edge: Edge) -> &mut f64 {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        }
    }

    /// Grow the rectangle so it contains `p`.
    pub fn include_point(&mut self, p: Point) {
        self.left = self.left.min(p.x);
        self.right = self.right.max(p.x);
        self.top = self.top.min(p.y);
        self.bottom = self.bottom.max(p.y);
    }

    /// Keep each edge at least `min_size` away from the opposite edge of
    /// `reference`, so a drag can never invert or collapse the box.
    pub fn clamp_against(&self, reference: &Rect, min_size: f64) -> Rect {
        Rect {
            left: self.left.min(reference.right - min_size),
            top: self.top.min(reference.bottom - min_size),
            right: self.right.max(reference.left + min_size),
            bottom: self.bottom.max(reference.top + min_size),
        }
    }
}
