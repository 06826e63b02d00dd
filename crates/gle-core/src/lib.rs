pub mod color;
pub mod coords;
pub mod id;
pub mod model;
pub mod rect;
pub mod scale_point;
pub mod viewport;

pub use color::{Color, ColorParseError};
pub use coords::{ChainLink, ControlChain, DimensionChange};
pub use id::ControlId;
pub use model::*;
pub use rect::{Edge, Rect};
pub use scale_point::{
    DEFAULT_ROTATIONS, HorizontalPosition, PIVOT_INDEX, SCALE_POINT_COUNT, ScalePoint,
    VerticalPosition, scale_point_grid,
};
pub use viewport::Viewport;

// Re-export geometry types so downstream crates don't need a direct dependency
pub use kurbo::{Affine, Point, Size, Vec2};
pub use petgraph::graph::NodeIndex;
