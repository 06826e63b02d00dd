//! GUI control model.
//!
//! Controls live in a [`ControlTree`] arena owned by the host; editors only
//! ever hold [`ControlId`]s. Each dimension is stored as a value plus a unit
//! (pixels or a fraction of the parent measure) and resolved to pixels on
//! demand through the ancestor chain.

use crate::coords::ControlChain;
use crate::id::ControlId;
use kurbo::Size;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Units ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    Pixel,
    /// Fraction of the parent measure (`0.5` is `"50%"`).
    Percentage,
}

/// A layout dimension: `value` is pixels or a parent fraction depending on `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAndUnit {
    pub value: f64,
    pub unit: Unit,
}

impl ValueAndUnit {
    pub const fn pixels(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Pixel,
        }
    }

    /// `fraction` of the parent measure: `percentage(0.25)` is `"25%"`.
    pub const fn percentage(fraction: f64) -> Self {
        Self {
            value: fraction,
            unit: Unit::Percentage,
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.unit == Unit::Percentage
    }

    /// Resolve to pixels against the parent measure along the same axis.
    pub fn to_pixels(&self, reference: f64) -> f64 {
        match self.unit {
            Unit::Pixel => self.value,
            Unit::Percentage => self.value * reference,
        }
    }
}

impl std::fmt::Display for ValueAndUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Unit::Pixel => write!(f, "{}px", self.value),
            Unit::Percentage => write!(f, "{}%", self.value * 100.0),
        }
    }
}

// ─── Alignment ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    Right,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Bottom,
    #[default]
    Center,
}

/// The four pixel-geometry properties the gizmo writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionProperty {
    Left,
    Top,
    Width,
    Height,
}

impl DimensionProperty {
    pub const ALL: [DimensionProperty; 4] = [
        DimensionProperty::Left,
        DimensionProperty::Top,
        DimensionProperty::Width,
        DimensionProperty::Height,
    ];

    /// Property name as shown in the property grid.
    pub fn name(self) -> &'static str {
        match self {
            DimensionProperty::Left => "left",
            DimensionProperty::Top => "top",
            DimensionProperty::Width => "width",
            DimensionProperty::Height => "height",
        }
    }

    /// Name of the pixel accessor (`leftInPixels`, ...).
    pub fn pixel_name(self) -> &'static str {
        match self {
            DimensionProperty::Left => "leftInPixels",
            DimensionProperty::Top => "topInPixels",
            DimensionProperty::Width => "widthInPixels",
            DimensionProperty::Height => "heightInPixels",
        }
    }

    /// `left` and `width` resolve against the parent width, the others
    /// against the parent height.
    pub fn is_horizontal(self) -> bool {
        matches!(self, DimensionProperty::Left | DimensionProperty::Width)
    }
}

// ─── Controls ────────────────────────────────────────────────────────────

/// Built-in control types. Only the variants with auto-fit behavior carry data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlKind {
    /// The implicit root filling the render target.
    Root,
    Container,
    Rectangle,
    Button,
    /// Scales its size to the source image while `auto_scale` is set.
    Image { auto_scale: bool },
    /// Sizes itself to its text while `resize_to_fit` is set.
    TextBlock { text: String, resize_to_fit: bool },
}

impl ControlKind {
    /// Type-name discriminator, as the layout engine reports it.
    pub fn type_name(&self) -> &'static str {
        match self {
            ControlKind::Root => "AdvancedDynamicTexture",
            ControlKind::Container => "Container",
            ControlKind::Rectangle => "Rectangle",
            ControlKind::Button => "Button",
            ControlKind::Image { .. } => "Image",
            ControlKind::TextBlock { .. } => "TextBlock",
        }
    }

    /// Turn off any behavior that would override an explicit size.
    /// Returns `true` if something was switched off.
    pub fn disable_auto_fit(&mut self) -> bool {
        match self {
            ControlKind::Image { auto_scale } if *auto_scale => {
                *auto_scale = false;
                true
            }
            ControlKind::TextBlock { resize_to_fit, .. } if *resize_to_fit => {
                *resize_to_fit = false;
                true
            }
            _ => false,
        }
    }
}

/// A single GUI control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub id: ControlId,
    pub kind: ControlKind,

    pub left: ValueAndUnit,
    pub top: ValueAndUnit,
    pub width: ValueAndUnit,
    pub height: ValueAndUnit,

    /// Radians, clockwise on screen.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,

    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,

    /// Pivot as a fraction of the control's own size (0.5 = center).
    pub transform_center_x: f64,
    pub transform_center_y: f64,

    /// Foreground CSS color.
    pub color: String,
    /// Background CSS color.
    pub background: String,
}

impl Control {
    /// A control filling its parent, centered, unrotated.
    pub fn new(id: ControlId, kind: ControlKind) -> Self {
        Self {
            id,
            kind,
            left: ValueAndUnit::pixels(0.0),
            top: ValueAndUnit::pixels(0.0),
            width: ValueAndUnit::percentage(1.0),
            height: ValueAndUnit::percentage(1.0),
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            horizontal_alignment: HorizontalAlignment::Center,
            vertical_alignment: VerticalAlignment::Center,
            transform_center_x: 0.5,
            transform_center_y: 0.5,
            color: String::new(),
            background: String::new(),
        }
    }

    pub fn with_position(mut self, left: ValueAndUnit, top: ValueAndUnit) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_size(mut self, width: ValueAndUnit, height: ValueAndUnit) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn with_transform_center(mut self, x: f64, y: f64) -> Self {
        self.transform_center_x = x;
        self.transform_center_y = y;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn dimension(&self, property: DimensionProperty) -> ValueAndUnit {
        match property {
            DimensionProperty::Left => self.left,
            DimensionProperty::Top => self.top,
            DimensionProperty::Width => self.width,
            DimensionProperty::Height => self.height,
        }
    }

    pub fn dimension_mut(&mut self, property: DimensionProperty) -> &mut ValueAndUnit {
        match property {
            DimensionProperty::Left => &mut self.left,
            DimensionProperty::Top => &mut self.top,
            DimensionProperty::Width => &mut self.width,
            DimensionProperty::Height => &mut self.height,
        }
    }

    /// Read a string-valued property by its property-grid name.
    pub fn string_property(&self, name: &str) -> Option<&str> {
        match name {
            "color" => Some(&self.color),
            "background" => Some(&self.background),
            _ => None,
        }
    }

    /// Write a string-valued property. Returns `false` for unknown names.
    pub fn set_string_property(&mut self, name: &str, value: &str) -> bool {
        match name {
            "color" => self.color = value.to_string(),
            "background" => self.background = value.to_string(),
            _ => return false,
        }
        true
    }
}

// ─── Control tree ────────────────────────────────────────────────────────

/// The GUI texture's control hierarchy.
///
/// Edges go from parent → child. The root container always fills the
/// render target (`rtt_size`), so top-level controls measure against it.
#[derive(Debug, Clone)]
pub struct ControlTree {
    pub graph: StableDiGraph<Control, ()>,
    pub root: NodeIndex,
    /// Index from ControlId → NodeIndex for fast lookup.
    pub id_index: HashMap<ControlId, NodeIndex>,
    /// Size of the render target (GUI texture) in pixels.
    pub rtt_size: Size,
}

impl ControlTree {
    #[must_use]
    pub fn new(rtt_size: Size) -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = ControlId::intern("root");
        let root = graph.add_node(Control::new(root_id, ControlKind::Root));

        let mut id_index = HashMap::new();
        id_index.insert(root_id, root);

        Self {
            graph,
            root,
            id_index,
            rtt_size,
        }
    }

    /// Add a control as a child of `parent`. Returns the new control's index.
    pub fn add_control(&mut self, parent: NodeIndex, control: Control) -> NodeIndex {
        let id = control.id;
        let idx = self.graph.add_node(control);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    pub fn index_of(&self, id: ControlId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Ancestors of `id`, starting with the control itself and stopping
    /// before the root container.
    pub fn ancestors(&self, id: ControlId) -> SmallVec<[&Control; 8]> {
        let mut out = SmallVec::new();
        let mut current = self.index_of(id);
        while let Some(idx) = current {
            if idx == self.root {
                break;
            }
            out.push(&self.graph[idx]);
            current = self.parent(idx);
        }
        out
    }

    /// Explicit ancestor chain for coordinate math, or `None` for unknown
    /// ids and the root itself.
    pub fn chain(&self, id: ControlId) -> Option<ControlChain<'_>> {
        ControlChain::new(&self.ancestors(id), self.rtt_size)
    }

    /// Measured size of the parent of `id` (the render target for top-level controls).
    pub fn parent_measure(&self, id: ControlId) -> Option<Size> {
        self.chain(id).map(|chain| chain.links()[0].parent_size)
    }

    /// Current pixel value of a dimension property.
    pub fn in_pixels(&self, id: ControlId, property: DimensionProperty) -> Option<f64> {
        let parent = self.parent_measure(id)?;
        let reference = if property.is_horizontal() {
            parent.width
        } else {
            parent.height
        };
        self.get(id)
            .map(|c| c.dimension(property).to_pixels(reference))
    }

    /// Store a dimension as pixels (switching its unit), returning the old
    /// pixel value. Returns `None` when nothing was written: unknown control
    /// or a NaN value.
    pub fn set_in_pixels(
        &mut self,
        id: ControlId,
        property: DimensionProperty,
        pixels: f64,
    ) -> Option<f64> {
        if pixels.is_nan() {
            return None;
        }
        let old = self.in_pixels(id, property)?;
        let control = self.get_mut(id)?;
        *control.dimension_mut(property) = ValueAndUnit::pixels(pixels);
        Some(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_panel() -> (ControlTree, ControlId, ControlId) {
        let mut tree = ControlTree::new(Size::new(1000.0, 500.0));
        let panel = ControlId::intern("model_panel");
        let child = ControlId::intern("model_child");
        let panel_idx = tree.add_control(
            tree.root,
            Control::new(panel, ControlKind::Container).with_size(
                ValueAndUnit::percentage(0.5),
                ValueAndUnit::pixels(200.0),
            ),
        );
        tree.add_control(
            panel_idx,
            Control::new(child, ControlKind::Rectangle).with_size(
                ValueAndUnit::percentage(0.25),
                ValueAndUnit::percentage(0.5),
            ),
        );
        (tree, panel, child)
    }

    #[test]
    fn percentages_resolve_through_parents() {
        let (tree, panel, child) = tree_with_panel();
        assert_eq!(tree.in_pixels(panel, DimensionProperty::Width), Some(500.0));
        assert_eq!(tree.in_pixels(child, DimensionProperty::Width), Some(125.0));
        assert_eq!(tree.in_pixels(child, DimensionProperty::Height), Some(100.0));
        assert_eq!(tree.parent_measure(child), Some(Size::new(500.0, 200.0)));
    }

    #[test]
    fn set_in_pixels_switches_unit_and_reports_old_value() {
        let (mut tree, _, child) = tree_with_panel();
        let old = tree.set_in_pixels(child, DimensionProperty::Width, 80.0);
        assert_eq!(old, Some(125.0));
        let control = tree.get(child).unwrap();
        assert_eq!(control.width, ValueAndUnit::pixels(80.0));
    }

    #[test]
    fn set_in_pixels_ignores_nan() {
        let (mut tree, _, child) = tree_with_panel();
        assert_eq!(tree.set_in_pixels(child, DimensionProperty::Width, f64::NAN), None);
        assert_eq!(tree.get(child).unwrap().width, ValueAndUnit::percentage(0.25));
        assert_eq!(
            tree.set_in_pixels(ControlId::intern("model_gone"), DimensionProperty::Left, 1.0),
            None
        );
    }

    #[test]
    fn ancestors_stop_before_root() {
        let (tree, panel, child) = tree_with_panel();
        let chain: Vec<ControlId> = tree.ancestors(child).iter().map(|c| c.id).collect();
        assert_eq!(chain, vec![child, panel]);
        assert!(tree.chain(ControlId::intern("root")).is_none());
        assert!(tree.chain(ControlId::intern("model_missing")).is_none());
    }

    #[test]
    fn auto_fit_is_disabled_once() {
        let mut kind = ControlKind::TextBlock {
            text: "Hello".into(),
            resize_to_fit: true,
        };
        assert!(kind.disable_auto_fit());
        assert!(!kind.disable_auto_fit());
        assert_eq!(kind.type_name(), "TextBlock");

        let mut image = ControlKind::Image { auto_scale: true };
        assert!(image.disable_auto_fit());
        assert_eq!(image, ControlKind::Image { auto_scale: false });
    }

    #[test]
    fn string_properties_by_name() {
        let mut control = Control::new(ControlId::intern("model_label"), ControlKind::Button);
        assert!(control.set_string_property("background", "#336699"));
        assert_eq!(control.string_property("background"), Some("#336699"));
        assert!(!control.set_string_property("opacity", "1"));
    }

    #[test]
    fn value_and_unit_display() {
        assert_eq!(ValueAndUnit::pixels(12.5).to_string(), "12.5px");
        assert_eq!(ValueAndUnit::percentage(0.25).to_string(), "25%");
    }
}
