//! Gizmo tuning knobs, loadable from JSON.

use gle_render::HandleLayout;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Smallest width/height a drag can shrink a control to, in local units.
    pub min_edge_size: f64,
    /// Committed geometry is rounded to `1 / round_factor` pixels.
    pub round_factor: f64,
    /// Pointer-button bit that keeps a gesture alive on pointer-up.
    pub primary_button_mask: u32,
    pub handles: HandleLayout,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            min_edge_size: 1.0,
            round_factor: 100.0,
            primary_button_mask: 1,
            handles: HandleLayout::default(),
        }
    }
}

impl GizmoConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
