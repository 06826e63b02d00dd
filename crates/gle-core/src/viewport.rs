//! Camera/viewport projection from render-target pixels to canvas pixels.

use kurbo::{Affine, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Where the GUI render target sits on the editor canvas.
///
/// The render target is centered on the canvas, then panned and zoomed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub rtt_size: Size,
    pub canvas_size: Size,
    pub pan: Vec2,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(rtt_size: Size, canvas_size: Size) -> Self {
        Self {
            rtt_size,
            canvas_size,
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// RTT → canvas transform.
    pub fn projection(&self) -> Affine {
        Affine::translate(self.canvas_size.to_vec2() / 2.0 + self.pan)
            * Affine::scale(self.zoom)
            * Affine::translate(-self.rtt_size.to_vec2() / 2.0)
    }

    /// Zoom by `factor`, keeping the canvas point `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: kurbo::Point, factor: f64) {
        let center = self.canvas_size.to_vec2() / 2.0 + self.pan;
        let from_anchor = center - anchor.to_vec2();
        self.pan += from_anchor * (factor - 1.0);
        self.zoom *= factor;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(1920.0, 1080.0), Size::new(1920.0, 1080.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn identity_when_sizes_match() {
        let vp = Viewport::new(Size::new(800.0, 600.0), Size::new(800.0, 600.0));
        assert_eq!(vp.projection() * Point::new(10.0, 20.0), Point::new(10.0, 20.0));
    }

    #[test]
    fn rtt_is_centered_on_larger_canvas() {
        let vp = Viewport::new(Size::new(100.0, 100.0), Size::new(300.0, 200.0));
        assert_eq!(vp.projection() * Point::ZERO, Point::new(100.0, 50.0));
    }

    #[test]
    fn zoom_at_keeps_anchor_fixed() {
        let mut vp = Viewport::new(Size::new(400.0, 400.0), Size::new(400.0, 400.0));
        let anchor = Point::new(100.0, 300.0);
        let rtt_under_anchor = vp.projection().inverse() * anchor;
        vp.zoom_at(anchor, 2.0);
        let after = vp.projection() * rtt_under_anchor;
        assert!((after.x - anchor.x).abs() < 0.01);
        assert!((after.y - anchor.y).abs() < 0.01);
    }
}
