//! Widget-pixel to image-space conversion.
//!
//! The image is drawn scaled by `scale` and, on any axis where the scaled
//! image is smaller than the viewport, centered. Every pointer position that
//! reaches the canvas goes through [`ViewTransform::to_image_space`] first.

use egui::{Pos2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Zoom factor; 1.0 draws one image pixel per widget pixel.
    pub scale: f32,
    /// Size of the widget the image is drawn into.
    pub viewport: Vec2,
    /// Size of the loaded image in pixels.
    pub image_size: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { scale: 1.0, viewport: Vec2::ZERO, image_size: Vec2::ZERO }
    }
}

impl ViewTransform {
    /// Image-space offset that centers the image inside the viewport.
    /// Zero on any axis where the scaled image does not fit.
    pub fn offset_to_center(&self) -> Vec2 {
        let s = self.scale;
        let scaled = self.image_size * s;
        let x = if self.viewport.x > scaled.x { (self.viewport.x - scaled.x) / (2.0 * s) } else { 0.0 };
        let y = if self.viewport.y > scaled.y { (self.viewport.y - scaled.y) / (2.0 * s) } else { 0.0 };
        Vec2::new(x, y)
    }

    pub fn to_image_space(&self, widget: Pos2) -> Pos2 {
        (widget.to_vec2() / self.scale - self.offset_to_center()).to_pos2()
    }

    pub fn to_widget_space(&self, image: Pos2) -> Pos2 {
        ((image.to_vec2() + self.offset_to_center()) * self.scale).to_pos2()
    }

    /// Widget size needed to show the whole image at the current zoom.
    pub fn minimum_size(&self) -> Vec2 {
        self.image_size * self.scale
    }
}
