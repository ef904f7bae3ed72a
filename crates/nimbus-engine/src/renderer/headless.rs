//! A [`Canvas2d`] that records operations instead of drawing.
//!
//! Useful for running scenes without a browser and for asserting exact draw
//! order in tests.

use crate::api::types::{Color, ImageId};
use crate::renderer::canvas::{Canvas2d, TextStyle, Viewport};

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize(Viewport),
    Clear,
    Save,
    Restore,
    Brightness(f32),
    Translate(f32, f32),
    Rotate(f32),
    SetAlpha(f32),
    Image { image: ImageId, x: f32, y: f32, width: f32, height: f32 },
    Rect { color: Color, x: f32, y: f32, width: f32, height: f32 },
    Text { text: String, x: f32, y: f32 },
}

impl DrawOp {
    /// True for calls that put pixels on the surface.
    pub fn is_draw(&self) -> bool {
        matches!(self, DrawOp::Image { .. } | DrawOp::Rect { .. } | DrawOp::Text { .. })
    }
}

/// Recording canvas with a fixed viewport.
#[derive(Debug, Clone)]
pub struct HeadlessCanvas {
    viewport: Viewport,
    ops: Vec<DrawOp>,
    depth: usize,
}

impl HeadlessCanvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ops: Vec::new(),
            depth: 0,
        }
    }

    /// Change the size reported at the next resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Take the recorded operations, leaving the log empty.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Recorded pixel-producing calls only.
    pub fn draws(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| op.is_draw())
    }

    /// Unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.depth
    }
}

impl Default for HeadlessCanvas {
    fn default() -> Self {
        Self::new(Viewport::new(800.0, 600.0))
    }
}

impl Canvas2d for HeadlessCanvas {
    fn resize_to_viewport(&mut self) -> Viewport {
        self.ops.push(DrawOp::Resize(self.viewport));
        self.viewport
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => log::warn!("headless canvas: restore without save"),
        }
        self.ops.push(DrawOp::Restore);
    }

    fn set_brightness(&mut self, percent: f32) {
        self.ops.push(DrawOp::Brightness(percent));
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.ops.push(DrawOp::Rotate(radians));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::SetAlpha(alpha));
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Image { image, x, y, width, height });
    }

    fn fill_rect(&mut self, color: Color, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Rect { color, x, y, width, height });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, _style: TextStyle<'_>) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut canvas = HeadlessCanvas::new(Viewport::new(320.0, 240.0));
        assert_eq!(canvas.resize_to_viewport(), Viewport::new(320.0, 240.0));
        canvas.clear();
        canvas.fill_rect(Color::WHITE, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(canvas.ops().len(), 3);
        assert_eq!(canvas.draws().count(), 1);
        assert_eq!(canvas.take_ops().len(), 3);
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn unbalanced_restore_does_not_underflow() {
        let mut canvas = HeadlessCanvas::default();
        canvas.restore();
        assert_eq!(canvas.save_depth(), 0);
    }
}
