//! Drawing-surface contract for host backends.
//!
//! The engine never touches pixels. Each host (the browser canvas in
//! `nimbus-web`, [`HeadlessCanvas`](super::headless::HeadlessCanvas) in tests)
//! implements [`Canvas2d`], a small immediate-mode subset of the 2D canvas API.

use std::ops::{Deref, DerefMut};

use crate::api::types::{Color, ImageId};

/// Logical size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Backing-store pixels per logical pixel.
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Font and color for overlay text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    /// CSS font shorthand, e.g. `"16px arial"`.
    pub font: &'a str,
    pub color: Color,
}

/// Immediate-mode 2D drawing surface.
///
/// State-changing calls (`set_brightness`, `translate`, `rotate`,
/// `set_alpha`) persist until the matching `restore`. Prefer
/// [`CanvasScope`] over calling `save`/`restore` by hand.
pub trait Canvas2d {
    /// Match the surface to the host viewport and report its logical size.
    fn resize_to_viewport(&mut self) -> Viewport;

    /// Clear the whole surface.
    fn clear(&mut self);

    fn save(&mut self);

    fn restore(&mut self);

    /// Apply a brightness filter, in percent, to subsequent draws.
    fn set_brightness(&mut self, percent: f32);

    fn translate(&mut self, x: f32, y: f32);

    fn rotate(&mut self, radians: f32);

    /// Set global alpha for subsequent draws.
    fn set_alpha(&mut self, alpha: f32);

    /// Draw a loaded image stretched into the rectangle.
    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, width: f32, height: f32);

    fn fill_rect(&mut self, color: Color, x: f32, y: f32, width: f32, height: f32);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle<'_>);
}

/// Saved draw state, restored when dropped.
pub struct CanvasScope<'c, C: Canvas2d + ?Sized> {
    canvas: &'c mut C,
}

impl<'c, C: Canvas2d + ?Sized> CanvasScope<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl<C: Canvas2d + ?Sized> Deref for CanvasScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas2d + ?Sized> DerefMut for CanvasScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas2d + ?Sized> Drop for CanvasScope<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::headless::{DrawOp, HeadlessCanvas};

    #[test]
    fn scope_restores_on_drop() {
        let mut canvas = HeadlessCanvas::new(Viewport::new(100.0, 100.0));
        {
            let mut scope = CanvasScope::new(&mut canvas);
            scope.set_alpha(0.5);
        }
        assert_eq!(canvas.ops(), &[DrawOp::Save, DrawOp::SetAlpha(0.5), DrawOp::Restore]);
        assert_eq!(canvas.save_depth(), 0);
    }

    #[test]
    fn scope_works_through_trait_objects() {
        let mut canvas = HeadlessCanvas::new(Viewport::new(10.0, 10.0));
        let dynamic: &mut dyn Canvas2d = &mut canvas;
        {
            let mut scope = CanvasScope::new(dynamic);
            scope.rotate(1.0);
        }
        assert_eq!(canvas.save_depth(), 0);
    }

    #[test]
    fn viewport_center() {
        assert_eq!(Viewport::new(800.0, 600.0).center(), glam::Vec2::new(400.0, 300.0));
    }
}
