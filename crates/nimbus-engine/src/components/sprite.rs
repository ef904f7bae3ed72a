use crate::api::types::{Color, ImageId};

/// A loaded bitmap frame with its (possibly overridden) display size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFrame {
    pub image: ImageId,
    pub width: f32,
    pub height: f32,
}

/// A flat-color rectangle frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    pub color: Color,
    pub width: f32,
    pub height: f32,
}

impl SolidColor {
    pub fn new(color: Color, width: f32, height: f32) -> Self {
        Self { color, width, height }
    }
}

/// One visual frame of a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Image(ImageFrame),
    Solid(SolidColor),
}

impl Frame {
    pub fn width(&self) -> f32 {
        match self {
            Frame::Image(img) => img.width,
            Frame::Solid(solid) => solid.width,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            Frame::Image(img) => img.height,
            Frame::Solid(solid) => solid.height,
        }
    }

    /// Resize the frame in place (e.g. a backdrop that tracks the viewport).
    pub fn set_size(&mut self, width: f32, height: f32) {
        match self {
            Frame::Image(img) => {
                img.width = width;
                img.height = height;
            }
            Frame::Solid(solid) => {
                solid.width = width;
                solid.height = height;
            }
        }
    }
}

impl From<ImageFrame> for Frame {
    fn from(frame: ImageFrame) -> Self {
        Frame::Image(frame)
    }
}

impl From<SolidColor> for Frame {
    fn from(frame: SolidColor) -> Self {
        Frame::Solid(frame)
    }
}

/// An ordered list of frames plus the index of the one on screen.
///
/// Always holds at least one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    frames: Vec<Frame>,
    current: usize,
}

impl Sprite {
    /// Single-frame sprite.
    pub fn new(frame: impl Into<Frame>) -> Self {
        Self {
            frames: vec![frame.into()],
            current: 0,
        }
    }

    /// Multi-frame sprite. Returns None for an empty frame list.
    pub fn from_frames(frames: Vec<Frame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self { frames, current: 0 })
    }

    pub fn current(&self) -> &Frame {
        &self.frames[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Select the frame to display. Out-of-range indices are ignored.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.frames.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: f32, h: f32) -> Frame {
        SolidColor::new(Color::WHITE, w, h).into()
    }

    #[test]
    fn empty_frame_list_is_rejected() {
        assert!(Sprite::from_frames(Vec::new()).is_none());
    }

    #[test]
    fn set_current_ignores_out_of_range() {
        let mut sprite = Sprite::from_frames(vec![solid(1.0, 1.0), solid(2.0, 2.0)]).unwrap();
        assert!(sprite.set_current(1));
        assert_eq!(sprite.current().width(), 2.0);
        assert!(!sprite.set_current(5));
        assert_eq!(sprite.current_index(), 1);
    }

    #[test]
    fn resize_current_frame() {
        let mut sprite = Sprite::new(solid(10.0, 20.0));
        sprite.current_mut().set_size(800.0, 600.0);
        assert_eq!(sprite.current().width(), 800.0);
        assert_eq!(sprite.current().height(), 600.0);
    }
}
