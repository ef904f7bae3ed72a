//! Touch swipe recognition.

use glam::Vec2;

/// Dominant direction of a swipe in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Classify a displacement. Returns None below the threshold.
    /// Ties between axes go to the horizontal axis.
    pub fn classify(delta: Vec2, threshold: f32) -> Option<Self> {
        let (ax, ay) = (delta.x.abs(), delta.y.abs());
        if ax.max(ay) < threshold {
            return None;
        }
        Some(if ax >= ay {
            if delta.x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if delta.y > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        })
    }
}

/// Pairs touch starts with touch ends.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn begin(&mut self, at: Vec2) {
        self.start = Some(at);
    }

    /// Finish the current touch. An end without a start is ignored.
    pub fn end(&mut self, at: Vec2) -> Option<SwipeDirection> {
        let start = self.start.take()?;
        SwipeDirection::classify(at - start, self.threshold)
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_drag_is_not_a_swipe() {
        assert_eq!(SwipeDirection::classify(Vec2::new(20.0, -10.0), 50.0), None);
    }

    #[test]
    fn dominant_axis_wins() {
        assert_eq!(SwipeDirection::classify(Vec2::new(10.0, -80.0), 50.0), Some(SwipeDirection::Up));
        assert_eq!(SwipeDirection::classify(Vec2::new(10.0, 80.0), 50.0), Some(SwipeDirection::Down));
        assert_eq!(SwipeDirection::classify(Vec2::new(-90.0, 30.0), 50.0), Some(SwipeDirection::Left));
        assert_eq!(SwipeDirection::classify(Vec2::new(60.0, 60.0), 50.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn tracker_pairs_start_and_end() {
        let mut t = SwipeTracker::new(50.0);
        assert_eq!(t.end(Vec2::new(0.0, 100.0)), None);
        t.begin(Vec2::new(100.0, 300.0));
        assert_eq!(t.end(Vec2::new(100.0, 200.0)), Some(SwipeDirection::Up));
        // The start is consumed.
        assert_eq!(t.end(Vec2::new(100.0, 100.0)), None);
    }
}
