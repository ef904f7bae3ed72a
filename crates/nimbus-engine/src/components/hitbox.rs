use glam::Vec2;

/// Where a hitbox is anchored at test time: the owning entity's center and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub pos: Vec2,
    pub scale: f32,
}

/// Axis-aligned rectangle used for pointer hit-testing, owned by an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
    /// Offset from the owner's center, in unscaled units.
    pub offset: Vec2,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Open-interval containment: points exactly on an edge are outside.
    ///
    /// Extents and offset are both scaled by the anchor's scale; the offset
    /// contributes half of its scaled length.
    pub fn contains(&self, anchor: Anchor, point: Vec2) -> bool {
        let half = Vec2::new(self.width, self.height) * anchor.scale / 2.0;
        let shift = self.offset * anchor.scale / 2.0;
        let min = anchor.pos - half + shift;
        let max = anchor.pos + half + shift;
        point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
    }
}

/// A hitbox paired with its owner's anchor, usable as a standalone query target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitboxRef<'a> {
    pub hitbox: &'a Hitbox,
    pub anchor: Anchor,
}

impl HitboxRef<'_> {
    pub fn contains(&self, point: Vec2) -> bool {
        self.hitbox.contains(self.anchor, point)
    }
}
