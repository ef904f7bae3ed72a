use std::fmt;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::behavior::Behavior;
use crate::components::hitbox::{Anchor, Hitbox, HitboxRef};
use crate::components::sprite::Sprite;

/// A positioned sprite with hitboxes and an optional behavior.
///
/// Entities are built by value and handed to [`Registry::spawn`](crate::Registry::spawn),
/// which assigns the id and queues them for the next flush.
pub struct Entity {
    pub(crate) id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Center position in canvas space.
    pub pos: Vec2,
    /// Rotation in direction units (converted to radians by the configured scale).
    pub direction: f32,
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Brightness percentage; 100 draws unfiltered.
    pub brightness: f32,
    /// Uniform scale applied to the sprite and hitboxes.
    pub scale: f32,
    pub sprite: Sprite,
    /// Owned hitboxes, anchored at `pos` and scaled by `scale`.
    pub hitboxes: Vec<Hitbox>,
    /// Reserved collision flag; no engine logic reads it yet.
    pub collision: bool,
    /// Render-enable flag. Invisible entities still update.
    pub visible: bool,
    pub(crate) deleted: bool,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    /// Set when the behavior slot is replaced or cleared, so the engine
    /// does not put back a behavior that swapped itself out mid-update.
    pub(crate) behavior_changed: bool,
}

impl Entity {
    /// New entity at the origin with one hitbox matching the sprite's current frame.
    pub fn new(sprite: Sprite) -> Self {
        let frame = sprite.current();
        let hitbox = Hitbox::new(frame.width(), frame.height());
        Self {
            id: EntityId::UNASSIGNED,
            tag: String::new(),
            pos: Vec2::ZERO,
            direction: 0.0,
            opacity: 1.0,
            brightness: 100.0,
            scale: 1.0,
            sprite,
            hitboxes: vec![hitbox],
            collision: false,
            visible: true,
            deleted: false,
            behavior: None,
            behavior_changed: false,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_direction(mut self, direction: f32) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the default sprite-sized hitbox.
    pub fn with_hitboxes(mut self, hitboxes: Vec<Hitbox>) -> Self {
        self.hitboxes = hitboxes;
        self
    }

    pub fn with_collision(mut self, collision: bool) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Start with rendering disabled.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    // -- Accessors --

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// True once the entity has been deleted. It may still sit in the live
    /// sequence until the next flush, but it is never updated or drawn again.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    /// Attach or replace the per-tick behavior.
    pub fn set_behavior(&mut self, behavior: impl Behavior + 'static) {
        self.behavior = Some(Box::new(behavior));
        self.behavior_changed = true;
    }

    /// Drop the behavior, leaving a render-only entity.
    pub fn clear_behavior(&mut self) {
        self.behavior = None;
        self.behavior_changed = true;
    }

    pub fn add_hitboxes(&mut self, hitboxes: impl IntoIterator<Item = Hitbox>) {
        self.hitboxes.extend(hitboxes);
    }

    pub fn anchor(&self) -> Anchor {
        Anchor {
            pos: self.pos,
            scale: self.scale,
        }
    }

    /// A single hitbox bound to this entity's current anchor.
    pub fn hitbox(&self, index: usize) -> Option<HitboxRef<'_>> {
        let anchor = self.anchor();
        self.hitboxes.get(index).map(|hitbox| HitboxRef { hitbox, anchor })
    }

    /// True if any owned hitbox contains the point.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let anchor = self.anchor();
        self.hitboxes.iter().any(|hb| hb.contains(anchor, point))
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("pos", &self.pos)
            .field("direction", &self.direction)
            .field("opacity", &self.opacity)
            .field("brightness", &self.brightness)
            .field("scale", &self.scale)
            .field("hitboxes", &self.hitboxes.len())
            .field("visible", &self.visible)
            .field("deleted", &self.deleted)
            .field("behavior", &self.behavior.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Color;
    use crate::components::sprite::SolidColor;

    fn square(size: f32) -> Sprite {
        Sprite::new(SolidColor::new(Color::WHITE, size, size))
    }

    #[test]
    fn defaults_match_engine_conventions() {
        let e = Entity::new(square(10.0));
        assert_eq!(e.pos, Vec2::ZERO);
        assert_eq!(e.opacity, 1.0);
        assert_eq!(e.brightness, 100.0);
        assert_eq!(e.scale, 1.0);
        assert!(e.visible);
        assert!(!e.collision);
        assert!(!e.is_deleted());
        assert!(!e.has_behavior());
    }

    #[test]
    fn default_hitbox_matches_initial_frame() {
        let e = Entity::new(Sprite::new(SolidColor::new(Color::BLACK, 28.0, 31.0)));
        assert_eq!(e.hitboxes, vec![Hitbox::new(28.0, 31.0)]);
    }

    #[test]
    fn explicit_hitboxes_replace_default() {
        let e = Entity::new(square(10.0))
            .with_hitboxes(vec![Hitbox::new(2.0, 2.0), Hitbox::new(4.0, 4.0)]);
        assert_eq!(e.hitboxes.len(), 2);
        assert_eq!(e.hitboxes[0].width, 2.0);
    }

    #[test]
    fn contains_point_checks_every_hitbox() {
        let e = Entity::new(square(10.0))
            .with_pos(Vec2::new(50.0, 50.0))
            .with_hitboxes(vec![
                Hitbox::new(2.0, 2.0),
                Hitbox::new(2.0, 2.0).with_offset(Vec2::new(40.0, 0.0)),
            ]);
        assert!(e.contains_point(Vec2::new(50.5, 50.0)));
        assert!(e.contains_point(Vec2::new(70.5, 50.0)));
        assert!(!e.contains_point(Vec2::new(60.0, 50.0)));
    }

    #[test]
    fn hitbox_ref_follows_scale() {
        let e = Entity::new(square(10.0)).with_scale(0.5);
        let hb = e.hitbox(0).unwrap();
        assert!(hb.contains(Vec2::new(2.0, 2.0)));
        assert!(!hb.contains(Vec2::new(3.0, 0.0)));
        assert!(e.hitbox(1).is_none());
    }
}
