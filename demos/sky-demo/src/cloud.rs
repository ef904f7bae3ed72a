use glam::Vec2;
use nimbus_engine::{Behavior, Entity, QueryKind, Sprite, UpdateContext};

use crate::rng::Rng;

pub const CLOUD_TAG: &str = "cloud";
/// Clouds re-tagged with this shrink away and delete themselves.
pub const ERASING_TAG: &str = "cloud-erasing";

/// Opacity of a full-size cloud.
const BASE_OPACITY: f32 = 0.85;
/// Direction units per millisecond.
const SPIN_RATE: f32 = 1.8;

/// Grows in after an optional delay, spins, and shrinks away once erased.
pub struct Cloud {
    clockwise: f32,
    /// Milliseconds before the cloud appears.
    delay: f32,
    erasing: bool,
}

impl Cloud {
    pub fn spawn_entity(sprite: Sprite, pos: Vec2, delay: f32, rng: &mut Rng) -> Entity {
        let scale = rng.range(10, 60) as f32 / 100.0;
        let cloud = Cloud {
            clockwise: if rng.chance(0.5) { 1.0 } else { -1.0 },
            delay,
            erasing: false,
        };
        Entity::new(sprite)
            .with_tag(CLOUD_TAG)
            .with_pos(pos)
            .with_scale(scale)
            .with_opacity(scale * BASE_OPACITY)
            .with_behavior(cloud)
    }
}

impl Behavior for Cloud {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let delta = ctx.delta();
        if self.delay > 0.0 {
            ctx.entity().opacity = 0.0;
            self.delay -= delta.round();
            return;
        }

        if ctx.entity_ref().tag == ERASING_TAG {
            self.erasing = true;
        }

        if !self.erasing {
            let entity = ctx.entity();
            if entity.scale < 0.99 {
                entity.scale += 0.05 * (1.0 - entity.scale) * delta / 6.9;
                entity.opacity = entity.scale * BASE_OPACITY;
            } else {
                entity.scale = 1.0;
                if ctx.pointer(QueryKind::SecondaryPointerDown) {
                    self.erasing = true;
                }
            }
        } else {
            let entity = ctx.entity();
            if entity.scale > 0.1 {
                entity.scale = (entity.scale - 0.05 * entity.scale * delta / 6.9).max(0.0);
                entity.opacity = entity.scale * BASE_OPACITY;
            } else {
                ctx.delete_self();
                return;
            }
        }

        ctx.entity().direction += SPIN_RATE * self.clockwise * delta;
    }
}
