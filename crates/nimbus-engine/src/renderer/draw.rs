use crate::components::entity::Entity;
use crate::components::sprite::Frame;
use crate::renderer::canvas::{Canvas2d, CanvasScope};

/// Brightness at which no filter is applied.
pub const NEUTRAL_BRIGHTNESS: f32 = 100.0;

/// Draw one entity's current frame centered on its position.
///
/// Brightness, rotation and alpha are applied inside a saved scope and
/// restored before returning, so nothing leaks into the next entity.
/// Rotation is `direction * rotation_scale` radians about the entity center.
/// Invisible entities draw nothing.
pub fn draw_entity<C: Canvas2d + ?Sized>(canvas: &mut C, entity: &Entity, rotation_scale: f32) {
    if !entity.visible {
        return;
    }

    let frame = *entity.sprite.current();
    let (x, y) = (entity.pos.x, entity.pos.y);
    let width = frame.width() * entity.scale;
    let height = frame.height() * entity.scale;

    let mut scope = CanvasScope::new(canvas);
    if entity.brightness != NEUTRAL_BRIGHTNESS {
        scope.set_brightness(entity.brightness);
    }
    scope.translate(x, y);
    scope.rotate(entity.direction * rotation_scale);
    scope.set_alpha(entity.opacity);
    scope.translate(-x, -y);

    let (left, top) = (x - width / 2.0, y - height / 2.0);
    match frame {
        Frame::Image(img) => scope.draw_image(img.image, left, top, width, height),
        Frame::Solid(solid) => scope.fill_rect(solid.color, left, top, width, height),
    }
}
