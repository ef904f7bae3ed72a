use std::collections::HashSet;

use glam::Vec2;

use crate::input::events::{InputEvent, PointerButton};
use crate::input::gesture::{SwipeDirection, SwipeTracker};
use crate::input::query::{QueryKind, Target};

/// Input sampler.
///
/// Device events update it as they arrive ([`apply`](Self::apply)); scene and
/// entity logic query it during the tick; the engine calls
/// [`reset`](Self::reset) once at the end of every tick, which clears only the
/// one-shot state (click, just-pressed keys, swipes).
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// None until the first pointer move.
    pointer: Option<Vec2>,
    pointer_down: bool,
    secondary_down: bool,
    clicked: bool,
    keys_down: HashSet<String>,
    keys_pressed: HashSet<String>,
    swipe: SwipeTracker,
    swipes: Vec<SwipeDirection>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_swipe_threshold(threshold: f32) -> Self {
        Self {
            swipe: SwipeTracker::new(threshold),
            ..Self::default()
        }
    }

    /// Fold one device event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(*x, *y)),
            InputEvent::PointerDown { button } => self.set_button(*button, true),
            InputEvent::PointerUp { button } => self.set_button(*button, false),
            InputEvent::Click => self.clicked = true,
            InputEvent::KeyDown { key } => {
                // Only the down-edge counts as a press; auto-repeat does not.
                if !self.keys_down.contains(key) {
                    self.keys_pressed.insert(key.clone());
                    self.keys_down.insert(key.clone());
                }
            }
            InputEvent::KeyUp { key } => {
                self.keys_down.remove(key);
            }
            InputEvent::TouchStart { x, y } => self.swipe.begin(Vec2::new(*x, *y)),
            InputEvent::TouchEnd { x, y } => {
                if let Some(dir) = self.swipe.end(Vec2::new(*x, *y)) {
                    self.swipes.push(dir);
                }
            }
        }
    }

    fn set_button(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Primary => self.pointer_down = down,
            PointerButton::Secondary => self.secondary_down = down,
        }
    }

    /// Clear one-shot state. Held buttons and keys survive.
    pub fn reset(&mut self) {
        self.clicked = false;
        self.keys_pressed.clear();
        self.swipes.clear();
    }

    // -- Raw state --

    /// Last known pointer position, if the pointer has moved at all.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn is_secondary_down(&self) -> bool {
        self.secondary_down
    }

    pub fn clicked(&self) -> bool {
        self.clicked
    }

    pub fn key_held(&self, key: &str) -> bool {
        self.keys_down.contains(key)
    }

    pub fn key_just_pressed(&self, key: &str) -> bool {
        self.keys_pressed.contains(key)
    }

    pub fn key_released(&self, key: &str) -> bool {
        !self.keys_down.contains(key)
    }

    /// True during the tick a swipe in this direction completed.
    pub fn swiped(&self, direction: SwipeDirection) -> bool {
        self.swipes.contains(&direction)
    }

    // -- Queries --

    /// Test a query against a target.
    ///
    /// Pointer kinds need a region target (`Anywhere`, an entity, or a
    /// hitbox); keyboard kinds need a `Key`. A mismatched target is reported
    /// and answers false.
    pub fn query(&self, kind: QueryKind, target: Target<'_>) -> bool {
        if kind.is_pointer() {
            let level = match kind {
                QueryKind::PointerDown => self.pointer_down,
                QueryKind::SecondaryPointerDown => self.secondary_down,
                QueryKind::Click => self.clicked,
                _ => true,
            };
            return level && self.hits(kind, target);
        }

        let Target::Key(key) = target else {
            log::error!("input query `{}` needs a key target", kind);
            return false;
        };
        match kind {
            QueryKind::KeyHeld => self.key_held(key),
            QueryKind::KeyJustPressed => self.key_just_pressed(key),
            _ => self.key_released(key),
        }
    }

    /// Query by wire name (`"click"`, `"keyjustpressed"`, ...).
    /// An unrecognized name is reported and answers false.
    pub fn detect(&self, kind: &str, target: Target<'_>) -> bool {
        match kind.parse::<QueryKind>() {
            Ok(kind) => self.query(kind, target),
            Err(err) => {
                log::error!("{}", err);
                false
            }
        }
    }

    fn hits(&self, kind: QueryKind, target: Target<'_>) -> bool {
        match target {
            Target::Anywhere => true,
            Target::Entity(entity) => self.pointer.is_some_and(|p| entity.contains_point(p)),
            Target::Hitbox(hitbox) => self.pointer.is_some_and(|p| hitbox.contains(p)),
            Target::Key(key) => {
                log::error!("pointer query `{}` got key target `{}`", kind, key);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Color;
    use crate::components::entity::Entity;
    use crate::components::hitbox::Hitbox;
    use crate::components::sprite::{SolidColor, Sprite};

    fn ten_by_ten_at_origin() -> Entity {
        Entity::new(Sprite::new(SolidColor::new(Color::WHITE, 10.0, 10.0)))
    }

    fn move_to(input: &mut InputState, x: f32, y: f32) {
        input.apply(&InputEvent::PointerMove { x, y });
    }

    #[test]
    fn pointer_over_entity_is_boundary_exclusive() {
        let e = ten_by_ten_at_origin();
        let mut input = InputState::new();

        move_to(&mut input, 4.0, 4.0);
        assert!(input.query(QueryKind::PointerOver, Target::Entity(&e)));

        move_to(&mut input, 5.0, 5.0);
        assert!(!input.query(QueryKind::PointerOver, Target::Entity(&e)));

        move_to(&mut input, 10.0, 5.0);
        assert!(!input.query(QueryKind::PointerOver, Target::Entity(&e)));
    }

    #[test]
    fn unknown_pointer_position_never_hits() {
        let e = ten_by_ten_at_origin();
        let input = InputState::new();
        assert!(!input.query(QueryKind::PointerOver, Target::Entity(&e)));
        assert!(input.query(QueryKind::PointerOver, Target::Anywhere));
    }

    #[test]
    fn pointer_down_requires_button_and_hit() {
        let e = ten_by_ten_at_origin();
        let mut input = InputState::new();
        move_to(&mut input, 1.0, 1.0);
        assert!(!input.query(QueryKind::PointerDown, Target::Entity(&e)));

        input.apply(&InputEvent::PointerDown { button: PointerButton::Primary });
        assert!(input.query(QueryKind::PointerDown, Target::Entity(&e)));
        assert!(!input.query(QueryKind::SecondaryPointerDown, Target::Anywhere));

        move_to(&mut input, 100.0, 100.0);
        assert!(!input.query(QueryKind::PointerDown, Target::Entity(&e)));
        assert!(input.query(QueryKind::PointerDown, Target::Anywhere));
    }

    #[test]
    fn secondary_button_tracks_independently() {
        let mut input = InputState::new();
        input.apply(&InputEvent::PointerDown { button: PointerButton::Secondary });
        assert!(input.query(QueryKind::SecondaryPointerDown, Target::Anywhere));
        assert!(!input.query(QueryKind::PointerDown, Target::Anywhere));
        input.apply(&InputEvent::PointerUp { button: PointerButton::Secondary });
        assert!(!input.query(QueryKind::SecondaryPointerDown, Target::Anywhere));
    }

    #[test]
    fn click_is_one_shot() {
        let mut input = InputState::new();
        input.apply(&InputEvent::Click);
        assert!(input.query(QueryKind::Click, Target::Anywhere));
        input.reset();
        assert!(!input.query(QueryKind::Click, Target::Anywhere));
    }

    #[test]
    fn hitbox_target_tests_only_that_hitbox() {
        let e = ten_by_ten_at_origin().with_hitboxes(vec![
            Hitbox::new(4.0, 4.0),
            Hitbox::new(4.0, 4.0).with_offset(Vec2::new(40.0, 0.0)),
        ]);
        let mut input = InputState::new();
        move_to(&mut input, 20.0, 0.0);
        assert!(input.query(QueryKind::PointerOver, Target::Entity(&e)));
        assert!(!input.query(QueryKind::PointerOver, Target::Hitbox(e.hitbox(0).unwrap())));
        assert!(input.query(QueryKind::PointerOver, Target::Hitbox(e.hitbox(1).unwrap())));
    }

    #[test]
    fn key_just_pressed_lasts_one_tick() {
        let mut input = InputState::new();
        input.apply(&InputEvent::key_down("a"));
        assert!(input.key_just_pressed("a"));
        assert!(input.key_held("a"));

        input.reset();
        assert!(!input.key_just_pressed("a"));
        assert!(input.key_held("a"));

        input.apply(&InputEvent::key_up("a"));
        assert!(!input.key_held("a"));
        assert!(input.key_released("a"));
    }

    #[test]
    fn auto_repeat_is_not_a_new_press() {
        let mut input = InputState::new();
        input.apply(&InputEvent::key_down("ArrowUp"));
        input.reset();
        input.apply(&InputEvent::key_down("ArrowUp"));
        assert!(!input.key_just_pressed("ArrowUp"));
    }

    #[test]
    fn press_and_release_between_ticks_still_registers() {
        let mut input = InputState::new();
        input.apply(&InputEvent::key_down(" "));
        input.apply(&InputEvent::key_up(" "));
        assert!(input.query(QueryKind::KeyJustPressed, Target::Key(" ")));
        assert!(!input.query(QueryKind::KeyHeld, Target::Key(" ")));
    }

    #[test]
    fn reset_keeps_level_state() {
        let mut input = InputState::new();
        input.apply(&InputEvent::PointerDown { button: PointerButton::Primary });
        input.apply(&InputEvent::PointerDown { button: PointerButton::Secondary });
        input.apply(&InputEvent::key_down("Shift"));
        input.reset();
        assert!(input.is_pointer_down());
        assert!(input.is_secondary_down());
        assert!(input.key_held("Shift"));
    }

    #[test]
    fn detect_by_name() {
        let mut input = InputState::new();
        input.apply(&InputEvent::key_down("Enter"));
        assert!(input.detect("keyjustpressed", Target::Key("Enter")));
        assert!(input.detect("keydown", Target::Key("Enter")));
        assert!(!input.detect("keyup", Target::Key("Enter")));
        assert!(input.detect("keyup", Target::Key("Escape")));
    }

    #[test]
    fn unknown_kind_answers_false() {
        let input = InputState::new();
        assert!(!input.detect("tripleclick", Target::Anywhere));
    }

    #[test]
    fn mismatched_targets_answer_false() {
        let mut input = InputState::new();
        input.apply(&InputEvent::key_down("a"));
        input.apply(&InputEvent::Click);
        assert!(!input.query(QueryKind::KeyHeld, Target::Anywhere));
        assert!(!input.query(QueryKind::Click, Target::Key("a")));
    }

    #[test]
    fn swipe_is_one_shot() {
        let mut input = InputState::with_swipe_threshold(30.0);
        input.apply(&InputEvent::TouchStart { x: 200.0, y: 100.0 });
        input.apply(&InputEvent::TouchEnd { x: 100.0, y: 110.0 });
        assert!(input.swiped(SwipeDirection::Left));
        assert!(!input.swiped(SwipeDirection::Right));
        input.reset();
        assert!(!input.swiped(SwipeDirection::Left));
    }
}
