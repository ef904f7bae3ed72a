use glam::Vec2;
use nimbus_engine::{
    AssetRegistry, Canvas2d, Color, EngineConfig, Entity, EntityId, Scene, SolidColor, Sprite,
    SwipeDirection, Target, TextStyle, UpdateContext, World,
};
use nimbus_web::WebScene;

use crate::cloud::{Cloud, CLOUD_TAG, ERASING_TAG};
use crate::rng::Rng;

const SKY: &str = "#478db5";
const LIGHTNING: &str = "#eeeeee";
const DEBUG_FONT: &str = "16px arial";

/// Sky brightness while it rains.
const STORM_BRIGHTNESS: f32 = 50.0;

/// Clouds over a sky backdrop.
///
/// Click to form clouds, right-click a grown cloud to erase it. Keys:
/// ArrowUp adds a cluster, ArrowDown erases every cloud, Space toggles rain,
/// Enter toggles pause, `.` steps one tick while paused.
pub struct SkyScene {
    cloud: Sprite,
    rng: Rng,
    raining: bool,
    debug: bool,
    step_frame: bool,
    sky: EntityId,
    lightning: EntityId,
    jimmy: EntityId,
}

/// Step sizes for a trail of clouds. Each cloud narrows the next step by
/// `narrowing` per index.
#[derive(Debug, Clone, Copy)]
struct Trail {
    reach_x: f32,
    narrowing_x: f32,
    reach_y: f32,
    narrowing_y: f32,
}

/// Long, loose trail formed by a click.
const CLICK_TRAIL: Trail = Trail {
    reach_x: 20.0,
    narrowing_x: 0.6,
    reach_y: 10.0,
    narrowing_y: 0.1,
};

/// Tighter trail used to build clusters.
const CLUSTER_TRAIL: Trail = Trail {
    reach_x: 15.0,
    narrowing_x: 0.9,
    reach_y: 10.0,
    narrowing_y: 0.5,
};

impl SkyScene {
    pub fn new(cloud: Sprite) -> Self {
        Self {
            cloud,
            rng: Rng::new(0x5eed),
            raining: false,
            debug: true,
            step_frame: false,
            sky: EntityId::UNASSIGNED,
            lightning: EntityId::UNASSIGNED,
            jimmy: EntityId::UNASSIGNED,
        }
    }

    fn cloud_at(&mut self, world: &mut World, pos: Vec2, delay: f32) {
        let entity = Cloud::spawn_entity(self.cloud.clone(), pos, delay, &mut self.rng);
        world.spawn(entity);
    }

    /// A trail of clouds wandering away from `origin`.
    fn formation(&mut self, world: &mut World, origin: Vec2, trail: Trail) {
        let density = self.rng.range(5, 40);
        let mut pos = origin;
        for i in 0..density {
            self.cloud_at(world, pos, i as f32 * 10.0);
            let spread = i as f32 * trail.narrowing_x;
            pos.x += self
                .rng
                .range((-trail.reach_x + spread).round() as i32, (trail.reach_x - spread) as i32) as f32;
            let drift = i as f32 * trail.narrowing_y;
            pos.y += self.rng.range((-trail.reach_y + drift) as i32, (trail.reach_y - drift) as i32) as f32;
        }
    }

    /// A cluster of formations around a random point near the middle.
    fn cluster(&mut self, world: &mut World) {
        let center = world.viewport.center();
        let (w, h) = (world.viewport.width as i32, world.viewport.height as i32);
        let x = center.x + (self.rng.range(-w / 4, w / 4) + self.rng.range(-w / 6, w / 6)) as f32;
        let y = center.y + (self.rng.range(-h / 4, h / 4) + self.rng.range(-h / 6, h / 6)) as f32;
        for _ in 0..self.rng.range(10, 30) {
            let origin = Vec2::new(
                x + self.rng.range(-30, 30) as f32,
                y + self.rng.range(-30, 30) as f32,
            );
            self.formation(world, origin, CLUSTER_TRAIL);
        }
    }

    fn erase_all(world: &mut World) {
        for entity in world.entities.iter_mut().filter(|e| e.tag == CLOUD_TAG) {
            entity.tag = ERASING_TAG.to_string();
        }
    }

    fn set_raining(&mut self, world: &mut World, raining: bool) {
        self.raining = raining;
        if let Some(sky) = world.entities.get_mut(self.sky) {
            sky.set_behavior(sky_behavior(raining));
        }
        if let Some(lightning) = world.entities.get_mut(self.lightning) {
            let delay = self.rng.range(4000, 8000) as f32;
            lightning.set_behavior(lightning_behavior(raining, delay, self.rng.clone()));
        }
    }
}

fn backdrop(hex: &str) -> Sprite {
    let color = Color::from_hex(hex).unwrap_or(Color::BLACK);
    Sprite::new(SolidColor::new(color, 1.0, 1.0))
}

/// Keep the backdrop covering the viewport; fade toward storm or clear sky.
fn sky_behavior(raining: bool) -> impl FnMut(&mut UpdateContext<'_>) + 'static {
    move |ctx: &mut UpdateContext<'_>| {
        let viewport = ctx.viewport();
        let delta = ctx.delta();
        let sky = ctx.entity();
        sky.sprite.current_mut().set_size(viewport.width, viewport.height);
        sky.pos = viewport.center();
        if raining {
            sky.brightness = (sky.brightness - 0.05 * delta).max(STORM_BRIGHTNESS);
        } else {
            sky.brightness = (sky.brightness + 0.025 * delta).min(100.0);
        }
    }
}

/// Occasional full-screen flash while it rains.
fn lightning_behavior(raining: bool, delay: f32, mut rng: Rng) -> impl FnMut(&mut UpdateContext<'_>) + 'static {
    let mut timer = delay;
    let mut flashing = false;
    move |ctx: &mut UpdateContext<'_>| {
        let viewport = ctx.viewport();
        let delta = ctx.delta();
        let flash = ctx.entity();
        flash.sprite.current_mut().set_size(viewport.width, viewport.height);
        flash.pos = viewport.center();

        if raining && !flashing {
            timer = (timer - delta).max(0.0);
            if timer == 0.0 {
                flash.visible = true;
                flash.opacity = 0.8;
                flashing = true;
            }
        }
        if flashing {
            flash.opacity -= flash.opacity * delta / 200.0;
            if flash.opacity < 0.005 {
                flash.opacity = 0.0;
                flash.visible = false;
                flashing = false;
                timer = rng.range(1000, 18000) as f32;
            }
        }
    }
}

impl WebScene for SkyScene {
    fn build(assets: &AssetRegistry) -> Self {
        let cloud = assets
            .sprite("cloud")
            .unwrap_or_else(|_| Sprite::new(SolidColor::new(Color::WHITE, 28.0, 31.0)));
        Self::new(cloud)
    }
}

impl Scene for SkyScene {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            log_level: "debug".to_string(),
            ..EngineConfig::default()
        }
    }

    fn init(&mut self, world: &mut World) {
        self.sky = world.spawn(Entity::new(backdrop(SKY)).with_tag("sky").with_behavior(sky_behavior(false)));
        let delay = self.rng.range(4000, 8000) as f32;
        self.lightning = world.spawn(
            Entity::new(backdrop(LIGHTNING))
                .with_tag("lightning")
                .hidden()
                .with_behavior(lightning_behavior(false, delay, self.rng.clone())),
        );

        if self.debug {
            let entity = Entity::new(self.cloud.clone())
                .with_tag("jimmy")
                .with_pos(Vec2::new(400.0, 500.0))
                .with_opacity(0.85)
                .with_behavior(|ctx: &mut UpdateContext<'_>| {
                    let held = ctx.pointer(nimbus_engine::QueryKind::PointerDown);
                    if !held {
                        let delta = ctx.delta();
                        ctx.entity().direction += 1.5 * delta;
                    }
                });
            self.jimmy = world.spawn(entity);
        }
        log::info!("sky scene ready");
    }

    fn before(&mut self, world: &mut World) {
        if world.input.detect("click", Target::Anywhere) {
            if let Some(pointer) = world.input.pointer() {
                self.formation(world, pointer, CLICK_TRAIL);
            }
        }
        if world.input.detect("keyjustpressed", "ArrowDown".into()) || world.input.swiped(SwipeDirection::Down) {
            Self::erase_all(world);
        }
        if world.input.detect("keyjustpressed", "ArrowUp".into()) || world.input.swiped(SwipeDirection::Up) {
            self.cluster(world);
        }
        if world.input.detect("keyjustpressed", " ".into()) {
            let raining = !self.raining;
            self.set_raining(world, raining);
        }
    }

    fn always_after(&mut self, world: &mut World) {
        if world.input.key_just_pressed("Enter") {
            world.toggle_pause();
        }
        if !self.debug {
            return;
        }
        if self.step_frame {
            if world.paused {
                world.paused = false;
            } else {
                world.paused = true;
                self.step_frame = false;
            }
        }
        if world.paused && world.input.key_just_pressed(".") {
            self.step_frame = true;
        }
        if world.input.key_just_pressed("1") {
            log::info!("{} entities live", world.entities.len());
        }
    }

    fn render(&self, world: &World, canvas: &mut dyn Canvas2d) {
        if !self.debug {
            return;
        }
        let input = &world.input;
        let pointer = input.pointer().unwrap_or(Vec2::ZERO);
        let jimmy = world.entities.get(self.jimmy);
        let over = jimmy.is_some_and(|e| input.detect("mouseover", e.into()));
        let held = jimmy.is_some_and(|e| input.detect("mousedown", e.into()));

        let lines = [
            format!("mouseX: {}", pointer.x),
            format!("mouseY: {}", pointer.y),
            format!("mouseDown: {}", input.is_pointer_down()),
            format!("mouse over jimmy?: {over}"),
            format!("mouse down on jimmy?: {held}"),
            format!("fps: {}", world.time.fps),
            format!("rightMouseDown: {}", input.is_secondary_down()),
            format!("paused: {}", world.paused),
            format!("dpi: {}", world.viewport.pixel_ratio),
        ];
        let style = TextStyle {
            font: DEBUG_FONT,
            color: Color::WHITE,
        };
        for (i, line) in lines.iter().enumerate() {
            canvas.fill_text(line, 20.0, 30.0 + 20.0 * i as f32, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_engine::{DrawOp, Engine, HeadlessCanvas, InputEvent, PointerButton, Viewport};

    fn start() -> (Engine<SkyScene>, HeadlessCanvas, f64) {
        let scene = SkyScene::new(Sprite::new(SolidColor::new(Color::WHITE, 28.0, 31.0)));
        let mut engine = Engine::new(scene);
        engine.init();
        let mut canvas = HeadlessCanvas::new(Viewport::new(800.0, 600.0));
        engine.frame(0.0, &mut canvas);
        engine.frame(16.0, &mut canvas);
        (engine, canvas, 16.0)
    }

    fn clouds(engine: &Engine<SkyScene>) -> usize {
        engine.world().entities.find_all_by_tag(CLOUD_TAG).len()
    }

    #[test]
    fn sky_tracks_viewport() {
        let (mut engine, mut canvas, t) = start();
        engine.frame(t + 16.0, &mut canvas);
        let sky = engine.world().entities.find_by_tag("sky").unwrap();
        assert_eq!(sky.pos, Vec2::new(400.0, 300.0));
        assert_eq!(sky.sprite.current().width(), 800.0);
    }

    #[test]
    fn click_forms_clouds() {
        let (mut engine, mut canvas, t) = start();
        engine.push_input(InputEvent::PointerMove { x: 200.0, y: 150.0 });
        engine.push_input(InputEvent::Click);
        engine.frame(t + 16.0, &mut canvas);
        let count = clouds(&engine);
        assert!((5..=40).contains(&count));
    }

    /// Largest first step along x over many trails starting at the origin.
    fn widest_first_step(trail: Trail) -> f32 {
        let mut scene = SkyScene::new(Sprite::new(SolidColor::new(Color::WHITE, 28.0, 31.0)));
        let mut world = World::default();
        let mut widest: f32 = 0.0;
        for _ in 0..60 {
            scene.formation(&mut world, Vec2::ZERO, trail);
            world.entities.flush();
            let second = world.entities.iter().nth(1).unwrap();
            widest = widest.max(second.pos.x.abs());
            world.entities.delete_where(|_| true);
            world.entities.flush();
        }
        widest
    }

    #[test]
    fn cluster_trails_step_tighter_than_click_trails() {
        assert!(widest_first_step(CLUSTER_TRAIL) <= 15.0);
        assert!(widest_first_step(CLICK_TRAIL) > 15.0);
    }

    #[test]
    fn arrow_up_builds_a_cluster() {
        let (mut engine, mut canvas, t) = start();
        engine.push_input(InputEvent::key_down("ArrowUp"));
        engine.frame(t + 16.0, &mut canvas);
        assert!(clouds(&engine) >= 10 * 5);
    }

    #[test]
    fn arrow_down_erases_every_cloud() {
        let (mut engine, mut canvas, mut t) = start();
        engine.push_input(InputEvent::PointerMove { x: 200.0, y: 150.0 });
        engine.push_input(InputEvent::Click);
        t += 16.0;
        engine.frame(t, &mut canvas);
        engine.push_input(InputEvent::key_down("ArrowDown"));
        t += 16.0;
        engine.frame(t, &mut canvas);
        assert_eq!(clouds(&engine), 0);

        for _ in 0..600 {
            t += 16.0;
            engine.frame(t, &mut canvas);
        }
        assert!(engine.world().entities.find_by_tag(ERASING_TAG).is_none());
    }

    #[test]
    fn enter_toggles_pause_and_freezes_jimmy() {
        let (mut engine, mut canvas, mut t) = start();
        t += 16.0;
        engine.frame(t, &mut canvas);
        engine.push_input(InputEvent::key_down("Enter"));
        t += 16.0;
        engine.frame(t, &mut canvas);
        assert!(engine.world().paused);

        let spin = engine.world().entities.find_by_tag("jimmy").unwrap().direction;
        t += 16.0;
        engine.frame(t, &mut canvas);
        assert_eq!(engine.world().entities.find_by_tag("jimmy").unwrap().direction, spin);
    }

    #[test]
    fn holding_jimmy_stops_the_spin() {
        let (mut engine, mut canvas, mut t) = start();
        engine.push_input(InputEvent::PointerMove { x: 400.0, y: 500.0 });
        engine.push_input(InputEvent::PointerDown { button: PointerButton::Primary });
        t += 16.0;
        engine.frame(t, &mut canvas);
        t += 16.0;
        engine.frame(t, &mut canvas);
        assert_eq!(engine.world().entities.find_by_tag("jimmy").unwrap().direction, 0.0);
    }

    #[test]
    fn debug_overlay_is_drawn_last() {
        let (mut engine, mut canvas, t) = start();
        canvas.take_ops();
        engine.frame(t + 16.0, &mut canvas);
        let last = canvas.draws().last().cloned();
        assert!(matches!(last, Some(DrawOp::Text { ref text, .. }) if text.starts_with("dpi")));
    }
}
