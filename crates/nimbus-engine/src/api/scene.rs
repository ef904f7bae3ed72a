use serde::Deserialize;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::registry::Registry;
use crate::core::time::FrameTime;
use crate::input::state::InputState;
use crate::renderer::canvas::{Canvas2d, Viewport};

/// Radians per direction unit used when none is configured.
pub fn default_rotation_scale() -> f32 {
    0.0026 / std::f32::consts::PI
}

/// Configuration for the engine, provided by the scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Multiplier from an entity's `direction` to radians.
    pub rotation_scale: f32,
    /// Scale the backing store by the device pixel ratio (web hosts).
    pub use_device_pixel_ratio: bool,
    /// Minimum dominant-axis travel, in logical pixels, for a touch swipe.
    pub swipe_threshold: f32,
    /// Log level installed by the web bridge ("error" .. "trace").
    pub log_level: String,
    /// Initial capacity of the live entity sequence.
    pub entity_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rotation_scale: default_rotation_scale(),
            use_device_pixel_ratio: true,
            swipe_threshold: 50.0,
            log_level: "info".to_string(),
            entity_capacity: 256,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The configured level as a `log` filter, falling back to Info.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Everything a scene can read and mutate during a tick.
pub struct World {
    pub entities: Registry,
    pub input: InputState,
    pub time: FrameTime,
    pub viewport: Viewport,
    /// Freezes entity updates and the `before`/`after` hooks.
    /// Rendering, flushing and the `always_*` hooks keep running.
    pub paused: bool,
    stop_requested: bool,
}

impl World {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            entities: Registry::with_capacity(config.entity_capacity),
            input: InputState::with_swipe_threshold(config.swipe_threshold),
            time: FrameTime::default(),
            viewport: Viewport::default(),
            paused: false,
            stop_requested: false,
        }
    }

    /// Queue an entity for the next flush.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.entities.spawn(entity)
    }

    /// Mark an entity deleted now; it leaves the live sequence at the next flush.
    pub fn delete(&mut self, id: EntityId) -> bool {
        self.entities.delete(id)
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Ask the loop to stop after the current tick.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

/// The contract every scene fulfills. Every hook is optional.
///
/// Per tick the engine calls, in order: `always_before`, `before` (unless
/// paused), entity updates and drawing, the registry flush, `after` (unless
/// paused), `always_after`, then `render`.
pub trait Scene {
    /// Return engine configuration. Called once when the engine is built.
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
    }

    /// Setup initial state and spawn entities.
    fn init(&mut self, _world: &mut World) {}

    fn always_before(&mut self, _world: &mut World) {}

    fn before(&mut self, _world: &mut World) {}

    fn after(&mut self, _world: &mut World) {}

    fn always_after(&mut self, _world: &mut World) {}

    /// Optional overlay pass drawn on top of the entities (debug text etc.).
    fn render(&self, _world: &World, _canvas: &mut dyn Canvas2d) {}
}

type HookFn = Box<dyn FnMut(&mut World)>;

/// A scene assembled from closures. Unset hooks do nothing.
#[derive(Default)]
pub struct Hooks {
    config: EngineConfig,
    init: Option<HookFn>,
    always_before: Option<HookFn>,
    before: Option<HookFn>,
    after: Option<HookFn>,
    always_after: Option<HookFn>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_init(mut self, f: impl FnMut(&mut World) + 'static) -> Self {
        self.init = Some(Box::new(f));
        self
    }

    pub fn on_always_before(mut self, f: impl FnMut(&mut World) + 'static) -> Self {
        self.always_before = Some(Box::new(f));
        self
    }

    pub fn on_before(mut self, f: impl FnMut(&mut World) + 'static) -> Self {
        self.before = Some(Box::new(f));
        self
    }

    pub fn on_after(mut self, f: impl FnMut(&mut World) + 'static) -> Self {
        self.after = Some(Box::new(f));
        self
    }

    pub fn on_always_after(mut self, f: impl FnMut(&mut World) + 'static) -> Self {
        self.always_after = Some(Box::new(f));
        self
    }
}

fn run(hook: &mut Option<HookFn>, world: &mut World) {
    if let Some(f) = hook {
        f(world);
    }
}

impl Scene for Hooks {
    fn config(&self) -> EngineConfig {
        self.config.clone()
    }

    fn init(&mut self, world: &mut World) {
        run(&mut self.init, world);
    }

    fn always_before(&mut self, world: &mut World) {
        run(&mut self.always_before, world);
    }

    fn before(&mut self, world: &mut World) {
        run(&mut self.before, world);
    }

    fn after(&mut self, world: &mut World) {
        run(&mut self.after, world);
    }

    fn always_after(&mut self, world: &mut World) {
        run(&mut self.always_after, world);
    }
}
