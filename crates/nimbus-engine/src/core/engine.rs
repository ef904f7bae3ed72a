use crate::api::scene::{EngineConfig, Scene, World};
use crate::components::behavior::UpdateContext;
use crate::core::time::FrameClock;
use crate::input::events::InputEvent;
use crate::renderer::canvas::Canvas2d;
use crate::renderer::draw::draw_entity;

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule the next tick at the next display refresh.
    Continue,
    /// Do not schedule another tick.
    Stop,
}

/// Scene runner that owns the world and drives one tick per display refresh.
///
/// The host calls [`frame`](Self::frame) with each refresh timestamp and
/// forwards device events through [`push_input`](Self::push_input) between
/// ticks.
pub struct Engine<S: Scene> {
    scene: S,
    world: World,
    clock: FrameClock,
    config: EngineConfig,
    initialized: bool,
    stopped: bool,
}

impl<S: Scene> Engine<S> {
    pub fn new(scene: S) -> Self {
        let config = scene.config();
        let world = World::new(&config);
        Self {
            scene,
            world,
            clock: FrameClock::new(),
            config,
            initialized: false,
            stopped: false,
        }
    }

    /// Initialize the scene. Call once after construction.
    ///
    /// Entities spawned here join the live sequence at the first tick's flush.
    pub fn init(&mut self) {
        if self.initialized {
            log::warn!("engine already initialized");
            return;
        }
        self.scene.init(&mut self.world);
        self.initialized = true;
    }

    /// Feed a device event to the input sampler.
    pub fn push_input(&mut self, event: InputEvent) {
        self.world.input.apply(&event);
    }

    /// Run one tick for the host refresh `timestamp` (milliseconds).
    ///
    /// The first call only records the timestamp.
    pub fn frame<C: Canvas2d>(&mut self, timestamp: f64, canvas: &mut C) -> LoopControl {
        if self.stopped {
            return LoopControl::Stop;
        }
        if !self.initialized {
            log::warn!("frame before init; skipping");
            return LoopControl::Continue;
        }

        let Some(time) = self.clock.advance(timestamp) else {
            return LoopControl::Continue;
        };
        self.world.time = time;

        self.world.viewport = canvas.resize_to_viewport();
        canvas.clear();

        self.scene.always_before(&mut self.world);
        if !self.world.paused {
            self.scene.before(&mut self.world);
        }

        self.update_and_draw(canvas);

        let stats = self.world.entities.flush();
        if stats.added > 0 || stats.removed > 0 {
            log::trace!("flush: +{} -{} ({} live)", stats.added, stats.removed, self.world.entities.len());
        }

        if !self.world.paused {
            self.scene.after(&mut self.world);
        }
        self.scene.always_after(&mut self.world);
        self.scene.render(&self.world, canvas);

        self.world.input.reset();

        if self.world.stop_requested() {
            log::info!("stop requested after frame {}", time.frame);
            self.stopped = true;
            return LoopControl::Stop;
        }
        LoopControl::Continue
    }

    /// Update then draw every live, non-deleted entity in live-sequence order.
    fn update_and_draw<C: Canvas2d>(&mut self, canvas: &mut C) {
        let rotation_scale = self.config.rotation_scale;
        let World {
            entities,
            input,
            time,
            viewport,
            paused,
            ..
        } = &mut self.world;

        // Spawns and deletes during the pass only touch the queues, so the
        // live length is fixed until the flush.
        for index in 0..entities.len() {
            if entities.live_at(index).is_deleted() {
                continue;
            }

            if !*paused {
                let entity = entities.live_at_mut(index);
                entity.behavior_changed = false;
                if let Some(mut behavior) = entity.behavior.take() {
                    let mut ctx = UpdateContext::new(index, entities, input, time, *viewport);
                    behavior.update(&mut ctx);
                    let entity = entities.live_at_mut(index);
                    // A behavior that replaced or cleared itself stays that way.
                    if !entity.behavior_changed {
                        entity.behavior = Some(behavior);
                    }
                }
            }

            let entity = entities.live_at(index);
            if entity.is_deleted() {
                continue;
            }
            draw_entity(canvas, entity, rotation_scale);
        }
    }

    /// Stop the loop; later frames return [`LoopControl::Stop`].
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
