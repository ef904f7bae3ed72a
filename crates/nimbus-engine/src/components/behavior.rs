//! Per-entity update behavior and the context it runs with.

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::registry::Registry;
use crate::core::time::FrameTime;
use crate::input::query::{QueryKind, Target};
use crate::input::state::InputState;
use crate::renderer::canvas::Viewport;

/// Logic run once per tick for a live, non-deleted entity while the world is not paused.
///
/// Any `FnMut(&mut UpdateContext)` closure is a behavior.
pub trait Behavior {
    fn update(&mut self, ctx: &mut UpdateContext<'_>);
}

impl<F> Behavior for F
where
    F: FnMut(&mut UpdateContext<'_>),
{
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self(ctx)
    }
}

/// What a behavior can see and touch during its update.
///
/// The live sequence is never drained while behaviors run, so spawns and
/// deletes issued here only touch the registry's queues.
pub struct UpdateContext<'a> {
    index: usize,
    registry: &'a mut Registry,
    input: &'a InputState,
    time: &'a FrameTime,
    viewport: Viewport,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(
        index: usize,
        registry: &'a mut Registry,
        input: &'a InputState,
        time: &'a FrameTime,
        viewport: Viewport,
    ) -> Self {
        Self {
            index,
            registry,
            input,
            time,
            viewport,
        }
    }

    /// Id of the entity being updated.
    pub fn id(&self) -> EntityId {
        self.registry.live_at(self.index).id()
    }

    /// The entity being updated.
    pub fn entity(&mut self) -> &mut Entity {
        self.registry.live_at_mut(self.index)
    }

    pub fn entity_ref(&self) -> &Entity {
        self.registry.live_at(self.index)
    }

    pub fn input(&self) -> &InputState {
        self.input
    }

    pub fn time(&self) -> &FrameTime {
        self.time
    }

    /// Milliseconds since the previous tick.
    pub fn delta(&self) -> f32 {
        self.time.delta as f32
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Read-only view of every entity, live and pending.
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.registry.get_mut(id)
    }

    /// Queue a new entity; it joins the live sequence at this tick's flush.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.registry.spawn(entity)
    }

    /// Delete another entity. Its `deleted` flag is set immediately.
    pub fn delete(&mut self, id: EntityId) -> bool {
        self.registry.delete(id)
    }

    /// Delete the entity being updated.
    pub fn delete_self(&mut self) -> bool {
        let id = self.id();
        self.registry.delete(id)
    }

    /// Pointer query against the entity being updated.
    pub fn pointer(&self, kind: QueryKind) -> bool {
        self.input.query(kind, Target::Entity(self.entity_ref()))
    }
}
