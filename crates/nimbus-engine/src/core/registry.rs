use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Counts from one [`Registry::flush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub added: usize,
    pub removed: usize,
    /// Removals whose entity was not in the live sequence.
    pub missing: usize,
}

/// Entity storage with deferred add/remove queues.
///
/// The live sequence is a flat Vec; its order is insertion order and render
/// order. Spawns and deletes only touch the queues, so iterating the live
/// sequence stays stable for a whole tick. [`flush`](Self::flush) applies the
/// queues once per tick.
pub struct Registry {
    live: Vec<Entity>,
    pending_add: Vec<Entity>,
    pending_remove: Vec<EntityId>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a registry with a specific live-sequence capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: Vec::with_capacity(capacity),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            next_id: 1,
        }
    }

    /// Assign an id and queue the entity for addition at the next flush.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        self.pending_add.push(entity);
        id
    }

    /// Mark an entity deleted right away and queue its removal.
    ///
    /// Works on live and still-pending entities alike. Returns false if the
    /// id is unknown or the entity was already deleted.
    pub fn delete(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            None => {
                log::warn!("delete: entity {:?} is not in the registry", id);
                return false;
            }
            Some(entity) if entity.deleted => return false,
            Some(entity) => entity.deleted = true,
        }
        self.pending_remove.push(id);
        true
    }

    /// Delete every not-yet-deleted entity matching the predicate. Returns how many.
    pub fn delete_where(&mut self, mut pred: impl FnMut(&Entity) -> bool) -> usize {
        let ids: Vec<EntityId> = self
            .live
            .iter()
            .chain(self.pending_add.iter())
            .filter(|e| !e.deleted && pred(e))
            .map(|e| e.id)
            .collect();
        for &id in &ids {
            self.delete(id);
        }
        ids.len()
    }

    /// Drain both queues: additions first (FIFO), then removals.
    ///
    /// A removal whose entity is not live is reported and skipped. `delete`
    /// never queues such an id, so this only guards against a corrupted queue.
    pub fn flush(&mut self) -> FlushStats {
        let mut stats = FlushStats {
            added: self.pending_add.len(),
            ..FlushStats::default()
        };
        self.live.append(&mut self.pending_add);

        for id in std::mem::take(&mut self.pending_remove) {
            match self.live.iter().position(|e| e.id == id) {
                Some(idx) => {
                    self.live.remove(idx);
                    stats.removed += 1;
                }
                None => {
                    log::warn!("flush: removal of entity {:?} which is not live", id);
                    stats.missing += 1;
                }
            }
        }
        stats
    }

    /// Look up a live or pending entity.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.live
            .iter()
            .chain(self.pending_add.iter())
            .find(|e| e.id == id)
    }

    /// Mutable lookup of a live or pending entity.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.live
            .iter_mut()
            .chain(self.pending_add.iter_mut())
            .find(|e| e.id == id)
    }

    /// True if the entity is in the live sequence (deleted or not).
    pub fn is_live(&self, id: EntityId) -> bool {
        self.live.iter().any(|e| e.id == id)
    }

    /// Iterate over the live sequence, including deleted-but-unflushed entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.live.iter()
    }

    /// Iterate over the live sequence mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.live.iter_mut()
    }

    /// Iterate over live entities that are not deleted.
    pub fn iter_active(&self) -> impl Iterator<Item = &Entity> {
        self.live.iter().filter(|e| !e.deleted)
    }

    /// Find the first live entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.live.iter().find(|e| e.tag == tag)
    }

    /// Find the first live entity with the given tag (mutable).
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.live.iter_mut().find(|e| e.tag == tag)
    }

    /// Find all live entities with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.live.iter().filter(|e| e.tag == tag).collect()
    }

    /// Number of entities in the live sequence.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn pending_add_len(&self) -> usize {
        self.pending_add.len()
    }

    pub fn pending_remove_len(&self) -> usize {
        self.pending_remove.len()
    }

    pub(crate) fn live_at(&self, index: usize) -> &Entity {
        &self.live[index]
    }

    pub(crate) fn live_at_mut(&mut self, index: usize) -> &mut Entity {
        &mut self.live[index]
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Color;
    use crate::components::sprite::{SolidColor, Sprite};

    fn entity() -> Entity {
        Entity::new(Sprite::new(SolidColor::new(Color::WHITE, 10.0, 10.0)))
    }

    fn live_ids(reg: &Registry) -> Vec<EntityId> {
        reg.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn spawn_is_deferred_until_flush() {
        let mut reg = Registry::new();
        let id = reg.spawn(entity());
        assert!(reg.is_empty());
        assert_eq!(reg.pending_add_len(), 1);
        assert!(reg.get(id).is_some());

        let stats = reg.flush();
        assert_eq!(stats.added, 1);
        assert_eq!(live_ids(&reg), vec![id]);
    }

    #[test]
    fn flush_preserves_fifo_order() {
        let mut reg = Registry::new();
        let a = reg.spawn(entity());
        let b = reg.spawn(entity());
        reg.flush();
        let c = reg.spawn(entity());
        reg.flush();
        assert_eq!(live_ids(&reg), vec![a, b, c]);
    }

    #[test]
    fn delete_marks_immediately_and_removes_at_flush() {
        let mut reg = Registry::new();
        let a = reg.spawn(entity());
        let b = reg.spawn(entity());
        reg.flush();

        assert!(reg.delete(a));
        assert!(reg.get(a).unwrap().is_deleted());
        assert!(reg.is_live(a));
        assert_eq!(reg.iter_active().count(), 1);

        let stats = reg.flush();
        assert_eq!(stats.removed, 1);
        assert_eq!(live_ids(&reg), vec![b]);
    }

    #[test]
    fn removal_keeps_relative_order() {
        let mut reg = Registry::new();
        let ids: Vec<_> = (0..4).map(|_| reg.spawn(entity())).collect();
        reg.flush();
        reg.delete(ids[1]);
        reg.flush();
        assert_eq!(live_ids(&reg), vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn spawn_then_delete_never_becomes_live() {
        let mut reg = Registry::new();
        let id = reg.spawn(entity());
        assert!(reg.delete(id));
        let stats = reg.flush();
        assert_eq!(stats, FlushStats { added: 1, removed: 1, missing: 0 });
        assert!(!reg.is_live(id));
        assert!(reg.get(id).is_none());
    }

    #[test]
    fn double_delete_queues_one_removal() {
        let mut reg = Registry::new();
        let id = reg.spawn(entity());
        reg.flush();
        assert!(reg.delete(id));
        assert!(!reg.delete(id));
        assert_eq!(reg.pending_remove_len(), 1);
        assert_eq!(reg.flush().missing, 0);
    }

    #[test]
    fn flush_skips_removal_of_entity_not_live() {
        let mut reg = Registry::new();
        let kept = reg.spawn(entity());
        reg.flush();
        reg.pending_remove.push(EntityId(42));

        let stats = reg.flush();
        assert_eq!(stats, FlushStats { added: 0, removed: 0, missing: 1 });
        assert_eq!(live_ids(&reg), vec![kept]);
        assert_eq!(reg.pending_remove_len(), 0);
    }

    #[test]
    fn unknown_delete_is_a_no_op() {
        let mut reg = Registry::new();
        assert!(!reg.delete(EntityId(99)));
        assert_eq!(reg.pending_remove_len(), 0);
    }

    #[test]
    fn delete_where_matches_tags() {
        let mut reg = Registry::new();
        reg.spawn(entity().with_tag("cloud"));
        reg.spawn(entity().with_tag("sky"));
        reg.flush();
        reg.spawn(entity().with_tag("cloud"));

        assert_eq!(reg.delete_where(|e| e.tag == "cloud"), 2);
        reg.flush();
        assert_eq!(reg.len(), 1);
        assert!(reg.find_by_tag("cloud").is_none());
        assert!(reg.find_by_tag("sky").is_some());
    }

    #[test]
    fn find_all_by_tag() {
        let mut reg = Registry::new();
        reg.spawn(entity().with_tag("drop"));
        reg.spawn(entity().with_tag("drop"));
        reg.spawn(entity().with_tag("cloud"));
        reg.flush();
        assert_eq!(reg.find_all_by_tag("drop").len(), 2);
    }
}
