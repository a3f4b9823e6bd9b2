use std::collections::HashMap;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage: a flat Vec in spawn order plus an id → slot index.
/// The game loop relies on spawn order when iterating enemies.
pub struct Scene {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene. An entity reusing a live id replaces it
    /// in place.
    pub fn spawn(&mut self, entity: Entity) {
        if let Some(&slot) = self.index.get(&entity.id) {
            self.entities[slot] = entity;
            return;
        }
        self.index.insert(entity.id, self.entities.len());
        self.entities.push(entity);
    }

    /// Remove an entity by ID, preserving the order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.index.remove(&id)?;
        let entity = self.entities.remove(slot);
        for (i, e) in self.entities.iter().enumerate().skip(slot) {
            self.index.insert(e.id, i);
        }
        Some(entity)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.index.get(&id)?;
        self.entities.get_mut(slot)
    }

    /// Iterate over all entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably. Ids must not be changed through it.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find all entities with the given tag, in spawn order.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.tag == tag).collect()
    }

    /// Count entities carrying the given tag.
    pub fn count_tag(&self, tag: &str) -> usize {
        self.entities.iter().filter(|e| e.tag == tag).count()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::BoxBody;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id, BoxBody::cube().with_position(Vec3::new(1.0, 2.0, 3.0))));
        let e = scene.get(id).unwrap();
        assert_eq!(e.body.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn despawn_keeps_order() {
        let mut scene = Scene::new();
        for i in 1..=4 {
            scene.spawn(Entity::new(EntityId(i), BoxBody::cube()));
        }
        scene.despawn(EntityId(2));
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert!(scene.despawn(EntityId(9)).is_none());
    }

    #[test]
    fn lookups_follow_entities_shifted_by_despawn() {
        let mut scene = Scene::new();
        for i in 1..=5 {
            let body = BoxBody::cube().with_position(Vec3::new(i as f32, 0.0, 0.0));
            scene.spawn(Entity::new(EntityId(i), body));
        }
        scene.despawn(EntityId(2));
        scene.despawn(EntityId(4));

        assert!(scene.get(EntityId(2)).is_none());
        assert!(scene.get(EntityId(4)).is_none());
        for i in [1, 3, 5] {
            assert_eq!(scene.get(EntityId(i)).unwrap().body.position.x, i as f32);
        }
        scene.get_mut(EntityId(5)).unwrap().body.position.y = 7.0;
        assert_eq!(scene.iter().last().unwrap().body.position.y, 7.0);
    }

    #[test]
    fn respawning_an_id_replaces_in_place() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1), BoxBody::cube()).with_tag("a"));
        scene.spawn(Entity::new(EntityId(2), BoxBody::cube()));
        scene.spawn(Entity::new(EntityId(1), BoxBody::cube()).with_tag("b"));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(EntityId(1)).unwrap().tag, "b");
    }

    #[test]
    fn clear_forgets_ids() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1), BoxBody::cube()));
        scene.clear();
        assert!(scene.get(EntityId(1)).is_none());
        scene.spawn(Entity::new(EntityId(1), BoxBody::cube()));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1), BoxBody::cube()).with_tag("player"));
        scene.spawn(Entity::new(EntityId(2), BoxBody::cube()).with_tag("enemy"));
        scene.spawn(Entity::new(EntityId(3), BoxBody::cube()).with_tag("enemy"));
        assert_eq!(scene.find_by_tag("player").unwrap().id, EntityId(1));
        assert_eq!(scene.count_tag("enemy"), 2);
        assert_eq!(scene.find_all_by_tag("enemy")[1].id, EntityId(3));
    }
}
