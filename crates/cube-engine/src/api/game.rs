use crate::api::config::GameConfig;
use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::components::entity::Entity;
use crate::core::body::BoxBody;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick: read input, step physics, spawn, check end conditions.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Whether the session has reached a terminal state.
    /// Once true, the runner stops calling `update`.
    fn is_over(&self) -> bool {
        false
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    /// Active configuration, as seen by the runner.
    pub config: GameConfig,
    pub scene: Scene,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate an ID for `entity_fn`'s entity and add it to the scene.
    pub fn spawn(&mut self, entity_fn: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(entity_fn(id));
        id
    }

    /// Remove an entity from the scene.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.scene.despawn(id)
    }

    pub fn body(&self, id: EntityId) -> Option<&BoxBody> {
        self.scene.get(id).map(|e| &e.body)
    }

    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut BoxBody> {
        self.scene.get_mut(id).map(|e| &mut e.body)
    }

    /// Emit a sound cue to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
