pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, GameConfig};
pub use api::game::{EngineContext, Game};
pub use api::types::{EntityId, GameEvent, SoundEvent};
pub use bridge::protocol::{FrameView, ProtocolLayout};
pub use components::entity::Entity;
pub use components::material::{Material, TextureSlot};
pub use crate::core::body::{BoxBody, FRICTION, GRAVITY, Z_ACCELERATION};
pub use crate::core::collision::{detect_box_collision, detect_ground, GROUND_LOOKAHEAD};
pub use crate::core::rng::{RandomSource, Rng};
pub use crate::core::scene::Scene;
pub use crate::core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use systems::render::build_render_buffer;
