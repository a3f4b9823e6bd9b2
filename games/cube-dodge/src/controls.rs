use cube_engine::InputQueue;

/// `KeyboardEvent.keyCode` values the host forwards.
pub mod keys {
    pub const W: u32 = 87;
    pub const A: u32 = 65;
    pub const S: u32 = 83;
    pub const D: u32 = 68;
    pub const SPACE: u32 = 32;
}

/// Horizontal speed applied while a direction key is held.
pub const PLAYER_SPEED: f32 = 0.05;

/// Per-tick control flags, derived from held keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Controls {
    pub fn from_input(input: &InputQueue) -> Self {
        Self {
            forward: input.is_held(keys::W),
            back: input.is_held(keys::S),
            left: input.is_held(keys::A),
            right: input.is_held(keys::D),
            jump: input.is_held(keys::SPACE),
        }
    }

    /// Player (x, z) velocity. Left beats right and forward beats back
    /// when both are held; forward is towards negative z.
    pub fn horizontal_velocity(&self) -> (f32, f32) {
        let x = if self.left {
            -PLAYER_SPEED
        } else if self.right {
            PLAYER_SPEED
        } else {
            0.0
        };

        let z = if self.forward {
            -PLAYER_SPEED
        } else if self.back {
            PLAYER_SPEED
        } else {
            0.0
        };

        (x, z)
    }
}
