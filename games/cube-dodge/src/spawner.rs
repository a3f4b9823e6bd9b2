use cube_engine::{BoxBody, RandomSource};
use glam::Vec3;

/// Frame-count interval between enemy spawns that shrinks with every spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnSchedule {
    rate: u64,
    step: u64,
    floor: u64,
}

impl SpawnSchedule {
    pub const INITIAL_RATE: u64 = 200;
    pub const RATE_STEP: u64 = 15;
    pub const RATE_FLOOR: u64 = 20;

    pub fn new(rate: u64, step: u64, floor: u64) -> Self {
        let floor = floor.max(1);
        Self {
            rate: rate.max(floor),
            step,
            floor,
        }
    }

    /// Current interval in frames.
    pub fn rate(&self) -> u64 {
        self.rate
    }

    /// Whether an enemy spawns on `frame`. A spawn tightens the interval
    /// by one step, never below the floor.
    pub fn due(&mut self, frame: u64) -> bool {
        if frame % self.rate != 0 {
            return false;
        }
        if self.rate > self.floor {
            self.rate = self.rate.saturating_sub(self.step).max(self.floor);
        }
        true
    }
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self::new(Self::INITIAL_RATE, Self::RATE_STEP, Self::RATE_FLOOR)
    }
}

/// Where and how fast new enemies enter the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTemplate {
    /// Spawn x is uniform in `[-x_spread / 2, x_spread / 2)`.
    pub x_spread: f32,
    pub y: f32,
    pub z: f32,
    pub speed: f32,
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            x_spread: 10.0,
            y: 0.0,
            z: -20.0,
            speed: 0.005,
        }
    }
}

impl EnemyTemplate {
    /// A fresh enemy body: unit cube, moving and accelerating towards +z.
    pub fn body(&self, rng: &mut impl RandomSource) -> BoxBody {
        let x = (rng.next_f32() - 0.5) * self.x_spread;
        BoxBody::cube()
            .with_position(Vec3::new(x, self.y, self.z))
            .with_velocity(Vec3::new(0.0, 0.0, self.speed))
            .with_z_acceleration(true)
    }
}
