/// Fixed timestep accumulator.
/// Turns variable display-refresh deltas into a whole number of game ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on ticks run for a single frame.
    max_steps: u32,
    /// Total ticks handed out since creation.
    ticks: u64,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, 10)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
            ticks: 0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Negative or NaN deltas (tab switches, clock jumps) count as no time.
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.ticks += steps as u64;
        steps
    }

    /// Drop any partially accumulated frame time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Total number of ticks produced so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
