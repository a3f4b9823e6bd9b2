//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

/// Source of uniformly distributed floats in `[0, 1)`.
///
/// Games take this as a seam so tests can pin spawn positions.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Restart the sequence from `seed`. Sources without state ignore it.
    fn reseed(&mut self, _seed: u64) {}
}

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    /// Top 24 bits mapped onto the f32 mantissa, so 1.0 is never produced.
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn reseed(&mut self, seed: u64) {
        *self = Rng::new(seed);
    }
}
