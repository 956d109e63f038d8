//! RNG module - seeded gameplay randomness
//!
//! A small LCG that every gameplay draw goes through: obstacle layout, food and
//! power-up placement, the power-up spawn roll and particle bursts. Draws are
//! shaped like the classic C `rand()` (15 significant bits) so that modulo
//! reductions use the high-quality upper bits of the state.
//!
//! Rendering never touches this generator; sprite texture is a pure function of
//! coordinates.

/// Largest value returned by [`SimpleRng::next_rand`].
pub const RAND_MAX: u32 = 0x7FFF;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Draw in `[0, RAND_MAX]` taken from the upper state bits.
    pub fn next_rand(&mut self) -> u32 {
        (self.next_u32() >> 16) & RAND_MAX
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_rand() % max
    }

    /// Uniform draw in `[0.0, 1.0]`.
    pub fn next_unit(&mut self) -> f32 {
        self.next_rand() as f32 / RAND_MAX as f32
    }

    /// Current state, for save blocks.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Restore a state previously read with [`SimpleRng::state`].
    pub fn set_state(&mut self, state: u32) {
        self.state = if state == 0 { 1 } else { state };
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
