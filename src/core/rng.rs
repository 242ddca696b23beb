//! RNG module - seedable generator for refills and AI sampling
//!
//! One generator is owned per session and injected by seed, so every cascade
//! is exactly reproducible in tests. Uses a simple LCG.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift keeps the draw in the generator's high bits; the
        // low k bits of a power-of-two-modulus LCG cycle with period 2^k,
        // so a plain modulo would turn small ranges into short fixed cycles.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Get the current state (exported so a session can be restarted with the
    /// same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}
