//! Seeded random number generation for reproducible embeddings and weights.
//!
//! This module provides a lightweight 32-bit PRNG (Weyl increment followed by
//! multiply/xor-shift mixing) and a Box–Muller Gaussian sampler on top of it.
//! Every draw is a pure function of the seed, so identical seeds always yield
//! identical matrices.

/// Weyl-sequence increment added to the state before every draw.
const WEYL_INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32, used to scale a 32-bit output into [0, 1).
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Lower bound applied to uniforms before taking a logarithm.
const MIN_UNIFORM: f64 = 1e-12;

/// Small seeded RNG producing reproducible uniforms and Gaussians.
///
/// A fresh generator is created per token and per head from a derived seed;
/// generators are never shared between them.
///
/// # Example
///
/// ```
/// use attention_explorer::utils::SeededRng;
///
/// let mut a = SeededRng::new(7);
/// let mut b = SeededRng::new(7);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a new RNG from a 32-bit seed. Zero is a valid seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the mixed 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Uniform sample in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Standard normal sample via Box–Muller.
    ///
    /// Consumes exactly two uniforms: `u` for the radius, then `v` for the angle.
    /// Both are clamped away from zero so `ln(u)` stays finite.
    pub fn gaussian(&mut self) -> f64 {
        let u = self.next_f64().max(MIN_UNIFORM);
        let v = self.next_f64().max(MIN_UNIFORM);
        (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
    }
}
