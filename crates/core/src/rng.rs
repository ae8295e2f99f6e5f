//! RNG module - small deterministic generator for item draws
//!
//! The game only needs "pick one of N candidates" with a roughly uniform
//! distribution, so a seeded LCG is enough. Seeding makes draws reproducible
//! in tests and benches; the binary seeds from the clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point of the multiplier alone.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform index in `[0, len)`.
    ///
    /// Uses the high bits (multiply-shift) because the low bits of an LCG have
    /// short periods. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let len = len.min(u32::MAX as usize) as u64;
        ((self.next_u32() as u64 * len) >> 32) as usize
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Seed derived from the current time. Never zero.
pub fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let mixed = (now.as_secs() as u32) ^ now.subsec_nanos().rotate_left(16);
    mixed.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_index_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for len in 1..50usize {
            for _ in 0..20 {
                assert!(rng.next_index(len) < len);
            }
        }
    }

    #[test]
    fn test_next_index_covers_every_slot() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[rng.next_index(6)] = true;
        }
        assert!(seen.iter().all(|&s| s), "slots never drawn: {:?}", seen);
    }

    #[test]
    fn test_clock_seed_non_zero() {
        assert_ne!(clock_seed(), 0);
    }
}
