//! Deterministic choice stream.
//!
//! Non-deterministic operators (`choice`, `some-element`) pick one option
//! through this SplitMix64 stream. Seeding it from the interpreter
//! configuration makes every run reproducible.

/// A SplitMix64 pseudo-random stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceRng {
    state: u64,
}

impl ChoiceRng {
    #[inline]
    pub const fn new(seed: u64) -> Self {
        // SplitMix64 needs a non-zero state
        let state = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// A uniform index in `[0, len)`. `len` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = ChoiceRng::new(42);
        let mut b = ChoiceRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = ChoiceRng::new(0);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }
}
