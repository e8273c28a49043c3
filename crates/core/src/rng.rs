//! RNG module - injected, seedable randomness
//!
//! Generation never reaches for a global random source. Callers pass a
//! [`RandomSource`] so the same seed replays the same batches, which is what
//! the tests rely on.
//!
//! Also provides a simple LCG for deterministic play and testing.

/// Uniform random source consumed by the batch generator
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Random value in range [0, max); `max` must be non-zero
    fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "next_range called with empty range");
        // Multiply-shift keeps the high bits, which are the good ones for an LCG
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

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
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pick one element uniformly (with replacement)
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_range(items.len() as u32) as usize)
}

/// Pick `count` distinct elements uniformly without replacement
///
/// Partial Fisher-Yates over a copy of `items`. Returns None when `items` is
/// shorter than `count`; never repeats an element.
pub fn choose_distinct<T: Copy>(
    rng: &mut dyn RandomSource,
    items: &[T],
    count: usize,
) -> Option<Vec<T>> {
    if items.len() < count {
        return None;
    }
    let mut pool = items.to_vec();
    for i in 0..count {
        let remaining = (pool.len() - i) as u32;
        let j = i + rng.next_range(remaining) as usize;
        pool.swap(i, j);
    }
    pool.truncate(count);
    Some(pool)
}
