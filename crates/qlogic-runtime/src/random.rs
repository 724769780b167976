//! Seed-stable randomization
//!
//! Question and answer-option ordering must stay the same for a respondent
//! across page loads, so every ordering here is a pure function of a seed
//! string (typically the response id).

use rand::RngCore;

/// Deterministic 32-bit generator derived from a seed string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Fold the seed's UTF-16 code units into the initial state
    pub fn from_seed_str(seed: &str) -> Self {
        let state = seed
            .encode_utf16()
            .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
        Self { state }
    }

    fn advance(&mut self) -> u32 {
        let mut h = self.state;
        h = (h ^ (h >> 16)).wrapping_mul(0x85eb_ca6b);
        h = (h ^ (h >> 13)).wrapping_mul(0xc2b2_ae35);
        h ^= h >> 16;
        self.state = h;
        h
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.advance()) / 4_294_967_296.0
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.advance());
        let low = u64::from(self.advance());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Stateless ordering and selection helpers
pub struct Randomizer;

impl Randomizer {
    /// Generator for `seed`
    pub fn seeded_generator(seed: &str) -> SeededRng {
        SeededRng::from_seed_str(seed)
    }

    /// Fisher-Yates shuffle; the same seed and length give the same permutation
    pub fn shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
        let mut rng = Self::seeded_generator(seed);
        let mut shuffled = items.to_vec();
        for i in (1..shuffled.len()).rev() {
            let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
            shuffled.swap(i, j);
        }
        shuffled
    }

    /// The first `count` items of the seeded shuffle
    pub fn select_random<T: Clone>(items: &[T], count: usize, seed: &str) -> Vec<T> {
        let mut shuffled = Self::shuffle(items, seed);
        shuffled.truncate(count);
        shuffled
    }

    /// Every `k`-item subset, each keeping the input order.
    ///
    /// Empty when `k` exceeds the number of items; one empty subset when `k`
    /// is 0.
    pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
        if k > items.len() {
            return Vec::new();
        }
        if k == 0 {
            return vec![Vec::new()];
        }
        if k == items.len() {
            return vec![items.to_vec()];
        }

        let mut result = Vec::new();
        for i in 0..=(items.len() - k) {
            for tail in Self::combinations(&items[i + 1..], k - 1) {
                let mut combination = Vec::with_capacity(k);
                combination.push(items[i].clone());
                combination.extend(tail);
                result.push(combination);
            }
        }
        result
    }
}
