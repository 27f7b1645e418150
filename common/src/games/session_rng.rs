use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded source of randomness for one game session. The same seed and the same
/// inputs reproduce the same tile placements.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniform index into a collection of `len` items, `None` for an empty one.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.random_range(0..len))
    }

    /// True with probability `1 / n`.
    pub fn one_in(&mut self, n: u32) -> bool {
        n > 0 && self.rng.random_range(0..n) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        let left: Vec<usize> = (0..16).filter_map(|_| a.pick_index(16)).collect();
        let right: Vec<usize> = (0..16).filter_map(|_| b.pick_index(16)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_pick_index_empty() {
        let mut rng = SessionRng::new(1);
        assert_eq!(rng.pick_index(0), None);
    }

    #[test]
    fn test_one_in_one_always_true() {
        let mut rng = SessionRng::new(3);
        assert!((0..32).all(|_| rng.one_in(1)));
        assert!(!rng.one_in(0));
    }
}
