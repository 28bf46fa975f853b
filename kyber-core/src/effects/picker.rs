//! Variant selection for swing and clash sounds

use rand::{Rng, RngCore};

/// Chooses which of `count` variants to play
///
/// Implementations must return an index below `count` (`count` is never 0).
pub trait VariantPicker {
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform random picker over any RNG
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: RngCore> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> VariantPicker for RandomPicker<R> {
    fn pick(&mut self, count: usize) -> usize {
        if count <= 1 {
            return 0;
        }
        self.rng.random_range(0..count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_picker_stays_in_range() {
        let mut picker = RandomPicker::new(SmallRng::seed_from_u64(7));
        let mut seen = [false; 5];
        for _ in 0..500 {
            let i = picker.pick(5);
            assert!(i < 5);
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_single_variant() {
        let mut picker = RandomPicker::new(SmallRng::seed_from_u64(1));
        assert_eq!(picker.pick(1), 0);
    }
}
