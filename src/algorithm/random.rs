use crate::spatial::grid::Direction;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible generation
///
/// All randomness of a session flows through one selector, so a seed fixes
/// the carve seed cell, every direction shuffle and the `Random` mode draw.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
    seed: u64,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this selector was created with
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform odd index in `1..=dimension - 2`
    ///
    /// `None` when the dimension leaves no interior (less than 3).
    pub fn odd_interior_index(&mut self, dimension: usize) -> Option<usize> {
        if dimension < 3 {
            return None;
        }
        let choices = (dimension - 1) / 2;
        Some(2 * self.rng.random_range(0..choices) + 1)
    }

    /// The four directions in a freshly shuffled order
    ///
    /// Drawn once per carve frame, never cached across frames.
    pub fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
    }

    /// Underlying generator for callers needing other draws
    pub const fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
