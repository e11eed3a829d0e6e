//! Seeded Randomness
//!
//! The single source of randomness for a simulation run. Spawn positions,
//! food placement, parent selection and mutation draws all come from one
//! `SimRng`, so a run is fully determined by its seed.

use evo_events::Position;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded random number generator threaded through the engine
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform position in `[0, width] x [0, height]`, bounds inclusive
    pub fn position(&mut self, width: i64, height: i64) -> Position {
        let x = self.0.gen_range(0..=width);
        let y = self.0.gen_range(0..=height);
        Position::new(x, y)
    }

    /// Uniform index into a collection of `len` items
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.0.gen_range(0..len))
    }

    /// Uniform float in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.0.gen()
    }

    /// Draw an index with probability proportional to its weight.
    ///
    /// Non-positive weights are never drawn. Returns `None` when there is
    /// nothing with positive weight to draw from.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        let r = self.unit() * total;
        let mut cumulative = 0.0;
        let mut last = None;
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            cumulative += w;
            last = Some(i);
            if r < cumulative {
                return Some(i);
            }
        }
        // Float rounding can leave r at the very top of the range
        last
    }
}
