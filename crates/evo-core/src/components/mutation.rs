//! Mutation Tables
//!
//! Offspring traits are drawn from small discrete weighted distributions:
//! an additive delta for speed and a multiplier for size.

use serde::{Deserialize, Serialize};

use super::entity::Traits;
use crate::config::ConfigError;
use crate::rng::SimRng;

/// One outcome of a weighted table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    pub value: T,
    pub weight: f64,
}

/// A small discrete distribution over values
///
/// Serialized as a plain list of `{ value, weight }` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedTable<T> {
    entries: Vec<WeightedEntry<T>>,
}

impl<T: Copy> WeightedTable<T> {
    pub fn new(entries: impl IntoIterator<Item = (T, f64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(value, weight)| WeightedEntry { value, weight })
                .collect(),
        }
    }

    /// A table that always yields `value`
    pub fn constant(value: T) -> Self {
        Self::new([(value, 1.0)])
    }

    pub fn entries(&self) -> &[WeightedEntry<T>] {
        &self.entries
    }

    /// Draw a value; `None` if no entry has positive weight
    pub fn draw(&self, rng: &mut SimRng) -> Option<T> {
        let weights: Vec<f64> = self.entries.iter().map(|e| e.weight).collect();
        rng.weighted_index(&weights).map(|i| self.entries[i].value)
    }

    pub(crate) fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::invalid(field, "table must have at least one entry"));
        }
        if let Some(entry) = self.entries.iter().find(|e| e.weight < 0.0 || !e.weight.is_finite()) {
            return Err(ConfigError::invalid(
                field,
                format!("weights must be finite and non-negative, got {}", entry.weight),
            ));
        }
        if self.entries.iter().map(|e| e.weight).sum::<f64>() <= 0.0 {
            return Err(ConfigError::invalid(field, "total weight must be positive"));
        }
        Ok(())
    }
}

/// Mutation tables for one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Added to the parent's speed
    pub speed_deltas: WeightedTable<i64>,
    /// Multiplied into the parent's size
    pub size_multipliers: WeightedTable<f64>,
}

impl MutationConfig {
    /// Offspring are exact copies of their parent
    pub fn none() -> Self {
        Self {
            speed_deltas: WeightedTable::constant(0),
            size_multipliers: WeightedTable::constant(1.0),
        }
    }

    pub(crate) fn validate(&self, prefix: &str) -> Result<(), ConfigError> {
        self.speed_deltas.validate(&format!("{prefix}.mutation.speed_deltas"))?;
        let field = format!("{prefix}.mutation.size_multipliers");
        self.size_multipliers.validate(&field)?;
        if let Some(entry) = self
            .size_multipliers
            .entries()
            .iter()
            .find(|e| e.value <= 0.0 || !e.value.is_finite())
        {
            return Err(ConfigError::invalid(
                field,
                format!("multipliers must be positive, got {}", entry.value),
            ));
        }
        Ok(())
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            speed_deltas: WeightedTable::new([(0, 10.0), (1, 2.0), (2, 1.0)]),
            size_multipliers: WeightedTable::new([(0.85, 1.0), (1.0, 8.0), (1.15, 1.0)]),
        }
    }
}

/// Produce offspring traits from a parent's traits.
///
/// Size is clamped to `size_floor` after the multiplier is applied.
pub fn mutate(parent: Traits, mutation: &MutationConfig, size_floor: f64, rng: &mut SimRng) -> Traits {
    let delta = mutation.speed_deltas.draw(rng).unwrap_or(0);
    let multiplier = mutation.size_multipliers.draw(rng).unwrap_or(1.0);
    Traits {
        speed: parent.speed + delta,
        size: (parent.size * multiplier).max(size_floor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let mutation = MutationConfig::default();
        assert_eq!(mutation.speed_deltas.entries().len(), 3);
        assert_eq!(mutation.size_multipliers.entries()[1].value, 1.0);
        assert!(mutation.validate("agents").is_ok());
    }

    #[test]
    fn test_mutate_stays_within_table() {
        let mutation = MutationConfig::default();
        let mut rng = SimRng::seed_from_u64(5);
        let parent = Traits { speed: 1, size: 10.0 };
        for _ in 0..200 {
            let child = mutate(parent, &mutation, 0.1, &mut rng);
            assert!([1, 2, 3].contains(&child.speed));
            assert!([8.5, 10.0, 11.5].iter().any(|s| (child.size - s).abs() < 1e-9));
        }
    }

    #[test]
    fn test_mutate_respects_size_floor() {
        let mutation = MutationConfig {
            speed_deltas: WeightedTable::constant(0),
            size_multipliers: WeightedTable::constant(0.5),
        };
        let mut rng = SimRng::seed_from_u64(9);
        let mut traits = Traits { speed: 1, size: 1.0 };
        for _ in 0..20 {
            traits = mutate(traits, &mutation, 0.1, &mut rng);
            assert!(traits.size >= 0.1);
        }
        assert_eq!(traits.size, 0.1);
    }

    #[test]
    fn test_no_mutation_is_identity() {
        let mut rng = SimRng::seed_from_u64(1);
        let parent = Traits { speed: 4, size: 2.5 };
        assert_eq!(mutate(parent, &MutationConfig::none(), 0.1, &mut rng), parent);
    }

    #[test]
    fn test_table_validation() {
        let empty: WeightedTable<i64> = WeightedTable::new([]);
        assert!(empty.validate("t").is_err());

        let zero = WeightedTable::new([(1, 0.0), (2, 0.0)]);
        assert!(zero.validate("t").is_err());

        let negative = WeightedTable::new([(1, -1.0), (2, 3.0)]);
        assert!(negative.validate("t").is_err());

        let bad_multiplier = MutationConfig {
            speed_deltas: WeightedTable::constant(0),
            size_multipliers: WeightedTable::new([(0.0, 1.0)]),
        };
        assert!(bad_multiplier.validate("agents").is_err());
    }

    #[test]
    fn test_table_toml_shape() {
        #[derive(Deserialize)]
        struct Wrapper {
            deltas: WeightedTable<i64>,
        }
        let parsed: Wrapper = toml::from_str(
            "deltas = [{ value = 0, weight = 10 }, { value = 1, weight = 2 }]",
        )
        .unwrap();
        assert_eq!(parsed.deltas, WeightedTable::new([(0, 10.0), (1, 2.0)]));
    }
}
