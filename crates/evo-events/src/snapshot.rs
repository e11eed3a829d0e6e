//! Snapshot Types
//!
//! Per-generation output of the engine: the survivor statistics of a
//! finished generation and the positions a renderer needs to draw the world.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Aggregate statistics over the survivors of one species
///
/// An empty population reports zero averages and empty distributions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub count: usize,
    pub average_energy: f64,
    pub average_speed: f64,
    pub average_size: f64,
    #[serde(default)]
    pub energies: Vec<f64>,
    #[serde(default)]
    pub speeds: Vec<i64>,
    #[serde(default)]
    pub sizes: Vec<f64>,
}

impl PopulationStats {
    /// Statistics of a population with no members
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build statistics from `(energy, speed, size)` samples
    pub fn from_samples(samples: impl IntoIterator<Item = (f64, i64, f64)>) -> Self {
        let mut stats = Self::empty();
        for (energy, speed, size) in samples {
            stats.energies.push(energy);
            stats.speeds.push(speed);
            stats.sizes.push(size);
        }

        stats.count = stats.energies.len();
        if stats.count > 0 {
            let n = stats.count as f64;
            stats.average_energy = stats.energies.iter().sum::<f64>() / n;
            stats.average_speed = stats.speeds.iter().map(|&s| s as f64).sum::<f64>() / n;
            stats.average_size = stats.sizes.iter().sum::<f64>() / n;
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Everything observed while advancing one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Zero-based index of the generation that was just simulated
    pub generation: u64,
    /// Number of satiation rounds until every entity was satiated
    pub satiation_rounds: u32,
    /// Food left on the grid after foraging
    pub remaining_food: usize,
    /// Forager survivors (after culling, before reproduction)
    pub agents: PopulationStats,
    /// Mean centre-proximity fitness of the forager survivors, 0 when none survived
    #[serde(default)]
    pub average_fitness: f64,
    /// Predator survivors (after culling, before reproduction)
    pub predators: PopulationStats,
    /// Size of the forager population entering the next generation
    pub next_agent_count: usize,
    /// Size of the predator population entering the next generation
    pub next_predator_count: usize,
    /// Forager positions at the end of foraging, when tracing is enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foraged_positions: Vec<Position>,
}

/// Positions of everything currently on the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Number of generations completed so far
    pub generation: u64,
    pub width: i64,
    pub height: i64,
    pub agents: Vec<Position>,
    #[serde(default)]
    pub predators: Vec<Position>,
    #[serde(default)]
    pub food: Vec<Position>,
}

impl WorldSnapshot {
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    pub fn predator_count(&self) -> usize {
        self.predators.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = PopulationStats::from_samples(Vec::new());
        assert_eq!(stats, PopulationStats::empty());
        assert_eq!(stats.average_energy, 0.0);
        assert_eq!(stats.average_speed, 0.0);
        assert_eq!(stats.average_size, 0.0);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_stats_averages() {
        let stats = PopulationStats::from_samples(vec![(10.0, 1, 2.0), (30.0, 3, 4.0)]);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_energy, 20.0);
        assert_eq!(stats.average_speed, 2.0);
        assert_eq!(stats.average_size, 3.0);
        assert_eq!(stats.speeds, vec![1, 3]);
        assert_eq!(stats.sizes, vec![2.0, 4.0]);
    }

    #[test]
    fn test_report_skips_empty_trace() {
        let report = GenerationReport {
            generation: 0,
            satiation_rounds: 3,
            remaining_food: 12,
            agents: PopulationStats::empty(),
            average_fitness: 0.0,
            predators: PopulationStats::empty(),
            next_agent_count: 0,
            next_predator_count: 0,
            foraged_positions: Vec::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("foraged_positions"));

        let parsed: GenerationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
