//! Metric Series
//!
//! Time series accumulated across a run, in the shape plotting tools expect:
//! one entry per generation, with population counts also carrying the
//! initial population as their first entry.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Per-generation metric series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Forager population at the start of each generation, plus the final one
    pub population_counts: Vec<usize>,
    /// Predator population at the start of each generation, plus the final one
    pub predator_counts: Vec<usize>,
    pub remaining_food: Vec<usize>,
    pub satiation_rounds: Vec<u32>,
    pub average_energy: Vec<f64>,
    pub average_speed: Vec<f64>,
    pub average_size: Vec<f64>,
    /// Mean centre-proximity fitness of the forager survivors
    #[serde(default)]
    pub average_fitness: Vec<f64>,
    pub speed_distributions: Vec<Vec<i64>>,
    pub size_distributions: Vec<Vec<f64>>,
    pub predator_average_energy: Vec<f64>,
    pub predator_average_speed: Vec<f64>,
    pub predator_average_size: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub position_traces: Vec<Vec<Position>>,
}

impl MetricSeries {
    /// Start a series with the initial population sizes
    pub fn new(initial_agents: usize, initial_predators: usize) -> Self {
        Self {
            population_counts: vec![initial_agents],
            predator_counts: vec![initial_predators],
            ..Self::default()
        }
    }

    /// Number of generations recorded
    pub fn generations(&self) -> usize {
        self.remaining_food.len()
    }

    /// First generation whose forager survivors were zero, if any
    pub fn extinction_generation(&self) -> Option<u64> {
        self.population_counts
            .iter()
            .skip(1)
            .position(|&count| count == 0)
            .map(|index| index as u64)
    }
}

/// Final result of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub generations: u64,
    pub final_population: usize,
    pub final_predators: usize,
    /// Generation after which the forager population reached zero
    pub extinct_at: Option<u64>,
    pub series: MetricSeries,
}

impl RunSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
