//! Metrics Recording
//!
//! Turns each generation's report into entries of the run's metric series.

use evo_events::{GenerationReport, MetricSeries, PopulationStats};

use crate::components::Entity;
use crate::systems::center_fitness;

/// Survivor statistics for one population
pub fn population_stats(population: &[Entity]) -> PopulationStats {
    PopulationStats::from_samples(population.iter().map(|e| (e.energy, e.speed, e.size)))
}

/// Mean centre-proximity fitness of a population on a `width x height` grid
pub fn average_fitness(population: &[Entity], width: i64, height: i64) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let total: f64 = population
        .iter()
        .map(|e| center_fitness(e.position, width, height))
        .sum();
    total / population.len() as f64
}

/// Accumulates per-generation metrics over a run
#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    series: MetricSeries,
    record_positions: bool,
}

impl MetricsRecorder {
    pub fn new(initial_agents: usize, initial_predators: usize, record_positions: bool) -> Self {
        Self {
            series: MetricSeries::new(initial_agents, initial_predators),
            record_positions,
        }
    }

    pub fn records_positions(&self) -> bool {
        self.record_positions
    }

    /// Append one generation
    pub fn record(&mut self, report: &GenerationReport) {
        let series = &mut self.series;

        series.remaining_food.push(report.remaining_food);
        series.satiation_rounds.push(report.satiation_rounds);

        series.average_energy.push(report.agents.average_energy);
        series.average_speed.push(report.agents.average_speed);
        series.average_size.push(report.agents.average_size);
        series.average_fitness.push(report.average_fitness);
        series.speed_distributions.push(report.agents.speeds.clone());
        series.size_distributions.push(report.agents.sizes.clone());

        series.predator_average_energy.push(report.predators.average_energy);
        series.predator_average_speed.push(report.predators.average_speed);
        series.predator_average_size.push(report.predators.average_size);

        if self.record_positions {
            series.position_traces.push(report.foraged_positions.clone());
        }

        series.population_counts.push(report.next_agent_count);
        series.predator_counts.push(report.next_predator_count);
    }

    pub fn series(&self) -> &MetricSeries {
        &self.series
    }

    pub fn into_series(self) -> MetricSeries {
        self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_events::Position;

    fn report(generation: u64, survivors: PopulationStats, next: usize) -> GenerationReport {
        GenerationReport {
            generation,
            satiation_rounds: 4,
            remaining_food: 7,
            agents: survivors,
            average_fitness: 0.25,
            predators: PopulationStats::empty(),
            next_agent_count: next,
            next_predator_count: 0,
            foraged_positions: vec![Position::new(1, 2)],
        }
    }

    #[test]
    fn test_record_appends_everything() {
        let mut recorder = MetricsRecorder::new(2, 0, false);
        let stats = PopulationStats::from_samples(vec![(10.0, 1, 2.0), (20.0, 2, 4.0)]);
        recorder.record(&report(0, stats, 4));

        let series = recorder.series();
        assert_eq!(series.population_counts, vec![2, 4]);
        assert_eq!(series.predator_counts, vec![0, 0]);
        assert_eq!(series.remaining_food, vec![7]);
        assert_eq!(series.satiation_rounds, vec![4]);
        assert_eq!(series.average_energy, vec![15.0]);
        assert_eq!(series.average_speed, vec![1.5]);
        assert_eq!(series.average_fitness, vec![0.25]);
        assert_eq!(series.speed_distributions, vec![vec![1, 2]]);
        assert_eq!(series.size_distributions, vec![vec![2.0, 4.0]]);
        assert_eq!(series.predator_average_energy, vec![0.0]);
        assert!(series.position_traces.is_empty());
    }

    #[test]
    fn test_extinct_generation_records_zeros() {
        let mut recorder = MetricsRecorder::new(3, 0, false);
        recorder.record(&report(0, PopulationStats::empty(), 0));

        let series = recorder.into_series();
        assert_eq!(series.population_counts, vec![3, 0]);
        assert_eq!(series.average_energy, vec![0.0]);
        assert_eq!(series.average_size, vec![0.0]);
        assert_eq!(series.speed_distributions, vec![Vec::<i64>::new()]);
    }

    #[test]
    fn test_average_fitness() {
        use crate::components::{Species, Traits};
        use crate::config::SpeciesConfig;

        let at = |x, y| {
            Entity::spawn(
                Species::Forager,
                Position::new(x, y),
                Traits { speed: 1, size: 1.0 },
                &SpeciesConfig::forager(),
            )
        };

        assert_eq!(average_fitness(&[], 50, 50), 0.0);
        // Distances 5 and 10 from (25, 25); the entity on the centre counts as 0
        let population = [at(28, 29), at(25, 35), at(25, 25)];
        assert!((average_fitness(&population, 50, 50) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_position_traces_when_enabled() {
        let mut recorder = MetricsRecorder::new(1, 0, true);
        assert!(recorder.records_positions());
        recorder.record(&report(0, PopulationStats::empty(), 0));
        assert_eq!(recorder.series().position_traces, vec![vec![Position::new(1, 2)]]);
    }
}
