//! Environment
//!
//! Owns the grid, both populations, the food and the RNG, and advances the
//! simulation one generation at a time:
//!
//! 1. repopulate food
//! 2. forage until everyone is satiated (predation after each round)
//! 3. cull entities with no energy left
//! 4. record survivor metrics
//! 5. select parents and reproduce with mutation
//! 6. record the next generation's population sizes

use evo_events::{GenerationReport, MetricSeries, WorldSnapshot};

use crate::components::{Entity, FoodGrid, Species};
use crate::config::{Config, ConfigError};
use crate::output::{average_fitness, population_stats, MetricsRecorder};
use crate::rng::SimRng;
use crate::setup::{spawn_population, SpawnSummary};
use crate::systems::{cull, reproduce, run_satiation_loop, ReproductionParams};

/// The simulation world
#[derive(Debug, Clone)]
pub struct Environment {
    config: Config,
    rng: SimRng,
    agents: Vec<Entity>,
    predators: Vec<Entity>,
    food: FoodGrid,
    generation: u64,
    metrics: MetricsRecorder,
}

impl Environment {
    /// Validate `config` and spawn the founding populations
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SimRng::seed_from_u64(config.simulation.seed);
        let agents = spawn_population(Species::Forager, config.world.initial_agents, &config, &mut rng);
        let predators = spawn_population(Species::Predator, config.initial_predators(), &config, &mut rng);

        let summary = SpawnSummary {
            agents: agents.len(),
            predators: predators.len(),
        };
        tracing::info!(
            "Environment {}x{} seeded with {} (seed {})",
            config.world.width,
            config.world.height,
            summary,
            config.simulation.seed
        );

        let metrics = MetricsRecorder::new(agents.len(), predators.len(), config.simulation.record_positions);

        Ok(Self {
            config,
            rng,
            agents,
            predators,
            food: FoodGrid::new(),
            generation: 0,
            metrics,
        })
    }

    /// Advance one generation
    pub fn step(&mut self) -> GenerationReport {
        let world = &self.config.world;
        self.food
            .repopulate(world.food_per_generation, world.width, world.height, &mut self.rng);

        let satiation = run_satiation_loop(
            &mut self.agents,
            &mut self.predators,
            &mut self.food,
            self.config.predation.policy,
            self.config.simulation.max_satiation_rounds,
        );

        let foraged_positions = if self.metrics.records_positions() {
            self.agents.iter().map(|a| a.position).collect()
        } else {
            Vec::new()
        };

        let agent_survivors = cull(std::mem::take(&mut self.agents));
        let predator_survivors = cull(std::mem::take(&mut self.predators));
        let agent_stats = population_stats(&agent_survivors);
        let predator_stats = population_stats(&predator_survivors);
        let fitness = average_fitness(&agent_survivors, self.config.world.width, self.config.world.height);

        self.agents = reproduce(
            &agent_survivors,
            &ReproductionParams::for_species(Species::Forager, &self.config),
            &mut self.rng,
        );
        self.predators = reproduce(
            &predator_survivors,
            &ReproductionParams::for_species(Species::Predator, &self.config),
            &mut self.rng,
        );

        let report = GenerationReport {
            generation: self.generation,
            satiation_rounds: satiation.rounds,
            remaining_food: self.food.len(),
            agents: agent_stats,
            average_fitness: fitness,
            predators: predator_stats,
            next_agent_count: self.agents.len(),
            next_predator_count: self.predators.len(),
            foraged_positions,
        };
        self.metrics.record(&report);

        let counts = &self.metrics.series().population_counts;
        let was_alive = counts.len() >= 2 && counts[counts.len() - 2] > 0;
        if was_alive && report.agents.is_empty() {
            tracing::warn!("Foragers went extinct in generation {}", self.generation);
        }
        tracing::debug!(
            "Generation {}: {} rounds, {} meals, {} survivors -> {} foragers, {} predators, {} food left",
            self.generation,
            satiation.rounds,
            satiation.meals + satiation.predation_meals,
            report.agents.count,
            report.next_agent_count,
            report.next_predator_count,
            report.remaining_food
        );

        self.generation += 1;
        report
    }

    /// Positions of everything currently on the grid
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            generation: self.generation,
            width: self.config.world.width,
            height: self.config.world.height,
            agents: self.agents.iter().map(|a| a.position).collect(),
            predators: self.predators.iter().map(|p| p.position).collect(),
            food: self.food.positions().to_vec(),
        }
    }

    /// Generations completed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn agents(&self) -> &[Entity] {
        &self.agents
    }

    pub fn predators(&self) -> &[Entity] {
        &self.predators
    }

    pub fn food(&self) -> &FoodGrid {
        &self.food
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn series(&self) -> &MetricSeries {
        self.metrics.series()
    }

    pub fn into_series(self) -> MetricSeries {
        self.metrics.into_series()
    }
}
