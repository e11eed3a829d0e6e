//! Simulation Driver
//!
//! Runs an environment for a fixed number of generations and hands back the
//! accumulated series. Renderers and plotters hook in through `run_with`.

use evo_events::{GenerationReport, RunSummary};

use crate::config::{Config, ConfigError};
use crate::environment::Environment;

/// An environment plus the number of generations to run it for
#[derive(Debug, Clone)]
pub struct Simulation {
    environment: Environment,
    generations: u64,
}

impl Simulation {
    /// Build a simulation running `config.simulation.generations` generations
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let generations = config.simulation.generations;
        Ok(Self::from_environment(Environment::new(config)?, generations))
    }

    pub fn from_environment(environment: Environment, generations: u64) -> Self {
        Self {
            environment,
            generations,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Run every generation
    pub fn run(self) -> RunSummary {
        self.run_with(|_, _| {})
    }

    /// Run every generation, calling `observer` after each one
    pub fn run_with<F>(mut self, mut observer: F) -> RunSummary
    where
        F: FnMut(&GenerationReport, &Environment),
    {
        for _ in 0..self.generations {
            let report = self.environment.step();
            observer(&report, &self.environment);
        }

        let seed = self.environment.config().simulation.seed;
        let generations = self.environment.generation();
        let final_population = self.environment.agents().len();
        let final_predators = self.environment.predators().len();
        let series = self.environment.into_series();

        RunSummary {
            seed,
            generations,
            final_population,
            final_predators,
            extinct_at: series.extinction_generation(),
            series,
        }
    }
}

/// Build and run a simulation in one call
pub fn simulate(config: Config) -> Result<RunSummary, ConfigError> {
    Ok(Simulation::new(config)?.run())
}
