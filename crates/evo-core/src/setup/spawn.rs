//! Population Spawning
//!
//! Founders of each species start with the configured traits at uniformly
//! random cells.

use std::fmt;

use crate::components::{Entity, Species};
use crate::config::Config;
use crate::rng::SimRng;

/// Spawn `count` founders of `species`
pub fn spawn_population(species: Species, count: usize, config: &Config, rng: &mut SimRng) -> Vec<Entity> {
    let profile = config.species(species);
    let traits = profile.founder_traits();
    (0..count)
        .map(|_| {
            let position = rng.position(config.world.width, config.world.height);
            Entity::spawn(species, position, traits, profile)
        })
        .collect()
}

/// Summary of the initial populations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSummary {
    pub agents: usize,
    pub predators: usize,
}

impl fmt::Display for SpawnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} foragers, {} predators", self.agents, self.predators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_population() {
        let config = Config::default();
        let mut rng = SimRng::seed_from_u64(12345);
        let agents = spawn_population(Species::Forager, 10, &config, &mut rng);

        assert_eq!(agents.len(), 10);
        for agent in &agents {
            assert_eq!(agent.speed, config.agents.starting_speed);
            assert_eq!(agent.size, config.agents.starting_size);
            assert_eq!(agent.energy, config.agents.starting_energy);
            assert!((0..=config.world.width).contains(&agent.position.x));
            assert!((0..=config.world.height).contains(&agent.position.y));
        }
    }

    #[test]
    fn test_spawn_predators_use_predator_profile() {
        let config = Config::default();
        let mut rng = SimRng::seed_from_u64(12345);
        let predators = spawn_population(Species::Predator, 3, &config, &mut rng);
        assert!(predators.iter().all(|p| p.speed == config.predators.starting_speed));
        assert!(predators.iter().all(|p| p.species == Species::Predator));
    }

    #[test]
    fn test_summary_display() {
        let summary = SpawnSummary { agents: 10, predators: 2 };
        assert_eq!(summary.to_string(), "10 foragers, 2 predators");
    }
}
