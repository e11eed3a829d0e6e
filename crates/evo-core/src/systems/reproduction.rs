//! Selection and Reproduction
//!
//! Builds the next generation from the survivors of the cull. Parents are
//! drawn with replacement; each draw yields a mutated offspring, and in
//! doubling mode also an unchanged copy of the parent. Every new entity
//! starts with full starting energy, at a fresh random position or at the
//! midpoint of two parents.

use evo_events::Position;
use serde::{Deserialize, Serialize};

use crate::components::{mutate, Entity, Species, Traits};
use crate::config::{Config, SpeciesConfig};
use crate::rng::SimRng;

/// How many entities each reproduction draw produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReproductionMode {
    /// A persisted copy of the parent plus a mutated offspring
    #[default]
    Doubling,
    /// A single mutated offspring
    Single,
}

/// How parents are drawn from the survivors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    Uniform,
    /// Proportional to remaining energy
    EnergyWeighted,
    /// Proportional to `1 / distance` from the grid centre; an entity
    /// exactly at the centre has zero fitness
    CenterProximity,
}

/// Where offspring of a draw are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffspringPlacement {
    /// A uniformly random cell per offspring
    #[default]
    Random,
    /// The midpoint (rounded down) of the drawn parent and a second parent
    /// drawn by the same selection policy
    ParentMidpoint,
}

/// Fitness from proximity to the grid centre: `1 / euclidean distance`,
/// zero for an entity exactly at the centre
pub fn center_fitness(position: Position, width: i64, height: i64) -> f64 {
    let d = position.euclidean_distance_to(width as f64 / 2.0, height as f64 / 2.0);
    if d == 0.0 {
        0.0
    } else {
        1.0 / d
    }
}

fn midpoint(a: Position, b: Position) -> Position {
    Position::new((a.x + b.x).div_euclid(2), (a.y + b.y).div_euclid(2))
}

/// Everything `reproduce` needs to know about one species
#[derive(Debug, Clone, Copy)]
pub struct ReproductionParams<'a> {
    pub species: Species,
    pub profile: &'a SpeciesConfig,
    pub mode: ReproductionMode,
    pub selection: SelectionPolicy,
    pub placement: OffspringPlacement,
    pub size_floor: f64,
    pub width: i64,
    pub height: i64,
}

impl<'a> ReproductionParams<'a> {
    pub fn for_species(species: Species, config: &'a Config) -> Self {
        Self {
            species,
            profile: config.species(species),
            mode: config.reproduction.mode,
            selection: config.reproduction.selection,
            placement: config.reproduction.placement,
            size_floor: config.reproduction.size_floor,
            width: config.world.width,
            height: config.world.height,
        }
    }

    fn spawn(&self, traits: Traits, position: Option<Position>, rng: &mut SimRng) -> Entity {
        let position = position.unwrap_or_else(|| rng.position(self.width, self.height));
        Entity::spawn(self.species, position, traits, self.profile)
    }
}

/// Number of reproduction draws for a survivor count.
///
/// `ceil(survivors * fraction)`, so any surviving population gets at least
/// one draw. No survivors means no draws.
pub fn draw_count(survivors: usize, fraction: f64) -> usize {
    if survivors == 0 {
        return 0;
    }
    // Tolerance keeps e.g. 10 * 0.3 from rounding up to 4
    let exact = survivors as f64 * fraction;
    ((exact - 1e-9).ceil() as usize).clamp(1, survivors)
}

/// Draws parent indices according to a selection policy
#[derive(Debug, Clone)]
pub struct ParentSampler {
    len: usize,
    weights: Option<Vec<f64>>,
}

impl ParentSampler {
    pub fn new(survivors: &[Entity], policy: SelectionPolicy, width: i64, height: i64) -> Self {
        let weights: Option<Vec<f64>> = match policy {
            SelectionPolicy::Uniform => None,
            SelectionPolicy::EnergyWeighted => Some(survivors.iter().map(|e| e.energy).collect()),
            SelectionPolicy::CenterProximity => Some(
                survivors
                    .iter()
                    .map(|e| center_fitness(e.position, width, height))
                    .collect(),
            ),
        };

        // Zero total fitness falls back to uniform draws
        let weights = weights.filter(|w| w.iter().any(|&x| x > 0.0));
        Self {
            len: survivors.len(),
            weights,
        }
    }

    pub fn sample(&self, rng: &mut SimRng) -> Option<usize> {
        match &self.weights {
            Some(weights) => rng.weighted_index(weights),
            None => rng.index(self.len),
        }
    }
}

/// Produce the next generation of one species from its survivors
pub fn reproduce(survivors: &[Entity], params: &ReproductionParams<'_>, rng: &mut SimRng) -> Vec<Entity> {
    let draws = draw_count(survivors.len(), params.profile.reproduction_fraction);
    let sampler = ParentSampler::new(survivors, params.selection, params.width, params.height);
    let per_draw = match params.mode {
        ReproductionMode::Doubling => 2,
        ReproductionMode::Single => 1,
    };

    let mut next = Vec::with_capacity(draws * per_draw);
    for _ in 0..draws {
        let Some(index) = sampler.sample(rng) else {
            break;
        };
        let parent = survivors[index].traits();
        let position = match params.placement {
            OffspringPlacement::Random => None,
            OffspringPlacement::ParentMidpoint => {
                let other = sampler.sample(rng).unwrap_or(index);
                Some(midpoint(survivors[index].position, survivors[other].position))
            }
        };

        if params.mode == ReproductionMode::Doubling {
            next.push(params.spawn(parent, position, rng));
        }
        let child = mutate(parent, &params.profile.mutation, params.size_floor, rng);
        next.push(params.spawn(child, position, rng));
    }

    next
}
