//! Entity Model
//!
//! Foragers and predators share one record. What differs between them is
//! the constant table in their `SpeciesConfig`, looked up by `Species` tag.

use evo_events::Position;
use serde::{Deserialize, Serialize};

use crate::config::SpeciesConfig;

/// Which population an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Forager,
    Predator,
}

/// Heritable traits, passed from parent to offspring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    /// Unit steps per satiation round
    pub speed: i64,
    pub size: f64,
}

/// An individual forager or predator
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub species: Species,
    pub position: Position,
    /// May drop below zero during foraging; culled afterwards
    pub energy: f64,
    pub speed: i64,
    pub size: f64,
    /// Set when the entity chose not to pursue food this round
    pub satiated: bool,
    /// Set when a hunting predator caught this entity
    pub eaten: bool,
    pub movement_cost: f64,
    pub food_reward: f64,
    pub stationary_penalty: f64,
}

impl Entity {
    /// Create an entity with starting energy and costs derived from its traits
    pub fn spawn(species: Species, position: Position, traits: Traits, profile: &SpeciesConfig) -> Self {
        Self {
            species,
            position,
            energy: profile.starting_energy,
            speed: traits.speed,
            size: traits.size,
            satiated: false,
            eaten: false,
            movement_cost: profile.movement_cost(traits),
            food_reward: profile.food_reward(traits),
            stationary_penalty: profile.stationary_penalty(traits),
        }
    }

    pub fn traits(&self) -> Traits {
        Traits {
            speed: self.speed,
            size: self.size,
        }
    }

    /// Survives the cull: positive energy and not caught by a predator
    pub fn is_viable(&self) -> bool {
        self.energy > 0.0 && !self.eaten
    }

    /// Whether food `distance` away is worth pursuing this round
    pub fn will_pursue(&self, distance: i64) -> bool {
        self.speed > 0 && (distance as f64) < self.energy * self.speed as f64
    }

    /// Apply the reward of one meal
    pub fn eat(&mut self) {
        self.energy += self.food_reward;
    }
}

/// Manhattan distance between two cells
pub fn distance(a: Position, b: Position) -> i64 {
    a.manhattan_distance(b)
}
