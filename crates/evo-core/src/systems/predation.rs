//! Predation
//!
//! After every satiation round, predators that share a cell with a forager
//! get to eat. What "eat" means is a policy choice.

use serde::{Deserialize, Serialize};

use crate::components::{Entity, FoodGrid};

/// What happens when a predator lands on a forager's cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredationPolicy {
    /// The predator eats the food at that cell, if any. Foragers are never
    /// removed; predators only compete for food.
    #[default]
    FoodCompetition,
    /// The predator eats the forager, which is then culled.
    Hunt,
}

/// Apply one round of predator/forager encounters. Returns the number of meals.
///
/// Only viable predators take part; a predator whose energy ran out during
/// this round's foraging cannot recover it here.
pub fn resolve_predation(
    policy: PredationPolicy,
    agents: &mut [Entity],
    predators: &mut [Entity],
    food: &mut FoodGrid,
) -> usize {
    let mut meals = 0;

    // A predator at or below zero energy is already dead and eats nothing
    for predator in predators.iter_mut().filter(|p| p.is_viable()) {
        match policy {
            PredationPolicy::FoodCompetition => {
                let shares_cell = agents
                    .iter()
                    .any(|agent| !agent.eaten && agent.position == predator.position);
                if shares_cell && food.consume_at(predator.position) {
                    predator.eat();
                    meals += 1;
                }
            }
            PredationPolicy::Hunt => {
                let prey = agents
                    .iter_mut()
                    .find(|agent| !agent.eaten && agent.position == predator.position);
                if let Some(prey) = prey {
                    prey.eaten = true;
                    prey.satiated = true;
                    predator.eat();
                    meals += 1;
                }
            }
        }
    }

    meals
}
