//! Culling
//!
//! Hard energy threshold applied after foraging. The survivor set is built
//! as a new collection; nothing is removed while iterating.

use crate::components::Entity;

/// Keep only entities with positive energy that were not eaten
pub fn cull(population: Vec<Entity>) -> Vec<Entity> {
    population.into_iter().filter(Entity::is_viable).collect()
}
