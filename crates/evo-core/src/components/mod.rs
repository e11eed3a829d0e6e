//! Simulation Components
//!
//! The entity record, its heritable traits, mutation tables and the food grid.

pub mod entity;
pub mod food;
pub mod mutation;

pub use entity::{distance, Entity, Species, Traits};
pub use food::FoodGrid;
pub use mutation::{mutate, MutationConfig, WeightedEntry, WeightedTable};
