//! Natural Selection Simulation Engine
//!
//! Foragers (and optionally predators) look for food on a 2D grid, spend
//! energy moving, and reproduce with mutated speed and size. Each call to
//! [`Environment::step`] advances one generation.
//!
//! # Modules
//!
//! - [`components`]: entity record, traits, mutation tables, food grid
//! - [`systems`]: foraging, satiation loop, predation, culling, reproduction
//! - [`environment`]: the generation state machine
//! - [`output`]: metric accumulation and JSON export
//! - [`driver`]: multi-generation runs

pub mod components;
pub mod config;
pub mod driver;
pub mod environment;
pub mod output;
pub mod rng;
pub mod setup;
pub mod systems;

pub use components::{distance, Entity, FoodGrid, MutationConfig, Species, Traits, WeightedTable};
pub use config::{Config, ConfigError, SpeciesConfig, DEFAULT_CONFIG_PATH};
pub use driver::{simulate, Simulation};
pub use environment::Environment;
pub use rng::SimRng;
pub use systems::{forage_step, ForageOutcome, OffspringPlacement, PredationPolicy, ReproductionMode, SelectionPolicy};

pub use evo_events::{GenerationReport, MetricSeries, PopulationStats, Position, RunSummary, WorldSnapshot};
