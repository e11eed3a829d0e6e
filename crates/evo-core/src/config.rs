//! Configuration System
//!
//! Loads simulation parameters from a TOML file. Every section has defaults,
//! so a file only needs to list what it changes. A loaded configuration is
//! validated before any environment is built from it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::components::entity::{Species, Traits};
use crate::components::mutation::{MutationConfig, WeightedTable};
use crate::systems::predation::PredationPolicy;
use crate::systems::reproduction::{OffspringPlacement, ReproductionMode, SelectionPolicy};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "natural_selection.toml";

/// Largest accepted width or height. Distances between in-bounds cells
/// (and each unit step toward them) stay well inside `i64`.
pub const MAX_DIMENSION: i64 = i64::MAX / 4;

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub world: WorldConfig,
    pub reproduction: ReproductionConfig,
    pub predation: PredationConfig,
    pub agents: SpeciesConfig,
    pub predators: SpeciesConfig,
}

/// Run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub generations: u64,
    /// Upper bound on satiation rounds within one generation
    pub max_satiation_rounds: u32,
    /// Keep the end-of-foraging forager positions of every generation
    pub record_positions: bool,
}

/// Grid and population size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: i64,
    pub height: i64,
    pub initial_agents: usize,
    pub food_per_generation: usize,
}

/// How the next generation is produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReproductionConfig {
    pub mode: ReproductionMode,
    pub selection: SelectionPolicy,
    pub placement: OffspringPlacement,
    /// Smallest size an offspring can have
    pub size_floor: f64,
}

/// Predator population and how it interacts with foragers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredationConfig {
    pub policy: PredationPolicy,
    /// Initial predators as a fraction of `world.initial_agents`
    pub initial_fraction: f64,
}

/// Constants for one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub starting_energy: f64,
    pub starting_speed: i64,
    pub starting_size: f64,
    /// `movement_cost = speed * size^movement_cost_exponent`
    pub movement_cost_exponent: f64,
    pub food_reward: f64,
    #[serde(default)]
    pub food_reward_exponent: f64,
    pub stationary_penalty: f64,
    #[serde(default)]
    pub stationary_penalty_exponent: f64,
    /// Share of survivors that get a reproduction draw
    #[serde(default = "default_reproduction_fraction")]
    pub reproduction_fraction: f64,
    pub mutation: MutationConfig,
}

fn default_reproduction_fraction() -> f64 {
    1.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            generations: 100,
            max_satiation_rounds: 100_000,
            record_positions: false,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            initial_agents: 10,
            food_per_generation: 50,
        }
    }
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            mode: ReproductionMode::default(),
            selection: SelectionPolicy::default(),
            placement: OffspringPlacement::default(),
            size_floor: 0.1,
        }
    }
}

impl Default for PredationConfig {
    fn default() -> Self {
        Self {
            policy: PredationPolicy::default(),
            initial_fraction: 0.0,
        }
    }
}

impl SpeciesConfig {
    /// Default forager constants
    pub fn forager() -> Self {
        Self {
            starting_energy: 10_000.0,
            starting_speed: 1,
            starting_size: 10.0,
            movement_cost_exponent: 3.0,
            food_reward: 13_000.0,
            food_reward_exponent: 0.0,
            stationary_penalty: 1_000.0,
            stationary_penalty_exponent: 0.0,
            reproduction_fraction: 1.0,
            mutation: MutationConfig::default(),
        }
    }

    /// Default predator constants: faster and larger, half the survivors breed
    pub fn predator() -> Self {
        Self {
            starting_energy: 10_000.0,
            starting_speed: 2,
            starting_size: 12.0,
            movement_cost_exponent: 2.0,
            food_reward: 13_000.0,
            food_reward_exponent: 0.0,
            stationary_penalty: 1_000.0,
            stationary_penalty_exponent: 0.0,
            reproduction_fraction: 0.5,
            mutation: MutationConfig {
                speed_deltas: WeightedTable::new([(0, 10.0), (1, 1.0)]),
                size_multipliers: WeightedTable::new([(0.9, 1.0), (1.0, 8.0), (1.1, 1.0)]),
            },
        }
    }

    /// Traits of the initial population
    pub fn founder_traits(&self) -> Traits {
        Traits {
            speed: self.starting_speed,
            size: self.starting_size,
        }
    }

    pub fn movement_cost(&self, traits: Traits) -> f64 {
        traits.speed as f64 * traits.size.powf(self.movement_cost_exponent)
    }

    pub fn food_reward(&self, traits: Traits) -> f64 {
        self.food_reward * traits.size.powf(self.food_reward_exponent)
    }

    pub fn stationary_penalty(&self, traits: Traits) -> f64 {
        self.stationary_penalty * traits.size.powf(self.stationary_penalty_exponent)
    }

    fn validate(&self, prefix: &str, size_floor: f64) -> Result<(), ConfigError> {
        if self.starting_energy <= 0.0 || !self.starting_energy.is_finite() {
            return Err(ConfigError::invalid(
                format!("{prefix}.starting_energy"),
                "must be positive, otherwise every entity starts non-viable",
            ));
        }
        if self.starting_speed < 1 {
            return Err(ConfigError::invalid(format!("{prefix}.starting_speed"), "must be at least 1"));
        }
        if self.starting_size < size_floor || !self.starting_size.is_finite() {
            return Err(ConfigError::invalid(
                format!("{prefix}.starting_size"),
                format!("must be at least the size floor {size_floor}"),
            ));
        }
        let constants = [
            ("movement_cost_exponent", self.movement_cost_exponent),
            ("food_reward", self.food_reward),
            ("food_reward_exponent", self.food_reward_exponent),
            ("stationary_penalty", self.stationary_penalty),
            ("stationary_penalty_exponent", self.stationary_penalty_exponent),
        ];
        if let Some((name, _)) = constants.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::invalid(format!("{prefix}.{name}"), "must be a finite number"));
        }
        let fraction = self.reproduction_fraction;
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(ConfigError::invalid(
                format!("{prefix}.reproduction_fraction"),
                "must be in (0, 1]",
            ));
        }
        self.mutation.validate(prefix)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            world: WorldConfig::default(),
            reproduction: ReproductionConfig::default(),
            predation: PredationConfig::default(),
            agents: SpeciesConfig::forager(),
            predators: SpeciesConfig::predator(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Render this configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Constant table for a species
    pub fn species(&self, species: Species) -> &SpeciesConfig {
        match species {
            Species::Forager => &self.agents,
            Species::Predator => &self.predators,
        }
    }

    /// Number of predators spawned alongside the initial foragers
    pub fn initial_predators(&self) -> usize {
        (self.world.initial_agents as f64 * self.predation.initial_fraction).round() as usize
    }

    /// Number of cells in `[0,width] x [0,height]`; zero for negative dimensions
    pub fn cell_count(&self) -> u128 {
        let cells = |extent: i64| if extent < 0 { 0 } else { extent as u128 + 1 };
        cells(self.world.width) * cells(self.world.height)
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width < 0 {
            return Err(ConfigError::invalid("world.width", "must not be negative"));
        }
        if self.world.height < 0 {
            return Err(ConfigError::invalid("world.height", "must not be negative"));
        }
        if self.world.width > MAX_DIMENSION {
            return Err(ConfigError::invalid("world.width", format!("must not exceed {MAX_DIMENSION}")));
        }
        if self.world.height > MAX_DIMENSION {
            return Err(ConfigError::invalid("world.height", format!("must not exceed {MAX_DIMENSION}")));
        }
        if self.world.food_per_generation as u128 > self.cell_count() {
            return Err(ConfigError::invalid(
                "world.food_per_generation",
                format!(
                    "{} food items do not fit on {} cells",
                    self.world.food_per_generation,
                    self.cell_count()
                ),
            ));
        }
        if self.simulation.max_satiation_rounds == 0 {
            return Err(ConfigError::invalid("simulation.max_satiation_rounds", "must be at least 1"));
        }
        if self.reproduction.size_floor <= 0.0 || !self.reproduction.size_floor.is_finite() {
            return Err(ConfigError::invalid("reproduction.size_floor", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.predation.initial_fraction) {
            return Err(ConfigError::invalid("predation.initial_fraction", "must be in [0, 1]"));
        }

        self.agents.validate("agents", self.reproduction.size_floor)?;
        self.predators.validate("predators", self.reproduction.size_floor)
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
