//! Shared report types for the natural-selection simulation.
//!
//! This crate contains pure data structures with no simulation logic. The
//! engine in `evo-core` produces them; plotting, animation and export tools
//! consume them.

pub mod position;
pub mod series;
pub mod snapshot;

pub use position::Position;

pub use series::{MetricSeries, RunSummary};

pub use snapshot::{GenerationReport, PopulationStats, WorldSnapshot};
