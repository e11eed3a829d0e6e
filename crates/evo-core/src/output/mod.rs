//! Output
//!
//! Metric accumulation for external consumers and JSON export.

pub mod metrics;
pub mod writer;

pub use metrics::{average_fitness, population_stats, MetricsRecorder};
pub use writer::write_json;
