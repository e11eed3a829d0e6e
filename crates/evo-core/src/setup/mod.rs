//! World Setup
//!
//! Initial population spawning.

pub mod spawn;

pub use spawn::{spawn_population, SpawnSummary};
