//! Simulation Systems
//!
//! The phases of a generation, in the order the environment runs them:
//! foraging rounds until satiation (with predation after each round),
//! culling, then selection and reproduction.

pub mod cull;
pub mod foraging;
pub mod predation;
pub mod reproduction;
pub mod satiation;

pub use cull::cull;
pub use foraging::{forage_step, manhattan_step, ForageOutcome};
pub use predation::{resolve_predation, PredationPolicy};
pub use reproduction::{
    center_fitness, draw_count, reproduce, OffspringPlacement, ParentSampler, ReproductionMode, ReproductionParams,
    SelectionPolicy,
};
pub use satiation::{run_satiation_loop, SatiationSummary};
