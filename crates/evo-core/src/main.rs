//! Natural Selection Simulation
//!
//! Runs the engine for a number of generations, logs progress and
//! optionally writes the collected series as JSON for plotting.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evo_core::output::write_json;
use evo_core::{Config, PredationPolicy, Simulation, DEFAULT_CONFIG_PATH};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "natural_selection")]
#[command(about = "Evolve foragers on a grid over many generations")]
struct Args {
    /// TOML configuration file (defaults to natural_selection.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations to simulate
    #[arg(long)]
    generations: Option<u64>,

    /// Initial forager count
    #[arg(long)]
    agents: Option<usize>,

    /// Food items placed each generation
    #[arg(long)]
    food: Option<usize>,

    /// Initial predators as a fraction of the forager count
    #[arg(long)]
    predator_fraction: Option<f64>,

    /// Predators eat foragers instead of only competing for food
    #[arg(long)]
    hunt: bool,

    /// Interval between progress lines (in generations)
    #[arg(long, default_value_t = 10)]
    progress_interval: u64,

    /// Write the run summary and metric series to this JSON file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(generations) = self.generations {
            config.simulation.generations = generations;
        }
        if let Some(agents) = self.agents {
            config.world.initial_agents = agents;
        }
        if let Some(food) = self.food {
            config.world.food_per_generation = food;
        }
        if let Some(fraction) = self.predator_fraction {
            config.predation.initial_fraction = fraction;
        }
        if self.hunt {
            config.predation.policy = PredationPolicy::Hunt;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    args.apply(&mut config);

    let simulation = Simulation::new(config)?;
    let total = simulation.generations();
    let interval = args.progress_interval.max(1);

    tracing::info!("Starting simulation for {} generations", total);

    let summary = simulation.run_with(|report, _| {
        let done = report.generation + 1;
        if done % interval == 0 || done == total {
            tracing::info!(
                "Generation {} / {}: {} foragers (avg speed {:.2}, avg size {:.2}, avg fitness {:.4}), {} predators, {} food left",
                done,
                total,
                report.next_agent_count,
                report.agents.average_speed,
                report.agents.average_size,
                report.average_fitness,
                report.next_predator_count,
                report.remaining_food
            );
        }
    });

    match summary.extinct_at {
        Some(generation) => tracing::info!("Foragers went extinct in generation {}", generation),
        None => tracing::info!(
            "Simulation complete: {} foragers, {} predators after {} generations",
            summary.final_population,
            summary.final_predators,
            summary.generations
        ),
    }

    if let Some(path) = &args.output {
        write_json(path, &summary)?;
        tracing::info!("Wrote {}", path.display());
    }

    Ok(())
}
