//! End-to-end runs: configuration files, multi-generation series and JSON export.

use std::io::Write;

use evo_core::output::write_json;
use evo_core::{simulate, Config, OffspringPlacement, PredationPolicy, RunSummary, SelectionPolicy, Simulation};

#[test]
fn test_reference_scenario() {
    let config = Config {
        simulation: evo_core::config::SimulationConfig {
            seed: 42,
            generations: 5,
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(config.world.width, 50);
    assert_eq!(config.world.height, 50);
    assert_eq!(config.world.initial_agents, 10);
    assert_eq!(config.world.food_per_generation, 50);

    let summary = simulate(config).unwrap();
    let series = &summary.series;

    assert_eq!(series.population_counts.len(), 6);
    assert_eq!(series.population_counts[0], 10);
    assert_eq!(series.remaining_food.len(), 5);
    assert!(series.remaining_food.iter().all(|&f| f <= 50));
    assert_eq!(series.average_speed.len(), 5);
    assert_eq!(series.speed_distributions.len(), 5);
}

#[test]
fn test_config_file_drives_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[simulation]
seed = 99
generations = 4

[world]
width = 20
height = 20
initial_agents = 6
food_per_generation = 30

[reproduction]
mode = "single"
selection = "energy_weighted"

[predation]
policy = "hunt"
initial_fraction = 0.5
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.predation.policy, PredationPolicy::Hunt);
    assert_eq!(config.initial_predators(), 3);

    let simulation = Simulation::new(config).unwrap();
    assert_eq!(simulation.environment().predators().len(), 3);

    let summary = simulation.run();
    assert_eq!(summary.seed, 99);
    assert_eq!(summary.generations, 4);
    assert_eq!(summary.series.predator_counts.len(), 5);
    assert_eq!(summary.series.predator_counts[0], 3);
}

#[test]
fn test_summary_written_as_json() {
    let mut config = Config::default();
    config.simulation.generations = 3;
    config.simulation.record_positions = true;
    let summary = simulate(config).unwrap();
    assert_eq!(summary.series.position_traces.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs").join("summary.json");
    write_json(&path, &summary).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let loaded = RunSummary::from_json(&content).unwrap();
    assert_eq!(loaded, summary);
}

#[test]
fn test_average_fitness_series() {
    let mut config = Config::default();
    config.simulation.generations = 3;
    config.reproduction.selection = SelectionPolicy::CenterProximity;
    config.reproduction.placement = OffspringPlacement::ParentMidpoint;
    let summary = simulate(config).unwrap();

    let fitness = &summary.series.average_fitness;
    assert_eq!(fitness.len(), 3);
    for (generation, &value) in fitness.iter().enumerate() {
        assert!(value.is_finite() && value >= 0.0);
        if summary.series.population_counts[generation + 1] == 0 {
            assert_eq!(value, 0.0);
        }
    }
    assert!(summary.to_json().unwrap().contains("\"average_fitness\""));
}

#[test]
fn test_invalid_config_rejected_before_running() {
    let mut config = Config::default();
    config.world.food_per_generation = 10_000;
    assert!(Simulation::new(config).is_err());

    let mut config = Config::default();
    config.world.width = i64::MAX;
    assert!(Simulation::new(config).is_err());
}
