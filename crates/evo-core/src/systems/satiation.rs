//! Satiation Loop
//!
//! Rounds of foraging repeat until every participating entity chose to stay
//! put in the same round. Foragers move first, then predators on the same
//! food grid, then predator/forager encounters are resolved.

use crate::components::{Entity, FoodGrid};

use super::foraging::forage_step;
use super::predation::{resolve_predation, PredationPolicy};

/// What happened during one generation's satiation loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SatiationSummary {
    pub rounds: u32,
    /// Food items eaten by foraging entities of either species
    pub meals: usize,
    /// Meals from predator/forager encounters
    pub predation_meals: usize,
    /// The loop hit `max_rounds` before everyone was satiated
    pub hit_round_limit: bool,
}

/// Run foraging rounds until satiation or until `max_rounds` is reached.
pub fn run_satiation_loop(
    agents: &mut [Entity],
    predators: &mut [Entity],
    food: &mut FoodGrid,
    policy: PredationPolicy,
    max_rounds: u32,
) -> SatiationSummary {
    let mut summary = SatiationSummary::default();
    if agents.is_empty() && predators.is_empty() {
        return summary;
    }

    loop {
        summary.rounds += 1;
        let mut all_satiated = true;

        for entity in agents.iter_mut().chain(predators.iter_mut()) {
            if entity.eaten {
                continue;
            }
            let outcome = forage_step(entity, food);
            summary.meals += outcome.consumed.len();
            all_satiated &= outcome.satiated;
        }

        if !predators.is_empty() {
            summary.predation_meals += resolve_predation(policy, agents, predators, food);
        }

        if all_satiated {
            break;
        }
        if summary.rounds >= max_rounds {
            tracing::warn!(
                "Satiation loop stopped after {} rounds with entities still foraging",
                summary.rounds
            );
            summary.hit_round_limit = true;
            break;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Species, Traits};
    use crate::config::SpeciesConfig;
    use evo_events::Position;

    fn spawn(species: Species, x: i64, y: i64, speed: i64) -> Entity {
        let profile = SpeciesConfig {
            starting_energy: 1_000.0,
            movement_cost_exponent: 1.0,
            food_reward: 100.0,
            stationary_penalty: 5.0,
            ..SpeciesConfig::forager()
        };
        Entity::spawn(species, Position::new(x, y), Traits { speed, size: 1.0 }, &profile)
    }

    #[test]
    fn test_empty_populations_take_no_rounds() {
        let mut food = FoodGrid::from_positions([Position::new(1, 1)]);
        let summary = run_satiation_loop(&mut [], &mut [], &mut food, PredationPolicy::default(), 10);
        assert_eq!(summary.rounds, 0);
        assert_eq!(food.len(), 1);
    }

    #[test]
    fn test_loop_runs_until_food_is_gone() {
        let mut agents = vec![spawn(Species::Forager, 0, 0, 1)];
        let mut food = FoodGrid::from_positions([Position::new(3, 0), Position::new(3, 2)]);

        let summary = run_satiation_loop(&mut agents, &mut [], &mut food, PredationPolicy::default(), 100);

        // 3 rounds to the first item, 2 to the second, 1 to notice nothing is left
        assert_eq!(summary.rounds, 6);
        assert_eq!(summary.meals, 2);
        assert!(!summary.hit_round_limit);
        assert!(food.is_empty());
        assert!(agents[0].satiated);
        assert_eq!(agents[0].position, Position::new(3, 2));
        assert_eq!(agents[0].energy, 1_000.0 - 5.0 * 1.0 + 2.0 * 100.0 - 5.0);
    }

    #[test]
    fn test_satiated_entities_pay_every_round() {
        // The immobile forager idles while the other one walks
        let mut agents = vec![spawn(Species::Forager, 0, 0, 1), spawn(Species::Forager, 0, 0, 0)];
        let mut food = FoodGrid::from_positions([Position::new(2, 0)]);

        let summary = run_satiation_loop(&mut agents, &mut [], &mut food, PredationPolicy::default(), 100);

        assert_eq!(summary.rounds, 3);
        assert_eq!(agents[1].energy, 1_000.0 - 3.0 * 5.0);
    }

    #[test]
    fn test_round_limit() {
        let mut agents = vec![spawn(Species::Forager, 0, 0, 1)];
        let mut food = FoodGrid::from_positions([Position::new(50, 0)]);

        let summary = run_satiation_loop(&mut agents, &mut [], &mut food, PredationPolicy::default(), 4);

        assert_eq!(summary.rounds, 4);
        assert!(summary.hit_round_limit);
        assert_eq!(agents[0].position, Position::new(4, 0));
    }

    #[test]
    fn test_hunting_predators_remove_prey_from_later_rounds() {
        let mut agents = vec![spawn(Species::Forager, 2, 0, 1)];
        let mut predators = vec![spawn(Species::Predator, 0, 0, 1)];
        let mut food = FoodGrid::from_positions([Position::new(3, 0)]);

        let summary = run_satiation_loop(&mut agents, &mut predators, &mut food, PredationPolicy::Hunt, 100);

        // The forager eats (3,0) before the predator moves, leaving the
        // predator nothing to chase, so the two never share a cell.
        assert_eq!(summary.predation_meals, 0);
        assert!(!agents[0].eaten);

        let mut agents = vec![spawn(Species::Forager, 1, 0, 0)];
        let mut predators = vec![spawn(Species::Predator, 0, 0, 1)];
        let mut food = FoodGrid::from_positions([Position::new(1, 0)]);
        let summary = run_satiation_loop(&mut agents, &mut predators, &mut food, PredationPolicy::Hunt, 100);

        // The immobile forager sits on the food; the predator walks onto it
        assert_eq!(summary.predation_meals, 1);
        assert!(agents[0].eaten);
        assert!(!agents[0].is_viable());
    }
}
