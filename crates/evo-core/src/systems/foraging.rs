//! Foraging
//!
//! One satiation round for one entity: head for the nearest food item or
//! stay put. Movement is a sequence of unit steps along the axis with the
//! larger remaining delta, and food is eaten after every step.

use evo_events::Position;

use crate::components::{Entity, FoodGrid};

/// What an entity did during one round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForageOutcome {
    /// The entity stayed put and paid its stationary penalty
    pub satiated: bool,
    /// Unit steps taken
    pub steps: u32,
    /// Cells whose food was eaten, in order
    pub consumed: Vec<Position>,
}

/// Run one round for `entity` against the shared food grid.
///
/// The entity pursues the nearest food only when its distance is strictly
/// less than `energy * speed`. Otherwise it is satiated for this round and
/// pays its stationary penalty. Energy has no floor here; the cull deals
/// with entities that end up at or below zero.
pub fn forage_step(entity: &mut Entity, food: &mut FoodGrid) -> ForageOutcome {
    let target = match food.nearest(entity.position) {
        Some((target, distance)) if entity.will_pursue(distance) => target,
        _ => {
            entity.satiated = true;
            entity.energy -= entity.stationary_penalty;
            return ForageOutcome {
                satiated: true,
                ..ForageOutcome::default()
            };
        }
    };

    entity.satiated = false;
    let mut outcome = ForageOutcome::default();

    // Food under the entity's feet is eaten before it moves
    eat_here(entity, food, &mut outcome);

    for _ in 0..entity.speed {
        if entity.position == target {
            break;
        }
        entity.position = manhattan_step(entity.position, target);
        entity.energy -= entity.movement_cost;
        outcome.steps += 1;
        eat_here(entity, food, &mut outcome);
    }

    outcome
}

/// One unit step from `from` toward `target`.
///
/// Moves vertically only when the vertical delta is strictly larger;
/// equal deltas move horizontally.
pub fn manhattan_step(from: Position, target: Position) -> Position {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    if dy.abs() > dx.abs() {
        Position::new(from.x, from.y + dy.signum())
    } else {
        Position::new(from.x + dx.signum(), from.y)
    }
}

fn eat_here(entity: &mut Entity, food: &mut FoodGrid, outcome: &mut ForageOutcome) {
    if food.consume_at(entity.position) {
        entity.eat();
        outcome.consumed.push(entity.position);
    }
}
