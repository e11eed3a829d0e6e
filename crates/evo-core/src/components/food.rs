//! Food Grid
//!
//! Food is fungible: the grid is just the list of cells holding one item.
//! Insertion order is kept so nearest-food ties resolve deterministically.

use evo_events::Position;
use std::collections::HashSet;

use crate::rng::SimRng;

/// Food items currently on the grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodGrid {
    items: Vec<Position>,
}

impl FoodGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from explicit positions; duplicates after the first are dropped
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        let mut seen = HashSet::new();
        let items = positions.into_iter().filter(|p| seen.insert(*p)).collect();
        Self { items }
    }

    /// Replace all food with `count` unique random cells in `[0,width] x [0,height]`.
    ///
    /// `count` must not exceed the number of cells; config validation checks this.
    pub fn repopulate(&mut self, count: usize, width: i64, height: i64, rng: &mut SimRng) {
        self.items.clear();
        self.items.reserve(count);

        let mut occupied = HashSet::with_capacity(count);
        while self.items.len() < count {
            let position = rng.position(width, height);
            if occupied.insert(position) {
                self.items.push(position);
            }
        }
    }

    /// Closest food by Manhattan distance; first in insertion order wins ties
    pub fn nearest(&self, from: Position) -> Option<(Position, i64)> {
        let mut best: Option<(Position, i64)> = None;
        for &item in &self.items {
            let d = from.manhattan_distance(item);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((item, d)),
            }
        }
        best
    }

    pub fn contains(&self, position: Position) -> bool {
        self.items.contains(&position)
    }

    /// Remove the item at `position`. Returns whether there was one.
    pub fn consume_at(&mut self, position: Position) -> bool {
        match self.items.iter().position(|&p| p == position) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
